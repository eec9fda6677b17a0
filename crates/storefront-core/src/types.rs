//! # Domain Types
//!
//! Catalog types shared by the cart, wishlist and query engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (integer)   │◄──│  product (copy) │◄──│  lines          │       │
//! │  │  title          │   │  quantity       │   │  subtotal/tax   │       │
//! │  │  price (Money)  │   └─────────────────┘   │  total          │       │
//! │  │  category       │                         └─────────────────┘       │
//! │  │  rating         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Products are owned by the catalog source and are immutable once fetched.
//! A cart line holds a copy taken at add-time; it never writes back.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Catalog identifier of a product.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A purchasable product, exactly as the catalog API returns it.
///
/// ## JSON Shape
/// ```json
/// {
///   "id": 1,
///   "title": "Fjallraven - Foldsack No. 1 Backpack",
///   "price": 109.95,
///   "description": "Your perfect pack for everyday use...",
///   "category": "men's clothing",
///   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///   "rating": { "rate": 3.9, "count": 120 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique catalog identifier. Zero means "missing".
    pub id: ProductId,

    /// Display name; also the key for name sorting.
    pub title: String,

    /// Unit price. Must not be negative.
    pub price: Money,

    /// Long description, searched together with the title.
    #[serde(default)]
    pub description: String,

    /// Category string from an open set ("electronics", "jewelery", ...).
    pub category: String,

    /// Image URI.
    #[serde(default)]
    pub image: String,

    /// Aggregate customer rating.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Returns true if the title or description contains `needle`.
    ///
    /// `needle` must already be lowercased; the product text is lowercased
    /// here. Plain substring match, no tokenizing.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Customer rating: average `rate` (0-5) over `count` reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKPACK: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_product_from_api_json() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.price, "109.95".parse().unwrap());
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn test_product_json_field_names() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();
        let value = serde_json::to_value(&product).unwrap();

        for field in ["id", "title", "price", "description", "category", "image", "rating"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["rating"]["rate"], 3.9);
    }

    #[test]
    fn test_matches_search_is_case_insensitive_substring() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();

        assert!(product.matches_search("backpack"));
        assert!(product.matches_search("forest"));
        assert!(!product.matches_search("laptop bag"));
    }
}
