//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / caller                                                 │
//! │  ├── Type validation (clap, serde deserialization)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: business rule validation                        │
//! │  ├── Product shape before it enters a cart or wishlist                 │
//! │  ├── Quantities and page sizes                                         │
//! │  └── Shipping address at checkout                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger invariants (quantity > 0, totals recomputed)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator is checked BEFORE any state is touched, so a rejected
//! mutation never partially applies.

use crate::checkout::ShippingAddress;
use crate::error::ValidationError;
use crate::types::Product;
use crate::MAX_SEARCH_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product before it is referenced by a cart line or wishlist.
///
/// ## Rules
/// - `id` must be present (non-zero)
/// - `price` must be non-negative (zero is allowed: free items)
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product;
/// use storefront_core::{Money, Product, Rating};
///
/// let mut product = Product {
///     id: 1,
///     title: "Mug".to_string(),
///     price: Money::from_cents(799),
///     description: String::new(),
///     category: "kitchen".to_string(),
///     image: String::new(),
///     rating: Rating::default(),
/// };
/// assert!(validate_product(&product).is_ok());
///
/// product.price = Money::from_cents(-1);
/// assert!(validate_product(&product).is_err());
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id == 0 {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity passed to `add_item`.
///
/// ## Rules
/// - Must be positive (> 0). Zero has no "add" meaning.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog page size.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_page_size(page_size: u32) -> ValidationResult<()> {
    if page_size == 0 {
        return Err(ValidationError::MustBePositive {
            field: "page size".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search term supplied by a caller.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters, whitespace included
///
/// The term is not altered; [`crate::catalog::query`] matches it as given.
pub fn validate_search_query(query: &str) -> ValidationResult<()> {
    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(())
}

/// Validates a shipping address at checkout.
///
/// ## Rules
/// - first name, last name, street, city, state, country are required
/// - ZIP is `12345` or `12345-6789`
/// - phone is exactly 10 digits
pub fn validate_shipping_address(address: &ShippingAddress) -> ValidationResult<()> {
    let required = [
        ("first name", &address.first_name),
        ("last name", &address.last_name),
        ("street address", &address.street_address),
        ("city", &address.city),
        ("state", &address.state),
        ("country", &address.country),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    if !is_zip_code(address.zip_code.trim()) {
        return Err(ValidationError::InvalidFormat {
            field: "zip code".to_string(),
            reason: "must be 5 digits, optionally followed by -4 digits".to_string(),
        });
    }

    let phone = address.phone.trim();
    if phone.len() != 10 || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be 10 digits".to_string(),
        });
    }

    Ok(())
}

fn is_zip_code(zip: &str) -> bool {
    let digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
    match zip.split_once('-') {
        Some((head, tail)) => digits(head, 5) && digits(tail, 4),
        None => digits(zip, 5),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
