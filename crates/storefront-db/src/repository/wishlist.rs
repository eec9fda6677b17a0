//! # Wishlist Repository
//!
//! Persists the wishlist as a JSON array of products under `wishlist`.

use crate::error::DbResult;
use crate::repository::kv::KvRepository;
use storefront_core::Product;

/// Storage key of the saved wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

#[derive(Debug, Clone)]
pub struct WishlistRepository {
    kv: KvRepository,
}

impl WishlistRepository {
    pub fn new(kv: KvRepository) -> Self {
        WishlistRepository { kv }
    }

    pub async fn load(&self) -> DbResult<Option<Vec<Product>>> {
        match self.kv.load(WISHLIST_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, items: &[Product]) -> DbResult<()> {
        let json = serde_json::to_string(items)?;
        self.kv.save(WISHLIST_KEY, &json).await
    }

    pub async fn remove(&self) -> DbResult<()> {
        self.kv.remove(WISHLIST_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use storefront_core::{Money, Product, Rating};

    #[tokio::test]
    async fn test_save_then_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let items = vec![Product {
            id: 5,
            title: "Dragon Station Chain Bracelet".to_string(),
            price: Money::from_cents(69500),
            description: String::new(),
            category: "jewelery".to_string(),
            image: String::new(),
            rating: Rating::default(),
        }];

        db.wishlists().save(&items).await.unwrap();

        assert_eq!(db.wishlists().load().await.unwrap(), Some(items));
    }
}
