//! # Cart Repository
//!
//! Persists the session cart as one JSON document under the `cart` key.
//!
//! Only the lines matter on the way back in: the app hands the loaded
//! [`Cart`] to `CartLedger::restore`, which recomputes every total.

use tracing::debug;

use crate::error::DbResult;
use crate::repository::kv::KvRepository;
use storefront_core::Cart;

/// Storage key of the saved cart.
pub const CART_KEY: &str = "cart";

#[derive(Debug, Clone)]
pub struct CartRepository {
    kv: KvRepository,
}

impl CartRepository {
    pub fn new(kv: KvRepository) -> Self {
        CartRepository { kv }
    }

    /// Loads the saved cart, if any.
    ///
    /// ## Errors
    /// `DbError::Serialization` if the stored document is not a cart.
    pub async fn load(&self) -> DbResult<Option<Cart>> {
        match self.kv.load(CART_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        let json = serde_json::to_string(cart)?;
        self.kv.save(CART_KEY, &json).await?;

        debug!(lines = cart.items().len(), total_items = cart.total_items(), "Cart saved");
        Ok(())
    }

    pub async fn remove(&self) -> DbResult<()> {
        self.kv.remove(CART_KEY).await?;
        Ok(())
    }
}
