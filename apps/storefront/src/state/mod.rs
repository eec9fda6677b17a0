//! # Application State
//!
//! Everything a command needs, constructed once at startup and passed by
//! reference.
//!
//! ## State Objects
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppState                                                               │
//! │  ├── config:   ConfigState        read-only after load                 │
//! │  ├── db:       DbState            storage handle                       │
//! │  ├── catalog:  Arc<dyn CatalogSource>                                  │
//! │  ├── cart:     CartState          Arc<Mutex<CartLedger>>               │
//! │  ├── wishlist: WishlistState      Arc<Mutex<Wishlist>>                 │
//! │  └── session:  SessionState       current user (optional)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod db;
mod session;
mod wishlist;

pub use cart::CartState;
pub use config::{ConfigError, ConfigState};
pub use db::DbState;
pub use session::SessionState;
pub use wishlist::WishlistState;

use std::sync::Arc;

use tracing::{info, warn};

use crate::client::CatalogSource;
use storefront_core::{CartLedger, Wishlist};
use storefront_db::Database;

/// Explicitly owned application state.
pub struct AppState {
    pub config: ConfigState,
    pub db: DbState,
    pub catalog: Arc<dyn CatalogSource>,
    pub cart: CartState,
    pub wishlist: WishlistState,
    pub session: SessionState,
}

impl AppState {
    /// Builds the state and restores the saved cart and wishlist.
    ///
    /// ## Restore Failures
    /// A saved cart or wishlist that can't be read (storage error, corrupt
    /// JSON, invalid product) is logged and replaced by an empty one. The
    /// bad document stays on disk until the next successful save.
    pub async fn load(
        config: ConfigState,
        db: Database,
        catalog: Arc<dyn CatalogSource>,
        user_id: Option<String>,
    ) -> Self {
        let tax_rate = config.tax_rate();

        let ledger = match db.carts().load().await {
            Ok(Some(saved)) => CartLedger::restore(tax_rate, saved).unwrap_or_else(|e| {
                warn!(error = %e, "Saved cart is invalid, starting empty");
                CartLedger::new(tax_rate)
            }),
            Ok(None) => CartLedger::new(tax_rate),
            Err(e) => {
                warn!(error = %e, "Could not load saved cart, starting empty");
                CartLedger::new(tax_rate)
            }
        };

        let wishlist = match db.wishlists().load().await {
            Ok(Some(saved)) => Wishlist::restore(saved).unwrap_or_else(|e| {
                warn!(error = %e, "Saved wishlist is invalid, starting empty");
                Wishlist::new()
            }),
            Ok(None) => Wishlist::new(),
            Err(e) => {
                warn!(error = %e, "Could not load saved wishlist, starting empty");
                Wishlist::new()
            }
        };

        info!(
            cart_lines = ledger.cart().items().len(),
            wishlist_items = wishlist.len(),
            "State restored"
        );

        AppState {
            config,
            db: DbState::new(db),
            catalog,
            cart: CartState::from_ledger(ledger),
            wishlist: WishlistState::new(wishlist),
            session: SessionState::new(user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StaticCatalog;
    use storefront_core::{Money, Product, Rating, TaxRate};
    use storefront_db::DbConfig;

    fn product() -> Product {
        Product {
            id: 1,
            title: "Backpack".to_string(),
            price: Money::from_major(100),
            description: String::new(),
            category: "men's clothing".to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    #[tokio::test]
    async fn test_load_restores_with_configured_tax() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut ledger = CartLedger::new(TaxRate::from_bps(1000));
        let saved = ledger.add_item(&product(), 1).unwrap();
        db.carts().save(&saved).await.unwrap();

        let config = ConfigState {
            tax_rate_bps: 500,
            ..ConfigState::default()
        };
        let state = AppState::load(config, db, Arc::new(StaticCatalog::default()), None).await;

        let cart = state.cart.snapshot();
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.tax(), Money::from_major(5));
        assert_eq!(cart.total(), Money::from_major(105));
    }

    #[tokio::test]
    async fn test_corrupt_state_starts_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().save("cart", "{\"items\": 12}").await.unwrap();
        db.kv().save("wishlist", "nope").await.unwrap();

        let state = AppState::load(
            ConfigState::default(),
            db,
            Arc::new(StaticCatalog::default()),
            Some("user-1".to_string()),
        )
        .await;

        assert!(state.cart.snapshot().is_empty());
        assert!(state.wishlist.items().is_empty());
        assert!(state.session.is_authenticated());
    }
}
