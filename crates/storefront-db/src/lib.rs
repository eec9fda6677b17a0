//! # storefront-db: Persistence for the Storefront
//!
//! Local SQLite storage for everything the storefront must remember between
//! runs: the cart, the wishlist, cached catalog responses and placed orders.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  Command (add_to_cart)                                                 │
//! │       │  1. CartLedger mutates in memory (storefront-core)             │
//! │       ▼  2. snapshot handed here                                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   storefront-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐   ┌───────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │   │ Migrations│  │   │
//! │  │   │   (pool.rs)   │    │                    │   │ (embedded)│  │   │
//! │  │   │               │    │ KvRepository       │   │           │  │   │
//! │  │   │ SqlitePool    │◄───│  ├ CartRepository  │   │ 001_kv    │  │   │
//! │  │   │               │    │  ├ WishlistRepo    │   │ 002_orders│  │   │
//! │  │   │               │    │  └ CatalogCache    │   │           │  │   │
//! │  │   │               │    │ OrderRepository    │   │           │  │   │
//! │  │   └───────────────┘    └────────────────────┘   └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront.db  (platform data dir, or STOREFRONT_DB_PATH)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("storefront.db")).await?;
//!
//! db.carts().save(&cart).await?;
//! let saved = db.carts().load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::catalog::{Cached, CatalogCacheRepository};
pub use repository::kv::KvRepository;
pub use repository::order::OrderRepository;
pub use repository::wishlist::WishlistRepository;
