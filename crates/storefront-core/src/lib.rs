//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart and
//! catalog logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/storefront (CLI)                        │   │
//! │  │    products ──► cart ──► wishlist ──► checkout ──► orders      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │CartLedger │  │  query()  │  │   │
//! │  │   │  Rating   │  │  TaxRate  │  │   Cart    │  │CatalogPage│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   store   │  │ wishlist  │  │ checkout  │                  │   │
//! │  │   │ Store<T>  │  │ Wishlist  │  │   Order   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-db (Persistence Layer)               │   │
//! │  │              SQLite key-value store, orders table               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Rating)
//! - [`money`] - Exact decimal Money and TaxRate
//! - [`cart`] - Cart Ledger (line items + derived totals)
//! - [`catalog`] - Catalog Query Engine (filter, sort, paginate)
//! - [`store`] - Publish/subscribe state container
//! - [`wishlist`] - Saved-for-later products
//! - [`checkout`] - Orders placed from a cart
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Exact Money**: Monetary values are decimals, rounded only for display
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::{Money, TaxRate};
//!
//! let subtotal = Money::from_cents(4000); // $40.00
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(1000)); // 10%
//!
//! assert_eq!(tax, Money::from_cents(400));
//! assert_eq!((subtotal + tax).to_string(), "$44.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use cart::{Cart, CartLedger, CartLine};
pub use catalog::{CatalogPage, CatalogQuery, SortDirection, SortKey};
pub use checkout::{Order, OrderStatus, PaymentMethod, ShippingAddress};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use store::{Store, Subscription};
pub use types::*;
pub use wishlist::Wishlist;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax rate in basis points (1000 = 10%).
///
/// This is the only compiled-in tax rate. The running value is injected
/// into [`CartLedger::new`] from configuration.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Products shown per catalog page when the caller doesn't say.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Largest page size the application layer will accept.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Maximum length of a catalog search term.
pub const MAX_SEARCH_LENGTH: usize = 100;
