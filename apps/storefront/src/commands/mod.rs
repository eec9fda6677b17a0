//! # Commands Module
//!
//! Every operation the CLI exposes. Each command takes `&AppState`, returns
//! a serializable response or [`ApiError`](crate::error::ApiError), and never
//! prints anything itself.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Catalog listing, lookup, cache refresh
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── wishlist.rs  ◄─── Wishlist manipulation, move to cart
//! ├── checkout.rs  ◄─── Order placement and history
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart(state, id, qty)                                            │
//! │       │                                                                 │
//! │       ├── product::get_product()      cache, then catalog source        │
//! │       ├── state.cart.with_cart_mut()  sync, lock held briefly           │
//! │       ├── db.carts().save().await     failure ──► response.warnings     │
//! │       ▼                                                                 │
//! │  CartResponse { cart, display, warnings }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Storage failures after a mutation never undo it: the in-memory state is
//! the source of truth for the session.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod product;
pub mod wishlist;
