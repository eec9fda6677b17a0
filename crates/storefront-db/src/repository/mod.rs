//! # Repositories
//!
//! One repository per stored concern. `cart`, `wishlist` and `catalog` are
//! typed views over the `kv` store; `order` has its own table.

pub mod cart;
pub mod catalog;
pub mod kv;
pub mod order;
pub mod wishlist;
