//! # Wishlist State
//!
//! The session's [`Wishlist`] behind a mutex, locked the same way as the
//! cart.

use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::{Product, Wishlist};

#[derive(Debug, Clone, Default)]
pub struct WishlistState {
    wishlist: Arc<Mutex<Wishlist>>,
}

impl WishlistState {
    pub fn new(wishlist: Wishlist) -> Self {
        WishlistState {
            wishlist: Arc::new(Mutex::new(wishlist)),
        }
    }

    pub fn with_wishlist<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Wishlist) -> R,
    {
        let wishlist = self.wishlist.lock().unwrap_or_else(PoisonError::into_inner);
        f(&wishlist)
    }

    pub fn with_wishlist_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Wishlist) -> R,
    {
        let mut wishlist = self.wishlist.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut wishlist)
    }

    /// Copy of the saved products in insertion order.
    pub fn items(&self) -> Vec<Product> {
        self.with_wishlist(|w| w.items().to_vec())
    }
}
