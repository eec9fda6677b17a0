//! # Wishlist
//!
//! Products saved for later. Insertion-ordered, no duplicates, and
//! published through a [`Store`] the same way the cart is.

use crate::error::CoreResult;
use crate::store::{Store, Subscription};
use crate::types::{Product, ProductId};
use crate::validation::validate_product;

#[derive(Debug)]
pub struct Wishlist {
    items: Vec<Product>,
    store: Store<Vec<Product>>,
}

impl Default for Wishlist {
    fn default() -> Self {
        Wishlist::new()
    }
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist {
            items: Vec::new(),
            store: Store::new(Vec::new()),
        }
    }

    /// Rebuilds a wishlist from saved products, dropping repeated ids.
    pub fn restore(saved: Vec<Product>) -> CoreResult<Self> {
        let mut wishlist = Wishlist::new();
        for product in &saved {
            validate_product(product)?;
            if !wishlist.contains(product.id) {
                wishlist.items.push(product.clone());
            }
        }
        wishlist.store.set(wishlist.items.clone());
        Ok(wishlist)
    }

    /// Adds `product` unless it is already saved.
    ///
    /// Returns `true` if the wishlist changed. Nothing is published when it
    /// didn't.
    pub fn add(&mut self, product: &Product) -> CoreResult<bool> {
        validate_product(product)?;
        if self.contains(product.id) {
            return Ok(false);
        }
        self.items.push(product.clone());
        self.publish();
        Ok(true)
    }

    /// Removes the product; absent ids are a no-op. Returns the removed product.
    pub fn remove(&mut self, product_id: ProductId) -> Option<Product> {
        let index = self.items.iter().position(|p| p.id == product_id)?;
        let removed = self.items.remove(index);
        self.publish();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.publish();
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == product_id)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subscribes to changes; the current list is replayed immediately.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<Vec<Product>>
    where
        F: Fn(&Vec<Product>) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    fn publish(&self) {
        self.store.set(self.items.clone());
    }
}
