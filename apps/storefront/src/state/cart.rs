//! # Cart State
//!
//! The session's [`CartLedger`] behind a mutex.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command                                                                │
//! │    ├── with_cart_mut(|ledger| ledger.add_item(..))   lock held         │
//! │    │       └── returns Cart snapshot                 lock released     │
//! │    └── db.carts().save(&snapshot).await              no lock held      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The lock is never held across an `.await`.

use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::{Cart, CartLedger, TaxRate};

/// Thread-safe cart state.
#[derive(Debug, Clone)]
pub struct CartState {
    ledger: Arc<Mutex<CartLedger>>,
}

impl CartState {
    /// Creates an empty cart taxed at `tax_rate`.
    pub fn new(tax_rate: TaxRate) -> Self {
        CartState::from_ledger(CartLedger::new(tax_rate))
    }

    /// Wraps an existing (usually restored) ledger.
    pub fn from_ledger(ledger: CartLedger) -> Self {
        CartState {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let in_cart = cart_state.with_cart(|ledger| ledger.contains(product_id));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartLedger) -> R,
    {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let cart = cart_state.with_cart_mut(|ledger| ledger.add_item(&product, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartLedger) -> R,
    {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }

    /// The current cart snapshot.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(CartLedger::cart)
    }
}
