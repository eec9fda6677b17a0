//! # Cart Ledger
//!
//! Maintains the shopping cart's line items and derives its totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Operation               Line Change                  Published?       │
//! │  ─────────               ───────────                  ──────────       │
//! │                                                                         │
//! │  add_item(p, n) ───────► qty += n  or  push {p, n}    yes              │
//! │  remove_item(id) ──────► retain(id != line.id)        yes (even no-op) │
//! │  set_quantity(id, n) ──► n <= 0 ? remove : qty = n    yes              │
//! │  clear() ──────────────► lines = []                    yes              │
//! │  invalid input ────────► (nothing)                    NO               │
//! │                                                                         │
//! │  After EVERY accepted operation:                                       │
//! │    subtotal    = Σ price × quantity                                    │
//! │    tax         = subtotal × tax rate      (exact, unrounded)           │
//! │    total       = subtotal + tax                                        │
//! │    total_items = Σ quantity                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id; lines keep first-insertion order
//! - Every line has quantity > 0
//! - A published [`Cart`] is always fully recomputed from its lines
//! - A rejected operation changes nothing and publishes nothing

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, TaxRate};
use crate::store::{Store, Subscription};
use crate::types::{Product, ProductId};
use crate::validation::{validate_product, validate_quantity};

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct product in the cart and how many of it.
///
/// ## Product Snapshot
/// `product` is a copy taken when the line was created, so the cart renders
/// the same title and price even if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Id of the referenced product.
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × quantity.
    ///
    /// Fails with [`CoreError::AmountTooLarge`] if the product doesn't fit.
    #[inline]
    pub fn line_total(&self) -> CoreResult<Money> {
        self.product
            .price
            .checked_mul(self.quantity)
            .ok_or(CoreError::AmountTooLarge)
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// An immutable, internally consistent view of the cart.
///
/// ## JSON Shape
/// This is also the persisted format:
/// ```json
/// {
///   "items": [{ "product": { "id": 1, "price": 10.0, ... }, "quantity": 2 }],
///   "totalItems": 2,
///   "subtotal": 20.0,
///   "tax": 2.0,
///   "total": 22.0
/// }
/// ```
/// The derived fields are written for readers of the stored JSON, but they
/// are never read back as truth: [`CartLedger::restore`] recomputes them.
/// A document with only `items` is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    items: Vec<CartLine>,
    #[serde(default)]
    total_items: u64,
    #[serde(default)]
    subtotal: Money,
    #[serde(default)]
    tax: Money,
    #[serde(default)]
    total: Money,
}

impl Cart {
    /// The zero cart: no lines, all totals zero.
    pub fn empty() -> Self {
        Cart::default()
    }

    /// Builds a snapshot from `items`, deriving every total.
    ///
    /// Fails with [`CoreError::AmountTooLarge`] if any amount overflows.
    fn recalculate(items: Vec<CartLine>, tax_rate: TaxRate) -> CoreResult<Self> {
        let mut subtotal = Money::zero();
        for line in &items {
            subtotal = subtotal
                .checked_add(line.line_total()?)
                .ok_or(CoreError::AmountTooLarge)?;
        }
        let tax = subtotal
            .checked_tax(tax_rate)
            .ok_or(CoreError::AmountTooLarge)?;
        let total = subtotal
            .checked_add(tax)
            .ok_or(CoreError::AmountTooLarge)?;
        let total_items = items.iter().map(|line| u64::from(line.quantity)).sum();

        Ok(Cart {
            items,
            total_items,
            subtotal,
            tax,
            total,
        })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Σ price × quantity, unrounded.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// subtotal × tax rate, unrounded.
    pub fn tax(&self) -> Money {
        self.tax
    }

    /// subtotal + tax, unrounded.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Finds the line for `product_id`.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product_id() == product_id)
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// The single mutable cart of a shopping session.
///
/// Owns the lines and a [`Store<Cart>`] that receives one recomputed
/// snapshot per accepted operation.
///
/// ## Usage
/// ```rust
/// use storefront_core::{CartLedger, Money, Product, Rating, TaxRate};
///
/// let product = Product {
///     id: 1,
///     title: "Mug".to_string(),
///     price: Money::from_major(10),
///     description: String::new(),
///     category: "kitchen".to_string(),
///     image: String::new(),
///     rating: Rating::default(),
/// };
///
/// let mut ledger = CartLedger::new(TaxRate::from_bps(1000));
/// let cart = ledger.add_item(&product, 2).unwrap();
///
/// assert_eq!(cart.subtotal(), Money::from_major(20));
/// assert_eq!(cart.total(), Money::from_major(22));
/// ```
#[derive(Debug)]
pub struct CartLedger {
    lines: Vec<CartLine>,
    tax_rate: TaxRate,
    store: Store<Cart>,
}

impl CartLedger {
    /// Creates an empty ledger taxing at `tax_rate`.
    pub fn new(tax_rate: TaxRate) -> Self {
        CartLedger {
            lines: Vec::new(),
            tax_rate,
            store: Store::new(Cart::empty()),
        }
    }

    /// Rebuilds a ledger from a previously saved cart.
    ///
    /// ## Behavior
    /// - Stored totals are ignored and recomputed with `tax_rate`
    /// - Lines with quantity 0 are dropped
    /// - Repeated product ids are merged into the first line
    /// - A line with an invalid product fails the whole restore
    /// - Totals too large for `Money` fail with [`CoreError::AmountTooLarge`]
    pub fn restore(tax_rate: TaxRate, saved: Cart) -> CoreResult<Self> {
        let mut ledger = CartLedger::new(tax_rate);
        let mut lines: Vec<CartLine> = Vec::with_capacity(saved.items.len());

        for line in saved.items {
            validate_product(&line.product)?;
            if line.quantity == 0 {
                continue;
            }
            match lines.iter_mut().find(|l| l.product_id() == line.product_id()) {
                Some(existing) => {
                    existing.quantity = checked_quantity(existing.quantity, line.quantity)?;
                }
                None => lines.push(line),
            }
        }

        ledger.commit(lines)?;
        Ok(ledger)
    }

    /// The tax rate applied on every recalculation.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The current cart snapshot.
    ///
    /// The store is private and rewritten on every accepted mutation, so this
    /// always matches the ledger's lines.
    pub fn cart(&self) -> Cart {
        self.store.current()
    }

    /// Subscribes to cart changes; the current cart is replayed immediately.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<Cart>
    where
        F: Fn(&Cart) + Send + Sync + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Adds `quantity` units of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: its line's quantity increases
    /// - Product not in cart: a new line is appended
    ///
    /// ## Errors
    /// - `quantity == 0` → [`CoreError::Validation`]
    /// - malformed product (missing id, negative price) → [`CoreError::Validation`]
    /// - resulting quantity overflows → [`CoreError::QuantityTooLarge`]
    /// - a total no longer fits in `Money` → [`CoreError::AmountTooLarge`]
    ///
    /// The cart is untouched on error.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> CoreResult<Cart> {
        validate_quantity(quantity)?;
        validate_product(product)?;

        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|l| l.product_id() == product.id) {
            Some(line) => line.quantity = checked_quantity(line.quantity, quantity)?,
            None => lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }

        self.commit(lines)
    }

    /// Removes the line for `product_id`. Absent ids are a no-op, not an error.
    pub fn remove_item(&mut self, product_id: ProductId) -> Cart {
        let lines = self
            .lines
            .iter()
            .filter(|l| l.product_id() != product_id)
            .cloned()
            .collect();
        // Prices are non-negative, so a subset of committed lines never
        // totals more than the committed cart.
        self.commit(lines).unwrap_or_else(|_| self.cart())
    }

    /// Replaces the quantity of the line for `product_id`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`CartLedger::remove_item`]
    /// - product not in cart: no-op
    ///
    /// ## Errors
    /// - `quantity` larger than a line can hold → [`CoreError::QuantityTooLarge`]
    /// - the new line total doesn't fit in `Money` → [`CoreError::AmountTooLarge`]
    ///
    /// The cart is untouched on error.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> CoreResult<Cart> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        let quantity = u32::try_from(quantity).map_err(|_| CoreError::QuantityTooLarge {
            requested: quantity.unsigned_abs(),
            max: u64::from(u32::MAX),
        })?;

        let mut lines = self.lines.clone();
        if let Some(line) = lines.iter_mut().find(|l| l.product_id() == product_id) {
            line.quantity = quantity;
        }
        self.commit(lines)
    }

    /// Empties the cart, yielding the zero cart.
    pub fn clear(&mut self) -> Cart {
        self.lines.clear();
        let cart = Cart::empty();
        self.store.set(cart.clone());
        cart
    }

    /// Read-only lookup of the line for `product_id`.
    pub fn get_line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Checks if `product_id` has a line.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get_line(product_id).is_some()
    }

    /// Recomputes the snapshot for `lines`, then installs and publishes it.
    ///
    /// Nothing changes if recalculation fails.
    fn commit(&mut self, lines: Vec<CartLine>) -> CoreResult<Cart> {
        let cart = Cart::recalculate(lines.clone(), self.tax_rate)?;
        self.lines = lines;
        self.store.set(cart.clone());
        Ok(cart)
    }
}

fn checked_quantity(current: u32, added: u32) -> CoreResult<u32> {
    current
        .checked_add(added)
        .ok_or(CoreError::QuantityTooLarge {
            requested: u64::from(current) + u64::from(added),
            max: u64::from(u32::MAX),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rating;
    use rust_decimal::Decimal;
    use std::sync::{Arc, Mutex};

    fn test_product(id: ProductId, price_major: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: Money::from_major(price_major),
            description: String::new(),
            category: "electronics".to_string(),
            image: format!("https://example.com/{}.jpg", id),
            rating: Rating {
                rate: 4.0,
                count: 10,
            },
        }
    }

    fn ledger() -> CartLedger {
        CartLedger::new(TaxRate::from_bps(1000))
    }

    fn assert_consistent(cart: &Cart) {
        let subtotal: Money = cart.items().iter().map(|l| l.line_total().unwrap()).sum();
        assert_eq!(cart.subtotal(), subtotal);
        assert_eq!(cart.total(), cart.subtotal() + cart.tax());
        assert_eq!(
            cart.total_items(),
            cart.items().iter().map(|l| u64::from(l.quantity)).sum::<u64>()
        );
    }

    #[test]
    fn test_end_to_end_add_then_remove() {
        let mut ledger = ledger();
        let p1 = test_product(1, 10);
        let p2 = test_product(2, 20);

        ledger.add_item(&p1, 2).unwrap();
        let cart = ledger.add_item(&p2, 1).unwrap();

        assert_eq!(cart.subtotal(), Money::from_major(40));
        assert_eq!(cart.tax(), Money::from_major(4));
        assert_eq!(cart.total(), Money::from_major(44));
        assert_eq!(cart.total_items(), 3);

        let cart = ledger.remove_item(1);

        assert_eq!(cart.subtotal(), Money::from_major(20));
        assert_eq!(cart.tax(), Money::from_major(2));
        assert_eq!(cart.total(), Money::from_major(22));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut ledger = ledger();
        let product = test_product(1, 10);

        ledger.add_item(&product, 2).unwrap();
        let cart = ledger.add_item(&product, 3).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut ledger = ledger();
        for id in [3, 1, 2] {
            ledger.add_item(&test_product(id, 5), 1).unwrap();
        }
        let cart = ledger.add_item(&test_product(1, 5), 1).unwrap();

        let ids: Vec<_> = cart.items().iter().map(CartLine::product_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut a = ledger();
        let mut b = ledger();
        for ledger in [&mut a, &mut b] {
            ledger.add_item(&test_product(1, 10), 2).unwrap();
            ledger.add_item(&test_product(2, 20), 1).unwrap();
        }

        let via_set = a.set_quantity(1, 0).unwrap();
        let via_remove = b.remove_item(1);

        assert_eq!(via_set, via_remove);
        assert!(!a.contains(1));
    }

    #[test]
    fn test_set_quantity_negative_clamps_to_removal() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 2).unwrap();

        let cart = ledger.set_quantity(1, -4).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart, Cart::empty());
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 2).unwrap();

        let cart = ledger.set_quantity(1, 7).unwrap();

        assert_eq!(cart.total_items(), 7);
        assert_eq!(cart.subtotal(), Money::from_major(70));
    }

    #[test]
    fn test_set_quantity_on_absent_line_is_noop() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 2).unwrap();
        let before = ledger.cart();

        let after = ledger.set_quantity(99, 3).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_absent_is_idempotent() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 2).unwrap();
        ledger.add_item(&test_product(2, 20), 1).unwrap();
        let before = ledger.cart();

        let once = ledger.remove_item(42);
        let twice = ledger.remove_item(42);

        assert_eq!(before, once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rejected_add_leaves_cart_unchanged() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 2).unwrap();
        let before = ledger.cart();

        let mut negative = test_product(2, 10);
        negative.price = Money::from_cents(-1);
        let missing_id = test_product(0, 10);

        assert!(matches!(
            ledger.add_item(&negative, 1),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            ledger.add_item(&missing_id, 1),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            ledger.add_item(&test_product(3, 10), 0),
            Err(CoreError::Validation(_))
        ));

        assert_eq!(ledger.cart(), before);
    }

    #[test]
    fn test_quantity_overflow_is_rejected() {
        let mut ledger = ledger();
        let product = test_product(1, 1);
        ledger.add_item(&product, u32::MAX).unwrap();

        let result = ledger.add_item(&product, 1);

        assert!(matches!(result, Err(CoreError::QuantityTooLarge { .. })));
        assert_eq!(ledger.get_line(1).map(|l| l.quantity), Some(u32::MAX));
        assert!(ledger.set_quantity(1, i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_amount_overflow_leaves_cart_unchanged() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 2).unwrap();
        let before = ledger.cart();

        let mut huge = test_product(2, 0);
        huge.price = Money::from_decimal(Decimal::MAX);

        assert!(matches!(
            ledger.add_item(&huge, 10_000),
            Err(CoreError::AmountTooLarge)
        ));
        assert!(matches!(
            ledger.add_item(&huge, 1),
            Err(CoreError::AmountTooLarge)
        ));
        assert_eq!(ledger.cart(), before);
        assert!(!ledger.contains(2));

        let mut big = test_product(3, 0);
        big.price = Money::from_decimal(Decimal::MAX / Decimal::from(4));
        ledger.add_item(&big, 1).unwrap();
        let before = ledger.cart();

        assert!(matches!(
            ledger.set_quantity(3, 10_000),
            Err(CoreError::AmountTooLarge)
        ));
        assert_eq!(ledger.cart(), before);
        assert_eq!(ledger.get_line(3).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_cart_tracks_lines_after_every_operation() {
        let mut ledger = ledger();

        ledger.add_item(&test_product(1, 10), 2).unwrap();
        ledger.add_item(&test_product(2, 5), 1).unwrap();
        ledger.set_quantity(2, 4).unwrap();
        ledger.remove_item(1);

        let cart = ledger.cart();
        assert_consistent(&cart);
        assert_eq!(cart.items().len(), 1);
        assert!(!ledger.contains(1));
        assert!(ledger.contains(2));
        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(ledger.get_line(2), cart.items().first());
    }

    #[test]
    fn test_clear_yields_zero_cart() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 2).unwrap();

        let cart = ledger.clear();

        assert_eq!(cart, Cart::empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_tax_stays_unrounded() {
        let mut ledger = ledger();
        let mut product = test_product(1, 0);
        product.price = "109.95".parse().unwrap();

        let cart = ledger.add_item(&product, 1).unwrap();

        assert_eq!(cart.tax(), "10.995".parse().unwrap());
        assert_eq!(cart.total(), "120.945".parse().unwrap());
        assert_consistent(&cart);
    }

    #[test]
    fn test_subscribers_see_every_consistent_snapshot() {
        let mut ledger = ledger();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = ledger.subscribe(move |cart: &Cart| {
            sink.lock().unwrap().push(cart.clone());
        });

        ledger.add_item(&test_product(1, 10), 2).unwrap();
        ledger.add_item(&test_product(2, 20), 1).unwrap();
        let _ = ledger.add_item(&test_product(3, 30), 0);
        ledger.remove_item(1);

        let seen = seen.lock().unwrap();
        // replayed empty cart + three accepted operations
        assert_eq!(seen.len(), 4);
        seen.iter().for_each(assert_consistent);
        assert_eq!(seen.last(), Some(&ledger.cart()));
    }

    #[test]
    fn test_late_subscriber_gets_current_state() {
        let mut ledger = ledger();
        ledger.add_item(&test_product(1, 10), 1).unwrap();
        ledger.add_item(&test_product(1, 10), 1).unwrap();
        ledger.add_item(&test_product(2, 20), 1).unwrap();

        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let _subscription = ledger.subscribe(move |cart: &Cart| {
            *sink.lock().unwrap() = Some(cart.total_items());
        });

        assert_eq!(*seen.lock().unwrap(), Some(3));
    }

    #[test]
    fn test_json_format() {
        let mut ledger = ledger();
        let cart = ledger.add_item(&test_product(1, 10), 2).unwrap();

        let value = serde_json::to_value(&cart).unwrap();

        assert_eq!(value["totalItems"], 2);
        assert_eq!(value["subtotal"], 20.0);
        assert_eq!(value["tax"], 2.0);
        assert_eq!(value["total"], 22.0);
        assert_eq!(value["items"][0]["quantity"], 2);
        assert_eq!(value["items"][0]["product"]["id"], 1);
        assert_eq!(value["items"][0]["product"]["rating"]["count"], 10);
    }

    #[test]
    fn test_restore_recomputes_totals() {
        let json = r#"{
            "items": [
                { "product": { "id": 1, "title": "A", "price": 10, "description": "",
                               "category": "x", "image": "", "rating": { "rate": 1, "count": 1 } },
                  "quantity": 2 },
                { "product": { "id": 2, "title": "B", "price": 5, "description": "",
                               "category": "x", "image": "", "rating": { "rate": 1, "count": 1 } },
                  "quantity": 0 },
                { "product": { "id": 1, "title": "A", "price": 10, "description": "",
                               "category": "x", "image": "", "rating": { "rate": 1, "count": 1 } },
                  "quantity": 1 }
            ],
            "totalItems": 999,
            "subtotal": 1,
            "tax": 1,
            "total": 1
        }"#;
        let saved: Cart = serde_json::from_str(json).unwrap();

        let ledger = CartLedger::restore(TaxRate::from_bps(1000), saved).unwrap();
        let cart = ledger.cart();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal(), Money::from_major(30));
        assert_eq!(cart.total(), Money::from_major(33));
    }

    #[test]
    fn test_restore_accepts_items_only_document() {
        let json = r#"{
            "items": [
                { "product": { "id": 4, "title": "D", "price": 12.5, "description": "",
                               "category": "x", "image": "", "rating": { "rate": 1, "count": 1 } },
                  "quantity": 2 }
            ]
        }"#;
        let saved: Cart = serde_json::from_str(json).unwrap();

        let ledger = CartLedger::restore(TaxRate::from_bps(1000), saved).unwrap();
        let cart = ledger.cart();

        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.subtotal(), Money::from_major(25));
        assert_eq!(cart.total(), Money::from_cents(2750));
    }

    #[test]
    fn test_restore_rejects_overflowing_totals() {
        let mut huge = test_product(1, 0);
        huge.price = Money::from_decimal(Decimal::MAX);
        let saved = Cart {
            items: vec![CartLine {
                product: huge,
                quantity: 3,
            }],
            ..Cart::default()
        };

        assert!(matches!(
            CartLedger::restore(TaxRate::default(), saved),
            Err(CoreError::AmountTooLarge)
        ));
    }

    #[test]
    fn test_restore_rejects_malformed_product() {
        let mut bad = test_product(1, 10);
        bad.price = Money::from_cents(-100);
        let saved = Cart::recalculate(
            vec![CartLine {
                product: bad,
                quantity: 1,
            }],
            TaxRate::zero(),
        )
        .unwrap();

        assert!(CartLedger::restore(TaxRate::default(), saved).is_err());
    }
}
