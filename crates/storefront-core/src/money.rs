//! # Money Module
//!
//! Provides the `Money` and `TaxRate` types for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Catalog prices arrive as decimals (109.95, 22.3, 7.95).               │
//! │  Summing them as f64 and taxing the sum compounds the error            │
//! │  every time the cart changes.                                          │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals                                           │
//! │    109.95 × 3 = 329.85 exactly, tax 10% = 32.985 exactly               │
//! │    Rounded to 32.99 ONLY when shown to a person                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price: Money = "109.95".parse().unwrap();
//! let line = price * 3u32;                     // 329.85
//! let total = line + Money::from_cents(500);   // 334.85
//! assert_eq!(total.to_string(), "$334.85");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

/// Fraction digits shown for currency amounts.
const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal, not f64**: sums and tax are exact; no drift across mutations
/// - **Unrounded internally**: `10% of 109.95` stays `10.995`
/// - **Rounded at presentation**: [`Money::rounded`] and `Display`
/// - **JSON number on the wire**: the persisted cart stores `"price": 109.95`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──┬──► CartLine.line_total() ──► Cart.subtotal          │
/// │                  │                                   │                  │
/// │                  │                                   ▼                  │
/// │                  │                     calculate_tax ──► Cart.tax       │
/// │                  │                                   │                  │
/// │                  │                                   ▼                  │
/// │                  └──► "$109.95" in output       Cart.total              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DISPLAY_DECIMALS))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Calculates tax on this amount. The result is exact, NOT rounded.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::{Money, TaxRate};
    ///
    /// let subtotal: Money = "109.95".parse().unwrap();
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1000));
    ///
    /// assert_eq!(tax, "10.995".parse().unwrap());
    /// assert_eq!(tax.rounded(), "11.00".parse().unwrap());
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.fraction())
    }

    /// [`Money::calculate_tax`], or `None` if the result doesn't fit.
    pub fn checked_tax(&self, rate: TaxRate) -> Option<Money> {
        self.0.checked_mul(rate.fraction()).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies by a line quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(250).checked_mul(4), Some(Money::from_major(10)));
    /// assert_eq!(Money::from_decimal(Decimal::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub fn checked_mul(self, qty: u32) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Rounds to cents for display (midpoint away from zero).
    ///
    /// ## Note
    /// Never feed a rounded value back into cart arithmetic. Totals are
    /// recomputed from the exact line amounts.
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Formats the rounded amount with an arbitrary currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("€"), "-€5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let mut display = self.rounded().0.abs();
        display.rescale(DISPLAY_DECIMALS);
        let sign = if self.rounded().is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, symbol, display)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money rounded to cents with a dollar sign.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Serialized as a plain JSON number (`109.95`), matching the catalog API.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

/// Parsed through the number's shortest decimal text, so `109.95` stays exact.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Mul<u64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the storefront's default rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage string such as `"10"` or `"8.25"`.
    ///
    /// Returns `None` for negative values or more than two decimal places.
    pub fn from_percentage(pct: &str) -> Option<Self> {
        let pct = Decimal::from_str(pct.trim()).ok()?;
        let bps = (pct * Decimal::ONE_HUNDRED).normalize();
        if bps.is_sign_negative() || bps.scale() != 0 {
            return None;
        }
        bps.to_u32().map(TaxRate)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (1000 bps → 0.1).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (Decimal::from(self.0) / Decimal::ONE_HUNDRED).normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
