//! # Checkout
//!
//! Turns a cart snapshot into a placed [`Order`].
//!
//! ```text
//! Cart ──► Order::place(cart, address, payment, user)
//!            ├── cart empty?          → CoreError::EmptyCart
//!            ├── address invalid?     → CoreError::Validation
//!            └── snapshot lines + totals, status = Pending
//! ```
//!
//! Card details never reach this module: only the [`PaymentMethod`] kind is
//! recorded.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_shipping_address;

// =============================================================================
// Shipping Address
// =============================================================================

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    /// `12345` or `12345-6789`.
    pub zip_code: String,
    pub country: String,
    /// 10 digits, no separators.
    pub phone: String,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    Stripe,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Stripe => "stripe",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "credit_card" | "card" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::Paypal),
            "stripe" => Ok(PaymentMethod::Stripe),
            other => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: format!("unknown payment method '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order. New orders start as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ValidationError::InvalidFormat {
                field: "order status".to_string(),
                reason: format!("unknown status '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
/// Uses snapshot pattern: lines and totals are frozen at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    #[ts(as = "String")]
    pub id: Uuid,
    /// Signed-in user, if any. Guest checkout leaves this empty.
    pub user_id: Option<String>,
    pub items: Vec<CartLine>,
    pub total_items: u64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Places an order for everything in `cart`.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] if the cart has no lines
    /// - [`CoreError::Validation`] if the address fails validation
    pub fn place(
        cart: &Cart,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
        user_id: Option<String>,
    ) -> CoreResult<Order> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        validate_shipping_address(&shipping_address)?;

        Ok(Order {
            id: Uuid::new_v4(),
            user_id,
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
            shipping_address,
            payment_method,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }
}
