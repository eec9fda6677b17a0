//! # Checkout Commands
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(address, payment)                                          │
//! │       │                                                                 │
//! │       ├── Order::place(cart snapshot)   empty cart / bad address ──► ✗  │
//! │       ├── db.orders().insert()          failure ──► ✗ (cart kept)       │
//! │       ├── cart.clear()                                                  │
//! │       └── db.carts().save()             failure ──► warning             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! No payment is processed; the method is only recorded.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::cart::persist_cart;
use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::{Order, PaymentMethod, ShippingAddress};

const DEFAULT_ORDER_LIMIT: u32 = 20;
const MAX_ORDER_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order: Order,
    /// `order.total` with the configured currency symbol.
    pub formatted_total: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Places an order for the current cart and empties it.
///
/// ## Errors
/// - `CART_ERROR` if the cart is empty
/// - `VALIDATION_ERROR` if the shipping address is incomplete
/// - `DATABASE_ERROR` if the order can't be stored; the cart is untouched
pub async fn place_order(
    state: &AppState,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
) -> Result<PlaceOrderResponse, ApiError> {
    debug!(%payment_method, "place_order command");

    let cart = state.cart.snapshot();
    let order = Order::place(
        &cart,
        shipping_address,
        payment_method,
        state.session.current_user(),
    )?;

    state.db.inner().orders().insert(&order).await?;

    let cleared = state.cart.with_cart_mut(|ledger| ledger.clear());
    let warnings = persist_cart(state, &cleared).await;

    info!(
        order_id = %order.id,
        items = order.total_items,
        total = %order.total,
        "Order placed"
    );

    Ok(PlaceOrderResponse {
        formatted_total: state.config.format_currency(order.total),
        order,
        warnings,
    })
}

/// Lists orders, newest first: the signed-in user's, or all recent ones for
/// a guest session.
pub async fn list_orders(state: &AppState, limit: Option<u32>) -> Result<Vec<Order>, ApiError> {
    let limit = limit.unwrap_or(DEFAULT_ORDER_LIMIT).clamp(1, MAX_ORDER_LIMIT);
    debug!(limit, "list_orders command");

    let orders = state.db.inner().orders();
    let result = match state.session.current_user() {
        Some(user_id) => orders.list_for_user(&user_id, limit).await?,
        None => orders.list_recent(limit).await?,
    };

    Ok(result)
}
