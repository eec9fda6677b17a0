//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │          │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       place_order        │
//! │                   update_cart_item                  (checkout.rs)      │
//! │                   remove_from_cart                       │              │
//! │                        │                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every accepted mutation is saved under the `cart` key. A failed save is
//! reported in `warnings`; the mutation still stands.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commands::product::get_product;
use crate::error::ApiError;
use crate::state::{AppState, ConfigState};
use storefront_core::{Cart, ProductId};

/// Totals rendered with the configured currency symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDisplay {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    /// e.g. "10%"
    pub tax_rate: String,
}

/// Cart response including items, totals, and their display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: Cart,
    pub display: CartDisplay,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl CartResponse {
    pub(crate) fn new(config: &ConfigState, cart: Cart, warnings: Vec<String>) -> Self {
        let display = CartDisplay {
            subtotal: config.format_currency(cart.subtotal()),
            tax: config.format_currency(cart.tax()),
            total: config.format_currency(cart.total()),
            tax_rate: config.tax_rate().to_string(),
        };
        CartResponse {
            cart,
            display,
            warnings,
        }
    }
}

/// Saves `cart`, turning a failure into a warning.
pub(crate) async fn persist_cart(state: &AppState, cart: &Cart) -> Vec<String> {
    match state.db.inner().carts().save(cart).await {
        Ok(()) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to save cart");
            vec![format!("Cart not saved: {}", e)]
        }
    }
}

/// Gets the current cart contents.
pub async fn get_cart(state: &AppState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::new(&state.config, state.cart.snapshot(), Vec::new())
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: appended as a new line
/// - The product (and its price) is captured as fetched now
///
/// ## Errors
/// - `NOT_FOUND` if the product doesn't exist
/// - `VALIDATION_ERROR` for quantity 0 or a quantity that would overflow
pub async fn add_to_cart(
    state: &AppState,
    product_id: ProductId,
    quantity: Option<u32>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id, quantity, "add_to_cart command");

    let product = get_product(state, product_id).await?;
    let cart = state
        .cart
        .with_cart_mut(|ledger| ledger.add_item(&product, quantity))?;

    let warnings = persist_cart(state, &cart).await;
    Ok(CartResponse::new(&state.config, cart, warnings))
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity 0 or negative: removes the line
/// - Product not in cart: nothing changes
///
/// ## Errors
/// - `VALIDATION_ERROR` if the quantity doesn't fit a line
pub async fn update_cart_item(
    state: &AppState,
    product_id: ProductId,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, quantity, "update_cart_item command");

    let cart = state
        .cart
        .with_cart_mut(|ledger| ledger.set_quantity(product_id, quantity))?;

    let warnings = persist_cart(state, &cart).await;
    Ok(CartResponse::new(&state.config, cart, warnings))
}

/// Removes a line. Removing an absent product is a no-op.
pub async fn remove_from_cart(state: &AppState, product_id: ProductId) -> CartResponse {
    debug!(product_id, "remove_from_cart command");

    let cart = state
        .cart
        .with_cart_mut(|ledger| ledger.remove_item(product_id));

    let warnings = persist_cart(state, &cart).await;
    CartResponse::new(&state.config, cart, warnings)
}

/// Clears all items from the cart.
pub async fn clear_cart(state: &AppState) -> CartResponse {
    debug!("clear_cart command");

    let cart = state.cart.with_cart_mut(|ledger| ledger.clear());

    let warnings = persist_cart(state, &cart).await;
    CartResponse::new(&state.config, cart, warnings)
}
