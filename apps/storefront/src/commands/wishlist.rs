//! # Wishlist Commands
//!
//! Products saved for later, persisted under the `wishlist` key. Saves only
//! happen when the list actually changed.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commands::cart::{persist_cart, CartResponse};
use crate::commands::product::get_product;
use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::{Product, ProductId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<Product>,
    pub count: usize,
    /// Whether the command changed the wishlist.
    pub changed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl WishlistResponse {
    fn new(items: Vec<Product>, changed: bool, warnings: Vec<String>) -> Self {
        WishlistResponse {
            count: items.len(),
            items,
            changed,
            warnings,
        }
    }
}

/// Result of moving a wishlist item into the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToCartResponse {
    pub cart: CartResponse,
    pub wishlist: WishlistResponse,
}

async fn persist_wishlist(state: &AppState, items: &[Product]) -> Vec<String> {
    match state.db.inner().wishlists().save(items).await {
        Ok(()) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "Failed to save wishlist");
            vec![format!("Wishlist not saved: {}", e)]
        }
    }
}

pub async fn get_wishlist(state: &AppState) -> WishlistResponse {
    debug!("get_wishlist command");
    WishlistResponse::new(state.wishlist.items(), false, Vec::new())
}

/// Saves a product for later. Adding a saved product again changes nothing.
///
/// ## Errors
/// - `NOT_FOUND` if the product doesn't exist
pub async fn add_to_wishlist(
    state: &AppState,
    product_id: ProductId,
) -> Result<WishlistResponse, ApiError> {
    debug!(product_id, "add_to_wishlist command");

    if state.wishlist.with_wishlist(|w| w.contains(product_id)) {
        return Ok(WishlistResponse::new(state.wishlist.items(), false, Vec::new()));
    }

    let product = get_product(state, product_id).await?;
    let (changed, items) = state.wishlist.with_wishlist_mut(|w| {
        let changed = w.add(&product)?;
        Ok::<_, ApiError>((changed, w.items().to_vec()))
    })?;

    let warnings = if changed {
        persist_wishlist(state, &items).await
    } else {
        Vec::new()
    };
    Ok(WishlistResponse::new(items, changed, warnings))
}

/// Removes a saved product. Absent ids are a no-op.
pub async fn remove_from_wishlist(state: &AppState, product_id: ProductId) -> WishlistResponse {
    debug!(product_id, "remove_from_wishlist command");

    let (changed, items) = state.wishlist.with_wishlist_mut(|w| {
        let removed = w.remove(product_id).is_some();
        (removed, w.items().to_vec())
    });

    let warnings = if changed {
        persist_wishlist(state, &items).await
    } else {
        Vec::new()
    };
    WishlistResponse::new(items, changed, warnings)
}

pub async fn clear_wishlist(state: &AppState) -> WishlistResponse {
    debug!("clear_wishlist command");

    let changed = state.wishlist.with_wishlist_mut(|w| {
        let had_items = !w.is_empty();
        w.clear();
        had_items
    });

    let warnings = persist_wishlist(state, &[]).await;
    WishlistResponse::new(Vec::new(), changed, warnings)
}

/// Moves a saved product into the cart and off the wishlist.
///
/// The saved product (with the price it had when saved) is what lands in
/// the cart. If the cart rejects it, the wishlist is left untouched.
///
/// ## Errors
/// - `NOT_FOUND` if the product isn't on the wishlist
/// - `VALIDATION_ERROR` if the cart rejects the quantity
pub async fn move_to_cart(
    state: &AppState,
    product_id: ProductId,
    quantity: Option<u32>,
) -> Result<MoveToCartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id, quantity, "move_to_cart command");

    let product = state
        .wishlist
        .with_wishlist(|w| w.get(product_id).cloned())
        .ok_or_else(|| ApiError::not_found("Wishlist item", product_id))?;

    let cart = state
        .cart
        .with_cart_mut(|ledger| ledger.add_item(&product, quantity))?;
    let items = state.wishlist.with_wishlist_mut(|w| {
        w.remove(product_id);
        w.items().to_vec()
    });

    let cart_warnings = persist_cart(state, &cart).await;
    let wishlist_warnings = persist_wishlist(state, &items).await;

    Ok(MoveToCartResponse {
        cart: CartResponse::new(&state.config, cart, cart_warnings),
        wishlist: WishlistResponse::new(items, true, wishlist_warnings),
    })
}
