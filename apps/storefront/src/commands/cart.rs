//! # Cart Commands
//!
//! Cart manipulation and coupons.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Coupon  │────►│ Checkout │       │
//! │  │  Cart    │     │          │     │ applied  │     │ WhatsApp │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart       apply_coupon     checkout.rs       │
//! │                   update_cart_qty   remove_coupon                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use scoop_core::{CartItem, Coupon, PriceBreakdown, ProductId};
use scoop_store::KeyValueStore;

use crate::error::ApiError;
use crate::notify::Notice;
use crate::Storefront;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: PriceBreakdown,
    /// Badge count: total scoops in the cart.
    pub item_count: u32,
    pub applied_coupon: Option<Coupon>,
    /// Subtotal is under the shop's minimum order (advisory).
    pub below_minimum: bool,
}

impl CartResponse {
    pub fn build<S: KeyValueStore>(app: &Storefront<S>) -> Self {
        let state = app.store.state();
        let totals = app.store.pricing(&app.config.delivery_policy());
        CartResponse {
            items: state.cart.items().to_vec(),
            totals,
            item_count: state.cart.total_quantity(),
            applied_coupon: state.applied_coupon.clone(),
            below_minimum: !state.cart.is_empty() && app.config.is_below_minimum(totals.subtotal),
        }
    }
}

/// Gets the current cart contents and totals.
pub fn get_cart<S: KeyValueStore>(app: &Storefront<S>) -> CartResponse {
    debug!("get_cart command");
    CartResponse::build(app)
}

/// Adds one of a product to the cart.
///
/// Raises "{name} added!" on success, or the reason on failure
/// ("Shop is closed", "Mango Cone is out of stock").
pub fn add_to_cart<S: KeyValueStore>(
    app: &mut Storefront<S>,
    id: ProductId,
    now: DateTime<Utc>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, "add_to_cart command");

    match app.store.add_to_cart(id) {
        Ok(()) => {
            let name = app
                .store
                .state()
                .cart
                .get(id)
                .map(|item| item.name.clone())
                .unwrap_or_default();
            app.toast(Notice::success(format!("{} added!", name), now));
            Ok(CartResponse::build(app))
        }
        Err(e) => Err(app.fail(e.into(), now)),
    }
}

/// Changes a line's quantity by `delta` (the "+" / "−" buttons).
pub fn update_cart_qty<S: KeyValueStore>(
    app: &mut Storefront<S>,
    id: ProductId,
    delta: i64,
    now: DateTime<Utc>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, delta, "update_cart_qty command");

    app.store
        .update_cart_qty(id, delta)
        .map_err(|e| app.fail(e.into(), now))?;
    Ok(CartResponse::build(app))
}

/// Empties the cart (and drops the coupon).
pub fn clear_cart<S: KeyValueStore>(app: &mut Storefront<S>) -> CartResponse {
    debug!("clear_cart command");
    app.store.clear_cart();
    app.notices.clear_coupon();
    CartResponse::build(app)
}

/// Applies a coupon code typed into the cart.
///
/// ## Coupon Box Message
/// - Success: `Coupon "SWEET10" applied!` (stays up)
/// - Failure: `Invalid coupon code` (disappears after the configured TTL)
pub fn apply_coupon<S: KeyValueStore>(
    app: &mut Storefront<S>,
    code: &str,
    now: DateTime<Utc>,
) -> Result<CartResponse, ApiError> {
    debug!(code, "apply_coupon command");

    match app.store.apply_coupon_code(code) {
        Ok(coupon) => {
            app.notices
                .coupon(Notice::success(format!("Coupon \"{}\" applied!", coupon.code), now));
            Ok(CartResponse::build(app))
        }
        Err(e) => {
            let err = ApiError::from(e);
            app.notices.coupon(
                Notice::error(err.message.clone(), now).with_ttl(app.config.coupon_error_ttl),
            );
            Err(err)
        }
    }
}

/// Removes the applied coupon.
pub fn remove_coupon<S: KeyValueStore>(app: &mut Storefront<S>) -> Result<CartResponse, ApiError> {
    debug!("remove_coupon command");
    app.store.apply_coupon(None)?;
    app.notices.clear_coupon();
    Ok(CartResponse::build(app))
}
