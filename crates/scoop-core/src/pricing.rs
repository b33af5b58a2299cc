//! # Pricing Engine
//!
//! Derives subtotal, discount, delivery and total from a cart and an
//! optional coupon.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart ──► compute_subtotal ──► subtotal ─┬─► compute_discount(coupon)   │
//! │                                          │         │                    │
//! │                                          ├─► compute_delivery(policy)   │
//! │                                          │         │                    │
//! │                                          ▼         ▼                    │
//! │                         compute_total = subtotal − discount + delivery  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Delivery is decided on the *pre-discount* subtotal. Nothing here is
//! clamped: a flat coupon bigger than subtotal + delivery yields a negative
//! total, and callers see exactly that.
//!
//! Results are never stored on the state aggregate; every view and every
//! checkout recomputes them from the current cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::coupon::Coupon;
use crate::money::Money;
use crate::{DELIVERY_CHARGE, FREE_DELIVERY_ABOVE};

// =============================================================================
// Delivery Policy
// =============================================================================

/// Flat delivery fee, waived at or above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPolicy {
    pub flat_fee: Money,
    pub free_above: Money,
}

impl DeliveryPolicy {
    pub fn new(flat_fee: Money, free_above: Money) -> Self {
        DeliveryPolicy {
            flat_fee,
            free_above,
        }
    }

    pub fn fee_for(&self, subtotal: Money) -> Money {
        compute_delivery(subtotal, self.free_above, self.flat_fee)
    }
}

impl Default for DeliveryPolicy {
    /// ₹50 delivery, free from ₹500.
    fn default() -> Self {
        DeliveryPolicy::new(DELIVERY_CHARGE, FREE_DELIVERY_ABOVE)
    }
}

// =============================================================================
// Pure Functions
// =============================================================================

/// Σ price × quantity over the cart.
pub fn compute_subtotal(cart: &Cart) -> Money {
    cart.subtotal()
}

/// Discount granted by `coupon` on `subtotal`; zero without a coupon.
pub fn compute_discount(subtotal: Money, coupon: Option<&Coupon>) -> Money {
    coupon
        .map(|c| c.discount.amount_for(subtotal))
        .unwrap_or_default()
}

/// Free when `subtotal >= threshold`, otherwise `flat_fee`.
pub fn compute_delivery(subtotal: Money, threshold: Money, flat_fee: Money) -> Money {
    if subtotal >= threshold {
        Money::zero()
    } else {
        flat_fee
    }
}

/// subtotal − discount + delivery, unclamped.
pub fn compute_total(subtotal: Money, discount: Money, delivery: Money) -> Money {
    subtotal - discount + delivery
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// All four derived amounts for one cart at one moment.
///
/// ## Usage
/// ```rust
/// use scoop_core::cart::Cart;
/// use scoop_core::pricing::{DeliveryPolicy, PriceBreakdown};
///
/// let pricing = PriceBreakdown::compute(&Cart::new(), None, &DeliveryPolicy::default());
/// assert_eq!(pricing.delivery.to_string(), "₹50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub discount: Money,
    pub delivery: Money,
    pub total: Money,
}

impl PriceBreakdown {
    pub fn compute(cart: &Cart, coupon: Option<&Coupon>, policy: &DeliveryPolicy) -> Self {
        let subtotal = compute_subtotal(cart);
        let discount = compute_discount(subtotal, coupon);
        let delivery = policy.fee_for(subtotal);
        PriceBreakdown {
            subtotal,
            discount,
            delivery,
            total: compute_total(subtotal, discount, delivery),
        }
    }

    pub fn has_free_delivery(&self) -> bool {
        self.delivery.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
