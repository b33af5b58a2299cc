//! # scoop-core: Pure Business Logic for the Scoop Storefront
//!
//! This crate holds everything the ice-cream storefront *computes*: cart
//! math, coupon discounts, delivery fees, order snapshots and the order
//! message text. It never touches storage, the network or the clock on its
//! own; callers hand in the current time when one is needed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scoop Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web storefront (external)                    │   │
//! │  │    Menu ──► Cart modal ──► Coupon ──► Checkout ──► WhatsApp     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    scoop-store (State Store)                    │   │
//! │  │    AppState, persistence slot, mutations, checkout              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ scoop-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  money  │ │  cart   │ │ coupon  │ │ pricing │ │  order   │ │   │
//! │  │   │  Money  │ │  Cart   │ │ Coupon  │ │Breakdown│ │ compose  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise arithmetic
//! - [`types`] - Domain types (Product, CartItem, Order, Theme, ...)
//! - [`coupon`] - Coupon codes and discount rules
//! - [`cart`] - The shopping cart and its quantity rules
//! - [`pricing`] - Subtotal, discount, delivery and total
//! - [`order`] - Order snapshots and the order message text
//! - [`catalog`] - Built-in products and coupons
//! - [`validation`] - Admin form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use scoop_core::cart::Cart;
//! use scoop_core::catalog::{default_coupons, default_products};
//! use scoop_core::pricing::{DeliveryPolicy, PriceBreakdown};
//!
//! let products = default_products();
//! let coupons = default_coupons();
//!
//! let mut cart = Cart::new();
//! cart.add_product(&products[0]).unwrap(); // Chocolate Stick ₹30
//! cart.add_product(&products[0]).unwrap();
//! cart.add_product(&products[1]).unwrap(); // Vanilla Cone ₹40
//!
//! let pricing = PriceBreakdown::compute(&cart, coupons.first(), &DeliveryPolicy::default());
//! assert_eq!(pricing.total.to_string(), "₹140");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use coupon::{Coupon, CouponCode, CouponRecord, Discount, DiscountKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{DeliveryPolicy, PriceBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in the cart.
///
/// ## Business Reason
/// Prevents a runaway "+" button from producing a 10,000-cone order.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Largest amount an admin form accepts, for a product price or a flat
/// coupon value.
pub const MAX_AMOUNT: Money = Money::from_rupees(100_000);

/// Flat delivery charge applied below the free-delivery threshold.
pub const DELIVERY_CHARGE: Money = Money::from_rupees(50);

/// Subtotal at or above which delivery is free.
pub const FREE_DELIVERY_ABOVE: Money = Money::from_rupees(500);

/// Minimum order amount.
///
/// Advisory only: checkout is never blocked by it. The storefront shows a
/// hint when the cart subtotal is below this value.
pub const MIN_ORDER: Money = Money::from_rupees(200);
