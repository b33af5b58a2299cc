//! # Domain Types
//!
//! Core domain types used throughout Scoop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ProductId) │──►│  id (= product) │──►│  id (OrderId)   │       │
//! │  │  name, price    │   │  name snapshot  │   │  items snapshot │       │
//! │  │  category       │   │  price snapshot │   │  total          │       │
//! │  │  in_stock       │   │  quantity ≥ 1   │   │  time           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   Percentage    │   │     Theme       │                             │
//! │  │  bps (u32)      │   │  Dark | Light   │                             │
//! │  │  1000 = 10%     │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartItem` copies the product's name and price when it is added, and an
//! `Order` copies the cart items at checkout. Editing or deleting a product
//! afterwards never rewrites what is already in a cart or in order history.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Sentinel category label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Categories the storefront offers as filter chips.
pub const KNOWN_CATEGORIES: [&str; 3] = ["Sticks", "Cones", "Family"];

// =============================================================================
// Percentage
// =============================================================================

/// Percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. A "12.5% off" coupon is 1250 bps, exactly, with no
/// float left over to drift.
///
/// On the wire it is plain percentage points (`10`, `12.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "Number", into = "Number")]
#[ts(export)]
pub struct Percentage(#[ts(type = "number")] u32);

impl Percentage {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from whole percentage points.
    #[inline]
    pub const fn from_points(points: u32) -> Self {
        Percentage(points * 100)
    }

    /// Creates a percentage from a decimal percentage (e.g. `12.5`).
    ///
    /// Returns `None` for negative or non-finite input.
    pub fn from_percentage(pct: f64) -> Option<Self> {
        if !pct.is_finite() || pct < 0.0 {
            return None;
        }
        let bps = (pct * 100.0).round();
        if bps > u32::MAX as f64 {
            return None;
        }
        Some(Percentage(bps as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percentage())
        }
    }
}

impl From<Percentage> for Number {
    fn from(rate: Percentage) -> Self {
        if rate.0 % 100 == 0 {
            return Number::from(rate.0 / 100);
        }
        Number::from_f64(rate.percentage()).unwrap_or_else(|| Number::from(rate.0 / 100))
    }
}

impl TryFrom<Number> for Percentage {
    type Error = ValidationError;

    fn try_from(number: Number) -> Result<Self, Self::Error> {
        number
            .as_f64()
            .and_then(Percentage::from_percentage)
            .ok_or_else(|| ValidationError::invalid_format("value", "out of range"))
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Product identity. Unique within the catalogue.
///
/// Admin-added products get time-derived ids (milliseconds since the epoch);
/// the built-in catalogue uses 1..=5.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(pub i64);

impl ProductId {
    /// Next time-derived id: `now_millis`, or one past the largest id in use
    /// when the clock has not moved past it.
    pub fn next<'a>(now_millis: i64, existing: impl IntoIterator<Item = &'a ProductId>) -> Self {
        let floor = existing
            .into_iter()
            .map(|id| id.0.saturating_add(1))
            .max()
            .unwrap_or(i64::MIN);
        ProductId(now_millis.max(floor))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order identity: time-derived, strictly increasing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct OrderId(pub i64);

impl OrderId {
    /// Next order id after `last` for a checkout happening at `now_millis`.
    ///
    /// ```rust
    /// use scoop_core::types::OrderId;
    ///
    /// assert_eq!(OrderId::next(1_000, None), OrderId(1_000));
    /// // Two checkouts in the same millisecond still get distinct ids
    /// assert_eq!(OrderId::next(1_000, Some(OrderId(1_000))), OrderId(1_001));
    /// ```
    pub fn next(now_millis: i64, last: Option<OrderId>) -> Self {
        match last {
            Some(last) if last.0 >= now_millis => OrderId(last.0.saturating_add(1)),
            _ => OrderId(now_millis),
        }
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// An ice cream on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name shown on the menu card and in the order message.
    pub name: String,

    /// Current price. Non-negative.
    pub price: Money,

    /// Free-form category label ("Sticks", "Cones", "Family", ...).
    pub category: String,

    /// Opaque image reference (URL).
    pub image: String,

    /// Admin-controlled availability toggle.
    pub in_stock: bool,

    /// Star rating, 0-5.
    pub rating: f32,
}

impl Product {
    /// Whether a shopper may add this product right now.
    ///
    /// The shop-open gate wins over stock: a closed shop sells nothing.
    pub fn is_purchasable(&self, shop_open: bool) -> bool {
        shop_open && self.in_stock
    }

    /// Menu filter: category chip plus case-insensitive name search.
    ///
    /// ```rust
    /// use scoop_core::catalog::default_products;
    ///
    /// let vanilla = &default_products()[1];
    /// assert!(vanilla.matches("All", "van"));
    /// assert!(vanilla.matches("Cones", ""));
    /// assert!(!vanilla.matches("Sticks", "van"));
    /// ```
    pub fn matches(&self, category: &str, search: &str) -> bool {
        let in_category = category == ALL_CATEGORIES || self.category == category;
        in_category
            && self
                .name
                .to_lowercase()
                .contains(&search.trim().to_lowercase())
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart, keyed by product id.
///
/// `name` and `price` are frozen when the product is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: u32,
}

impl CartItem {
    /// Snapshots a product into a new cart line of quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted order. Append-only history; never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: OrderId,

    /// Cart lines as they were at checkout.
    pub items: Vec<CartItem>,

    /// Total charged, after discount and delivery.
    pub total: Money,

    /// Human-readable local timestamp, e.g. `"16/10/2026, 14:05:09"`.
    pub time: String,
}

impl Order {
    /// Number of scoops (total quantity) in the order.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }
}

// =============================================================================
// Theme
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(category: &str, in_stock: bool) -> Product {
        Product {
            id: ProductId(1),
            name: "Chocolate Stick".to_string(),
            price: Money::from_rupees(30),
            category: category.to_string(),
            image: String::new(),
            in_stock,
            rating: 4.8,
        }
    }

    #[test]
    fn test_percentage_from_percentage() {
        assert_eq!(Percentage::from_percentage(12.5), Some(Percentage::from_bps(1250)));
        assert_eq!(Percentage::from_percentage(-1.0), None);
        assert_eq!(Percentage::from_points(10).bps(), 1000);
        assert!((Percentage::from_bps(825).percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_percentage_wire_format_is_points() {
        assert_eq!(serde_json::to_string(&Percentage::from_points(10)).unwrap(), "10");
        assert_eq!(serde_json::to_string(&Percentage::from_bps(1250)).unwrap(), "12.5");

        let rate: Percentage = serde_json::from_str("12.5").unwrap();
        assert_eq!(rate, Percentage::from_bps(1250));
        assert!(serde_json::from_str::<Percentage>("-5").is_err());
    }

    #[test]
    fn test_cart_item_reads_qty_key() {
        let item: CartItem =
            serde_json::from_str(r#"{"id": 2, "name": "Vanilla Cone", "price": 40, "qty": 3}"#)
                .unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price, Money::from_rupees(40));
        assert_eq!(serde_json::to_value(&item).unwrap()["qty"], 3);
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::from_points(10).to_string(), "10%");
        assert_eq!(Percentage::from_bps(1250).to_string(), "12.5%");
    }

    #[test]
    fn test_product_id_next_is_unique() {
        let existing = [ProductId(1), ProductId(5_000)];
        assert_eq!(ProductId::next(10_000, &existing), ProductId(10_000));
        assert_eq!(ProductId::next(4_000, &existing), ProductId(5_001));
        assert_eq!(ProductId::next(4_000, &[]), ProductId(4_000));
    }

    #[test]
    fn test_order_id_next_strictly_increases() {
        let first = OrderId::next(500, None);
        let second = OrderId::next(500, Some(first));
        let third = OrderId::next(400, Some(second));
        assert!(first < second && second < third);
    }

    #[test]
    fn test_purchasable_requires_open_shop_and_stock() {
        assert!(product("Sticks", true).is_purchasable(true));
        assert!(!product("Sticks", true).is_purchasable(false));
        assert!(!product("Sticks", false).is_purchasable(true));
    }

    #[test]
    fn test_matches_category_and_search() {
        let p = product("Sticks", true);
        assert!(p.matches(ALL_CATEGORIES, ""));
        assert!(p.matches("Sticks", "CHOC"));
        assert!(!p.matches("Cones", ""));
        assert!(!p.matches(ALL_CATEGORIES, "vanilla"));
    }

    #[test]
    fn test_cart_item_snapshot_and_line_total() {
        let p = product("Sticks", true);
        let mut item = CartItem::from_product(&p);
        item.quantity = 3;
        assert_eq!(item.name, "Chocolate Stick");
        assert_eq!(item.line_total(), Money::from_rupees(90));
    }

    #[test]
    fn test_theme_toggle_and_wire_format() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }
}
