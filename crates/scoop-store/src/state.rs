//! # App State
//!
//! The single aggregate the storefront reads from and the persistence slot
//! holds, serialized as one camelCase JSON object.
//!
//! ## Decoding a Snapshot
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw slot text                                                          │
//! │       │                                                                 │
//! │       ├── not JSON / not an object ──────────────► AppState::default() │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per field:  present + decodes ──► keep                                 │
//! │              missing / bad     ──► field default (built-in lists,      │
//! │                                    empty cart, no orders)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repair:  duplicate product ids / coupon codes dropped (first wins)    │
//! │           zero-quantity cart lines dropped, repeats merged             │
//! │           applied coupon cleared unless its code is still offered      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An older or hand-edited snapshot therefore never prevents the shop from
//! opening; at worst the affected field starts over from its default.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use scoop_core::catalog::{default_coupons, default_products};
use scoop_core::{
    Cart, Coupon, Order, Product, Theme, ALL_CATEGORIES, KNOWN_CATEGORIES,
};

/// Key of the persisted snapshot in the key-value store.
pub const STATE_KEY: &str = "appState";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub theme: Theme,
    pub shop_open: bool,
    pub products: Vec<Product>,
    pub cart: Cart,
    /// Append-only order history, oldest first.
    pub orders: Vec<Order>,
    pub coupons: Vec<Coupon>,
    pub applied_coupon: Option<Coupon>,
    pub active_category: String,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            theme: Theme::default(),
            shop_open: true,
            products: default_products(),
            cart: Cart::new(),
            orders: Vec::new(),
            coupons: default_coupons(),
            applied_coupon: None,
            active_category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl AppState {
    pub fn product(&self, id: scoop_core::ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether `category` names something a shopper can filter by.
    pub fn is_known_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES
            || KNOWN_CATEGORIES.contains(&category)
            || self.products.iter().any(|p| p.category == category)
    }

    /// Re-establishes the aggregate's invariants after loading.
    fn repair(&mut self) {
        let mut seen = HashSet::new();
        let before = self.products.len();
        self.products.retain(|p| seen.insert(p.id));
        if self.products.len() != before {
            warn!(dropped = before - self.products.len(), "Dropped duplicate product ids");
        }

        let mut seen = HashSet::new();
        let before = self.coupons.len();
        self.coupons.retain(|c| seen.insert(c.code.clone()));
        if self.coupons.len() != before {
            warn!(dropped = before - self.coupons.len(), "Dropped duplicate coupon codes");
        }

        self.cart = Cart::from_items(self.cart.items().to_vec());

        if let Some(applied) = self.applied_coupon.take() {
            match self.coupons.iter().find(|c| c.code == applied.code) {
                Some(offered) => self.applied_coupon = Some(offered.clone()),
                None => warn!(code = %applied.code, "Cleared applied coupon that no longer exists"),
            }
        }

        if !self.is_known_category(&self.active_category) {
            self.active_category = ALL_CATEGORIES.to_string();
        }
    }
}

fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?.clone();
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(field = key, error = %e, "Ignoring undecodable snapshot field");
            None
        }
    }
}

/// Decodes a persisted snapshot, falling back to defaults wherever it is
/// missing or unusable. Never fails.
pub fn decode_with_defaults(raw: &str) -> AppState {
    let map = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Persisted state is not a JSON object, using defaults");
            return AppState::default();
        }
        Err(e) => {
            warn!(error = %e, "Persisted state is malformed, using defaults");
            return AppState::default();
        }
    };

    let defaults = AppState::default();
    let mut state = AppState {
        theme: field(&map, "theme").unwrap_or(defaults.theme),
        shop_open: field(&map, "shopOpen").unwrap_or(defaults.shop_open),
        products: field(&map, "products").unwrap_or(defaults.products),
        cart: field(&map, "cart").unwrap_or(defaults.cart),
        orders: field(&map, "orders").unwrap_or(defaults.orders),
        coupons: field(&map, "coupons").unwrap_or(defaults.coupons),
        applied_coupon: field(&map, "appliedCoupon").unwrap_or(defaults.applied_coupon),
        active_category: field(&map, "activeCategory").unwrap_or(defaults.active_category),
    };
    state.repair();

    debug!(
        products = state.products.len(),
        cart_lines = state.cart.item_count(),
        orders = state.orders.len(),
        "Decoded persisted state"
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoop_core::{CartItem, Discount, Money, ProductId, MAX_ITEM_QUANTITY};

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.theme, Theme::Dark);
        assert!(state.shop_open);
        assert_eq!(state.products.len(), 5);
        assert_eq!(state.coupons.len(), 2);
        assert!(state.cart.is_empty());
        assert!(state.applied_coupon.is_none());
        assert_eq!(state.active_category, "All");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "theme",
            "shopOpen",
            "products",
            "cart",
            "orders",
            "coupons",
            "appliedCoupon",
            "activeCategory",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_malformed_json_gives_defaults() {
        assert_eq!(decode_with_defaults("{not json"), AppState::default());
        assert_eq!(decode_with_defaults("[1, 2, 3]"), AppState::default());
        assert_eq!(decode_with_defaults(""), AppState::default());
    }

    #[test]
    fn test_fields_fall_back_independently() {
        let state = decode_with_defaults(r#"{"theme": "light", "shopOpen": "yes", "products": 7}"#);
        assert_eq!(state.theme, Theme::Light);
        assert!(state.shop_open);
        assert_eq!(state.products, default_products());
        assert_eq!(state.coupons, default_coupons());
    }

    #[test]
    fn test_round_trip() {
        let mut state = AppState::default();
        state.theme = Theme::Light;
        state.shop_open = false;
        state.cart.add_product(&state.products[0].clone()).unwrap();
        state.applied_coupon = Some(state.coupons[1].clone());
        state.active_category = "Cones".to_string();

        let raw = serde_json::to_string(&state).unwrap();
        assert_eq!(decode_with_defaults(&raw), state);
    }

    #[test]
    fn test_repairs_duplicates_and_zero_quantities() {
        let mut state = AppState::default();
        let first = state.products[0].clone();
        let mut twin = first.clone();
        twin.name = "Impostor".to_string();
        state.products.push(twin);
        state.coupons.push(state.coupons[0].clone());

        let mut raw = serde_json::to_value(&state).unwrap();
        raw["cart"] = serde_json::to_value(vec![
            CartItem {
                id: ProductId(1),
                name: "Chocolate Stick".to_string(),
                price: Money::from_rupees(30),
                quantity: 0,
            },
            CartItem {
                id: ProductId(2),
                name: "Vanilla Cone".to_string(),
                price: Money::from_rupees(40),
                quantity: 2,
            },
        ])
        .unwrap();

        let decoded = decode_with_defaults(&raw.to_string());
        assert_eq!(decoded.products.len(), 5);
        assert_eq!(decoded.products[0], first);
        assert_eq!(decoded.coupons.len(), 2);
        assert_eq!(decoded.cart.item_count(), 1);
        assert_eq!(decoded.cart.get(ProductId(2)).unwrap().quantity, 2);
    }

    #[test]
    fn test_clears_dangling_applied_coupon() {
        let raw = r#"{
            "coupons": [{"code": "SWEET10", "type": "percent", "value": 10}],
            "appliedCoupon": {"code": "GONE", "type": "flat", "value": 100}
        }"#;
        assert!(decode_with_defaults(raw).applied_coupon.is_none());
    }

    #[test]
    fn test_reads_storefront_snapshot_layout() {
        let raw = r#"{
            "theme": "light",
            "shopOpen": true,
            "products": [
                {"id": 1, "name": "Chocolate Stick", "price": 30, "category": "Sticks",
                 "image": "choco.png", "inStock": true, "rating": 4.8},
                {"id": 1700000000000, "name": "Mango Kulfi", "price": 45.5, "category": "Kulfi",
                 "image": "", "inStock": false, "rating": 0}
            ],
            "cart": [{"id": 1, "name": "Chocolate Stick", "price": 30, "qty": 2}],
            "orders": [{"id": 1700000000001,
                        "items": [{"id": 1, "name": "Chocolate Stick", "price": 30, "qty": 1}],
                        "total": 80, "time": "2024-01-01T10:00:00Z"}],
            "coupons": [
                {"code": "SWEET10", "type": "percent", "value": 10},
                {"code": "BIG75", "type": "flat", "value": 75}
            ],
            "appliedCoupon": {"code": "BIG75", "type": "flat", "value": 75},
            "activeCategory": "Kulfi"
        }"#;

        let state = decode_with_defaults(raw);
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.products[0].price, Money::from_rupees(30));
        assert_eq!(state.products[1].price, Money::from_paise(4550));
        assert_eq!(state.cart.get(ProductId(1)).unwrap().quantity, 2);
        assert_eq!(state.cart.subtotal(), Money::from_rupees(60));
        assert_eq!(state.orders[0].total, Money::from_rupees(80));
        assert_eq!(state.coupons.len(), 2);
        assert_eq!(
            state.applied_coupon.as_ref().map(|c| c.discount),
            Some(Discount::Flat(Money::from_rupees(75)))
        );
        assert_eq!(state.active_category, "Kulfi");

        let written = serde_json::to_value(&state).unwrap();
        assert_eq!(written["products"][0]["price"], 30);
        assert_eq!(written["cart"][0]["qty"], 2);
        assert_eq!(
            written["coupons"][1],
            serde_json::json!({"code": "BIG75", "type": "flat", "value": 75})
        );
    }

    #[test]
    fn test_caps_oversized_cart_quantity() {
        let raw = r#"{"cart": [{"id": 1, "name": "Chocolate Stick", "price": 30, "qty": 4294967295}]}"#;
        let state = decode_with_defaults(raw);
        assert_eq!(state.cart.get(ProductId(1)).unwrap().quantity, MAX_ITEM_QUANTITY);
        assert_eq!(state.cart.total_quantity(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_unknown_category_resets_to_all() {
        let state = decode_with_defaults(r#"{"activeCategory": "Sorbets"}"#);
        assert_eq!(state.active_category, ALL_CATEGORIES);

        let state = decode_with_defaults(r#"{"activeCategory": "Family"}"#);
        assert_eq!(state.active_category, "Family");
    }
}
