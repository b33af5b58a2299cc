//! # Cart
//!
//! The shopper's cart: one line per product, each with a quantity of at
//! least one.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Operation                 Cart Change         │
//! │  ──────────────           ─────────                 ───────────         │
//! │                                                                         │
//! │  "Add to Cart" ─────────► add_product() ──────────► qty + 1 or new line│
//! │                                                                         │
//! │  "+" / "−" buttons ─────► update_quantity(±1) ────► qty + delta        │
//! │                                                     (≤ 0 removes line) │
//! │                                                                         │
//! │  Checkout / reset ──────► clear() ────────────────► items.clear()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id
//! - Every line has quantity ≥ 1; a line that would drop to 0 is removed
//! - At most [`MAX_CART_ITEMS`] lines, at most [`MAX_ITEM_QUANTITY`] per line

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product, ProductId};
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart. Serializes as a bare array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from persisted lines, restoring the invariants: lines
    /// with quantity 0 are dropped, quantities are capped at
    /// [`MAX_ITEM_QUANTITY`] and repeated product ids are merged.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();
        for mut item in items {
            if item.quantity == 0 {
                continue;
            }
            item.quantity = item.quantity.min(MAX_ITEM_QUANTITY);
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(MAX_ITEM_QUANTITY);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Adds one of `product` to the cart.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1 (the original price snapshot stays)
    /// - Not in cart: new line with quantity 1, name and price snapshotted
    ///
    /// Stock and shop-open checks belong to the caller; the cart only knows
    /// about its own limits.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            let new_qty = item.quantity.saturating_add(1);
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: i64::from(new_qty),
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        })?;

        self.items.push(CartItem::from_product(product));
        Ok(())
    }

    /// Adds `delta` to a line's quantity.
    ///
    /// ## Behavior
    /// - Resulting quantity ≤ 0: the line is removed
    /// - Product not in cart: no-op
    /// - Resulting quantity above the maximum: rejected, no change
    ///
    /// ## Returns
    /// `Ok(true)` when the cart changed, `Ok(false)` for the no-op case.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> CoreResult<bool> {
        let Some(index) = self.items.iter().position(|i| i.id == id) else {
            return Ok(false);
        };

        let current = i64::from(self.items[index].quantity);
        let new_qty = current.saturating_add(delta);

        if new_qty <= 0 {
            self.items.remove(index);
            return Ok(true);
        }

        validate_quantity(new_qty).map_err(|_| CoreError::QuantityTooLarge {
            requested: new_qty,
            max: MAX_ITEM_QUANTITY,
        })?;

        // new_qty is within 1..=MAX_ITEM_QUANTITY here
        self.items[index].quantity = new_qty as u32;
        Ok(delta != 0)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total scoops across all lines (the cart badge).
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Σ price × quantity.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }
}
