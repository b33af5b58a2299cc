//! # State Store
//!
//! Owns the [`AppState`] and mirrors it into a [`KeyValueStore`] slot after
//! every mutation.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Lifecycle                                    │
//! │                                                                         │
//! │  Store::new(storage)        state = defaults, ready = false            │
//! │        │                    (mutations apply in memory, never written) │
//! │        ▼                                                                │
//! │  initialize()               slot → decode_with_defaults → state        │
//! │        │                    ready = true, nothing written yet          │
//! │        ▼                                                                │
//! │  mutation ──► state change ──► persist() ──► slot                      │
//! │        │                       (failure: logged, change kept)          │
//! │        ▼                                                                │
//! │  reset_all()                slot removed, initialize() again           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Every mutation validates first and changes state second. A rejected
//! mutation returns an error and leaves both the state and the slot exactly
//! as they were.
//!
//! Derived figures (subtotal, discount, delivery, total) are never stored;
//! [`Store::pricing`] recomputes them from the current cart.

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use scoop_core::coupon::find_coupon;
use scoop_core::order::{compose_message, compose_order};
use scoop_core::validation::{validate_discount, validate_price, validate_product_name, validate_rating};
use scoop_core::{
    CoreError, Coupon, CouponCode, DeliveryPolicy, Order, OrderId, PriceBreakdown, Product,
    ProductId, Theme, ALL_CATEGORIES,
};

use crate::error::StoreResult;
use crate::link::OrderLink;
use crate::state::{decode_with_defaults, AppState, STATE_KEY};
use crate::storage::KeyValueStore;

pub struct Store<S: KeyValueStore> {
    storage: S,
    state: AppState,
    ready: bool,
}

impl<S: KeyValueStore> Store<S> {
    /// Creates a store holding defaults. Call [`Store::initialize`] before
    /// serving any commands.
    pub fn new(storage: S) -> Self {
        Store {
            storage,
            state: AppState::default(),
            ready: false,
        }
    }

    // =========================================================================
    // Lifecycle & Persistence
    // =========================================================================

    /// Loads the persisted snapshot, or defaults when there is none or it
    /// cannot be read. Never writes.
    pub fn initialize(&mut self) {
        self.state = match self.storage.get(STATE_KEY) {
            Ok(Some(raw)) => decode_with_defaults(&raw),
            Ok(None) => {
                debug!("No persisted state, starting from defaults");
                AppState::default()
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted state, starting from defaults");
                AppState::default()
            }
        };
        self.ready = true;

        info!(
            products = self.state.products.len(),
            orders = self.state.orders.len(),
            shop_open = self.state.shop_open,
            "Store initialized"
        );
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Serializes the whole state into the slot.
    pub fn persist(&mut self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.state)?;
        self.storage.set(STATE_KEY, &raw)
    }

    /// Persists after a mutation. Skipped until initialized; failures are
    /// logged and the in-memory change stands.
    fn commit(&mut self) {
        if !self.ready {
            debug!("Store not initialized, skipping persist");
            return;
        }
        if let Err(e) = self.persist() {
            error!(error = %e, "Failed to persist state");
        }
    }

    // =========================================================================
    // Shopper Mutations
    // =========================================================================

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        self.commit();
        self.state.theme
    }

    /// Adds one of a product to the cart.
    ///
    /// ## Errors
    /// - [`CoreError::ShopClosed`] when the shop is closed (checked first)
    /// - [`CoreError::ProductNotFound`] for an unknown id
    /// - [`CoreError::OutOfStock`] when the product is out of stock
    /// - cart limit errors from [`scoop_core::Cart::add_product`]
    pub fn add_to_cart(&mut self, id: ProductId) -> StoreResult<()> {
        if !self.state.shop_open {
            return Err(CoreError::ShopClosed.into());
        }
        let product = self
            .state
            .product(id)
            .ok_or(CoreError::ProductNotFound(id))?;
        if !product.in_stock {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            }
            .into());
        }
        let product = product.clone();

        self.state.cart.add_product(&product)?;
        debug!(product_id = %id, quantity = self.state.cart.total_quantity(), "Added to cart");
        self.commit();
        Ok(())
    }

    /// Changes a cart line by `delta`; at zero or below the line goes away.
    /// Returns whether the cart changed.
    pub fn update_cart_qty(&mut self, id: ProductId, delta: i64) -> StoreResult<bool> {
        let changed = self.state.cart.update_quantity(id, delta)?;
        if changed {
            debug!(product_id = %id, delta, "Cart quantity updated");
            self.commit();
        }
        Ok(changed)
    }

    /// Empties the cart and drops the applied coupon with it.
    pub fn clear_cart(&mut self) {
        self.state.cart.clear();
        self.state.applied_coupon = None;
        debug!("Cart cleared");
        self.commit();
    }

    /// Sets or clears the applied coupon.
    ///
    /// A coupon that is not (or no longer) offered is rejected with
    /// [`CoreError::CouponNotFound`].
    pub fn apply_coupon(&mut self, coupon: Option<Coupon>) -> StoreResult<()> {
        let applied = match coupon {
            Some(coupon) => Some(
                self.state
                    .coupons
                    .iter()
                    .find(|c| c.code == coupon.code)
                    .cloned()
                    .ok_or_else(|| CoreError::CouponNotFound(coupon.code.to_string()))?,
            ),
            None => None,
        };

        match &applied {
            Some(c) => info!(code = %c.code, "Coupon applied"),
            None => debug!("Coupon removed"),
        }
        self.state.applied_coupon = applied;
        self.commit();
        Ok(())
    }

    /// Applies a code typed by the shopper (case-insensitive).
    ///
    /// An unknown code yields [`CoreError::InvalidCoupon`] and changes
    /// nothing, including any coupon already applied.
    pub fn apply_coupon_code(&mut self, input: &str) -> StoreResult<Coupon> {
        let coupon = find_coupon(&self.state.coupons, input)
            .cloned()
            .ok_or_else(|| CoreError::InvalidCoupon(input.trim().to_string()))?;
        self.apply_coupon(Some(coupon.clone()))?;
        Ok(coupon)
    }

    /// Selects the category filter. Blank input, or a label no product or
    /// filter chip carries, selects all categories.
    pub fn set_active_category(&mut self, category: &str) {
        let category = category.trim();
        self.state.active_category = if category.is_empty() {
            ALL_CATEGORIES.to_string()
        } else if !self.state.is_known_category(category) {
            warn!(category, "Unknown category, showing all");
            ALL_CATEGORIES.to_string()
        } else {
            category.to_string()
        };
        self.commit();
    }

    // =========================================================================
    // Admin Mutations
    // =========================================================================

    /// Adds a fully-formed product. See [`crate::admin`] for the form path.
    pub fn add_product(&mut self, product: Product) -> StoreResult<()> {
        if self.state.product(product.id).is_some() {
            return Err(CoreError::DuplicateProduct(product.id).into());
        }
        validate_product_name(&product.name)?;
        validate_price(product.price)?;
        validate_rating(product.rating)?;

        info!(product_id = %product.id, name = %product.name, price = %product.price, "Product added");
        self.state.products.push(product);
        self.commit();
        Ok(())
    }

    /// Removes a product from the menu. Cart lines and past orders keep
    /// their snapshots.
    pub fn delete_product(&mut self, id: ProductId) -> StoreResult<Product> {
        let index = self
            .state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;

        let removed = self.state.products.remove(index);
        if !self.state.is_known_category(&self.state.active_category) {
            debug!(category = %removed.category, "Last product of the active category deleted");
            self.state.active_category = ALL_CATEGORIES.to_string();
        }
        info!(product_id = %id, name = %removed.name, "Product deleted");
        self.commit();
        Ok(removed)
    }

    /// Flips a product's stock flag and returns the new value.
    pub fn toggle_product_stock(&mut self, id: ProductId) -> StoreResult<bool> {
        let product = self
            .state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;

        product.in_stock = !product.in_stock;
        let in_stock = product.in_stock;
        info!(product_id = %id, in_stock, "Product stock toggled");
        self.commit();
        Ok(in_stock)
    }

    pub fn add_coupon(&mut self, coupon: Coupon) -> StoreResult<()> {
        if self.state.coupons.iter().any(|c| c.code == coupon.code) {
            return Err(CoreError::DuplicateCoupon(coupon.code.to_string()).into());
        }
        validate_discount(&coupon.discount)?;

        info!(code = %coupon.code, discount = %coupon.discount, "Coupon added");
        self.state.coupons.push(coupon);
        self.commit();
        Ok(())
    }

    /// Deletes a coupon. If it is the applied coupon, the cart loses it too.
    pub fn delete_coupon(&mut self, code: &str) -> StoreResult<Coupon> {
        let code = CouponCode::parse(code).map_err(|_| CoreError::CouponNotFound(code.to_string()))?;
        let index = self
            .state
            .coupons
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| CoreError::CouponNotFound(code.to_string()))?;

        let removed = self.state.coupons.remove(index);
        if self
            .state
            .applied_coupon
            .as_ref()
            .is_some_and(|applied| applied.code == removed.code)
        {
            self.state.applied_coupon = None;
            debug!(code = %removed.code, "Cleared applied coupon");
        }
        info!(code = %removed.code, "Coupon deleted");
        self.commit();
        Ok(removed)
    }

    /// Appends to the order history.
    pub fn add_order(&mut self, order: Order) {
        info!(order_id = %order.id, total = %order.total, "Order recorded");
        self.state.orders.push(order);
        self.commit();
    }

    /// Flips the shop-open gate and returns the new value.
    pub fn toggle_shop_open(&mut self) -> bool {
        self.state.shop_open = !self.state.shop_open;
        info!(shop_open = self.state.shop_open, "Shop status changed");
        self.commit();
        self.state.shop_open
    }

    /// Forgets everything: the slot is removed and the store starts over
    /// from the built-in defaults.
    pub fn reset_all(&mut self) {
        if let Err(e) = self.storage.remove(STATE_KEY) {
            error!(error = %e, "Failed to remove persisted state");
        }
        warn!("All data reset to defaults");
        self.initialize();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn pricing(&self, policy: &DeliveryPolicy) -> PriceBreakdown {
        PriceBreakdown::compute(
            &self.state.cart,
            self.state.applied_coupon.as_ref(),
            policy,
        )
    }

    /// Products in the active category whose name contains `search`.
    pub fn filtered_products(&self, search: &str) -> Vec<&Product> {
        self.state
            .products
            .iter()
            .filter(|p| p.matches(&self.state.active_category, search))
            .collect()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Places the current cart as an order.
    pub fn checkout(
        &mut self,
        shop_name: &str,
        policy: &DeliveryPolicy,
        link: &mut dyn OrderLink,
    ) -> StoreResult<Order> {
        self.checkout_at(shop_name, policy, link, Local::now())
    }

    /// [`Store::checkout`] with an explicit clock.
    ///
    /// ## Steps
    /// 1. Closed shop → [`CoreError::ShopClosed`]; empty cart →
    ///    [`CoreError::EmptyCart`]. Nothing changes, no link opens.
    /// 2. Price the cart and compose the order and its message.
    /// 3. Open the link. If that fails, nothing is recorded.
    /// 4. Record the order, then clear the cart and the coupon.
    pub fn checkout_at(
        &mut self,
        shop_name: &str,
        policy: &DeliveryPolicy,
        link: &mut dyn OrderLink,
        now: DateTime<Local>,
    ) -> StoreResult<Order> {
        if !self.state.shop_open {
            warn!("Checkout attempted while shop is closed");
            return Err(CoreError::ShopClosed.into());
        }
        if self.state.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let pricing = self.pricing(policy);
        let last = self.state.orders.iter().map(|o| o.id).max();
        let id = OrderId::next(now.timestamp_millis(), last);
        let order = compose_order(id, &self.state.cart, &pricing, now.naive_local());
        let message = compose_message(shop_name, &self.state.cart, &pricing);

        link.open(&message).inspect_err(|e| {
            error!(order_id = %id, error = %e, "Order link failed, order not recorded");
        })?;

        info!(
            order_id = %order.id,
            items = order.total_quantity(),
            total = %order.total,
            "Order placed"
        );
        self.state.orders.push(order.clone());
        self.state.cart.clear();
        self.state.applied_coupon = None;
        self.commit();
        Ok(order)
    }
}

impl<S: KeyValueStore> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("ready", &self.ready)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
