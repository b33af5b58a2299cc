//! # Admin Commands
//!
//! The back-office: menu, coupons, orders and shop settings. Every command
//! except `admin_login` requires an active admin session.
//!
//! ## Back-Office Tabs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  📋 Menu       admin_add_product, admin_delete_product,                 │
//! │                admin_toggle_stock                                       │
//! │  📦 Orders     admin_list_orders (newest first)                         │
//! │  🎟️ Coupons    admin_add_coupon, admin_delete_coupon                    │
//! │  ⚙️ Settings   admin_toggle_shop, admin_reset                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use scoop_core::{Coupon, Order, Product, ProductId};
use scoop_store::{KeyValueStore, NewCoupon, NewProduct};

use crate::error::{ApiError, ErrorCode};
use crate::notify::Notice;
use crate::Storefront;

fn require_admin<S: KeyValueStore>(app: &Storefront<S>) -> Result<(), ApiError> {
    if app.session.is_admin() {
        Ok(())
    } else {
        warn!("Admin command rejected without session");
        Err(ApiError::unauthorized())
    }
}

/// Opens the back-office. Raises "Welcome Admin!" or "Incorrect password".
pub fn admin_login<S: KeyValueStore>(
    app: &mut Storefront<S>,
    password: &str,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    debug!("admin_login command");

    if app.session.login(password) {
        app.toast(Notice::success("Welcome Admin!", now));
        Ok(())
    } else {
        Err(app.fail(
            ApiError::new(ErrorCode::Unauthorized, "Incorrect password"),
            now,
        ))
    }
}

pub fn admin_logout<S: KeyValueStore>(app: &mut Storefront<S>) {
    debug!("admin_logout command");
    app.session.logout();
}

/// Adds a product from the add-product form.
pub fn admin_add_product<S: KeyValueStore>(
    app: &mut Storefront<S>,
    form: &NewProduct,
    now: DateTime<Utc>,
) -> Result<Product, ApiError> {
    debug!(name = %form.name, "admin_add_product command");
    require_admin(app)?;

    match app.store.add_product_from_form(form, now.timestamp_millis()) {
        Ok(product) => {
            app.toast(Notice::success("Product added", now));
            Ok(product)
        }
        Err(e) => Err(app.fail(e.into(), now)),
    }
}

pub fn admin_delete_product<S: KeyValueStore>(
    app: &mut Storefront<S>,
    id: ProductId,
    now: DateTime<Utc>,
) -> Result<Product, ApiError> {
    debug!(product_id = %id, "admin_delete_product command");
    require_admin(app)?;

    app.store
        .delete_product(id)
        .map_err(|e| app.fail(e.into(), now))
}

/// Returns the product's new stock flag.
pub fn admin_toggle_stock<S: KeyValueStore>(
    app: &mut Storefront<S>,
    id: ProductId,
    now: DateTime<Utc>,
) -> Result<bool, ApiError> {
    debug!(product_id = %id, "admin_toggle_stock command");
    require_admin(app)?;

    app.store
        .toggle_product_stock(id)
        .map_err(|e| app.fail(e.into(), now))
}

/// Adds a coupon from the add-coupon form.
pub fn admin_add_coupon<S: KeyValueStore>(
    app: &mut Storefront<S>,
    form: &NewCoupon,
    now: DateTime<Utc>,
) -> Result<Coupon, ApiError> {
    debug!(code = %form.code, "admin_add_coupon command");
    require_admin(app)?;

    match app.store.add_coupon_from_form(form) {
        Ok(coupon) => {
            app.toast(Notice::success("Coupon added", now));
            Ok(coupon)
        }
        Err(e) => Err(app.fail(e.into(), now)),
    }
}

pub fn admin_delete_coupon<S: KeyValueStore>(
    app: &mut Storefront<S>,
    code: &str,
    now: DateTime<Utc>,
) -> Result<Coupon, ApiError> {
    debug!(code, "admin_delete_coupon command");
    require_admin(app)?;

    app.store
        .delete_coupon(code)
        .map_err(|e| app.fail(e.into(), now))
}

/// Order history, newest first.
pub fn admin_list_orders<S: KeyValueStore>(app: &Storefront<S>) -> Result<Vec<Order>, ApiError> {
    debug!("admin_list_orders command");
    require_admin(app)?;

    Ok(app.store.state().orders.iter().rev().cloned().collect())
}

/// Opens or closes the shop. Returns the new state.
pub fn admin_toggle_shop<S: KeyValueStore>(app: &mut Storefront<S>) -> Result<bool, ApiError> {
    debug!("admin_toggle_shop command");
    require_admin(app)?;

    Ok(app.store.toggle_shop_open())
}

/// Wipes all data back to the built-in defaults. The admin is logged out,
/// as after a fresh start.
pub fn admin_reset<S: KeyValueStore>(app: &mut Storefront<S>) -> Result<(), ApiError> {
    debug!("admin_reset command");
    require_admin(app)?;

    app.store.reset_all();
    app.session.logout();
    Ok(())
}
