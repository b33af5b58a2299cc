//! # Checkout Command
//!
//! Sends the cart to the shop as a WhatsApp message.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout()                                                             │
//! │     │                                                                   │
//! │     ├── shop closed? ──► "Shop is closed" toast, nothing else happens  │
//! │     ├── cart empty?  ──► "Cart is empty" toast                          │
//! │     │                                                                   │
//! │     ├── price cart, compose order + message                            │
//! │     ├── open wa.me link with the message                               │
//! │     ├── record order, clear cart + coupon                              │
//! │     └── "Redirecting to WhatsApp..." toast                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use scoop_core::Order;
use scoop_store::{KeyValueStore, OrderLink};

use crate::error::ApiError;
use crate::notify::Notice;
use crate::Storefront;

/// Places the current cart as an order through `link`.
pub fn checkout<S: KeyValueStore>(
    app: &mut Storefront<S>,
    link: &mut dyn OrderLink,
    now: DateTime<Utc>,
) -> Result<Order, ApiError> {
    debug!("checkout command");

    let policy = app.config.delivery_policy();
    let result = app.store.checkout_at(
        &app.config.shop_name,
        &policy,
        link,
        now.with_timezone(&Local),
    );

    match result {
        Ok(order) => {
            app.notices.clear_coupon();
            app.toast(Notice::success("Redirecting to WhatsApp...", now));
            Ok(order)
        }
        Err(e) => Err(app.fail(e.into(), now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, apply_coupon};
    use crate::commands::test_support::{at, storefront};
    use crate::error::ErrorCode;
    use crate::whatsapp::WhatsAppLink;
    use scoop_core::{Money, ProductId};

    #[test]
    fn test_checkout_opens_whatsapp_and_records_order() {
        let mut app = storefront();
        add_to_cart(&mut app, ProductId(1), at(0)).unwrap();
        add_to_cart(&mut app, ProductId(1), at(0)).unwrap();
        add_to_cart(&mut app, ProductId(2), at(0)).unwrap();
        apply_coupon(&mut app, "SWEET10", at(0)).unwrap();

        let mut urls = Vec::new();
        let mut link = WhatsAppLink::new(app.config.whatsapp_number.clone(), |url: &str| {
            urls.push(url.to_string());
            Ok(())
        });
        let order = checkout(&mut app, &mut link, at(1_000)).unwrap();
        drop(link);

        assert_eq!(order.total, Money::from_rupees(140));
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("https://wa.me/918218377572?text=%2ANew%20Order%20from%20Murlidhar%20Icecream%2A"));
        assert!(app.store.state().cart.is_empty());
        assert_eq!(app.store.state().orders.len(), 1);
        assert_eq!(
            app.notices.current_toast(at(1_000)).unwrap().message,
            "Redirecting to WhatsApp..."
        );
    }

    #[test]
    fn test_checkout_while_closed() {
        let mut app = storefront();
        add_to_cart(&mut app, ProductId(1), at(0)).unwrap();
        app.store.toggle_shop_open();

        let mut opened = 0;
        let mut link = WhatsAppLink::new("1", |_: &str| {
            opened += 1;
            Ok(())
        });
        let err = checkout(&mut app, &mut link, at(0)).unwrap_err();
        drop(link);

        assert_eq!(err.code, ErrorCode::ShopClosed);
        assert_eq!(opened, 0);
        assert!(app.store.state().orders.is_empty());
        assert_eq!(app.store.state().cart.total_quantity(), 1);
        assert_eq!(app.notices.current_toast(at(0)).unwrap().message, "Shop is closed");
    }
}
