//! # Order Composer
//!
//! Turns the cart at checkout into two things:
//!
//! 1. An [`Order`] record for the admin's order history
//! 2. The plain-text message the shopper sends to the shop on WhatsApp
//!
//! ## Order Message Layout
//! ```text
//! *New Order from Murlidhar Icecream* 🍦
//!
//! *Items:*
//! • Chocolate Stick x 2 = ₹60
//! • Vanilla Cone x 1 = ₹40
//!
//! *Total: ₹140*
//! Delivery: ₹50
//!
//! Please confirm my order.
//! ```
//!
//! Both functions are deterministic: same cart, same pricing, same
//! timestamp, same output.

use chrono::NaiveDateTime;
use std::fmt::Write as _;

use crate::cart::Cart;
use crate::money::Money;
use crate::pricing::PriceBreakdown;
use crate::types::{Order, OrderId};

/// Timestamp format stored on orders (day/month/year, 24h clock).
pub const ORDER_TIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Builds the order record.
///
/// The items are cloned out of the cart, so clearing or editing the cart
/// afterwards leaves the order untouched.
pub fn compose_order(
    id: OrderId,
    cart: &Cart,
    pricing: &PriceBreakdown,
    placed_at: NaiveDateTime,
) -> Order {
    Order {
        id,
        items: cart.items().to_vec(),
        total: pricing.total,
        time: placed_at.format(ORDER_TIME_FORMAT).to_string(),
    }
}

/// Builds the order message handed to the messaging link.
/// Message amounts put the sign after the rupee symbol: `₹-50`.
fn message_amount(amount: Money) -> String {
    format!("₹{}", amount.round_to_rupees())
}

pub fn compose_message(shop_name: &str, cart: &Cart, pricing: &PriceBreakdown) -> String {
    let mut text = format!("*New Order from {}* 🍦\n\n", shop_name);
    text.push_str("*Items:*\n");
    for item in cart.items() {
        // writing into a String cannot fail
        let _ = writeln!(
            text,
            "• {} x {} = {}",
            item.name,
            item.quantity,
            message_amount(item.line_total())
        );
    }
    let _ = writeln!(text, "\n*Total: {}*", message_amount(pricing.total));
    let _ = writeln!(text, "Delivery: {}", message_amount(pricing.delivery));
    text.push_str("\nPlease confirm my order.");
    text
}
