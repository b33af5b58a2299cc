//! # Shop Configuration
//!
//! Stores the shop's settings, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SCOOP_*`) for where the shop runs: name,
//!    order number, data directory, load delay
//! 2. Defaults (this file)
//!
//! Prices, delivery rules and the admin password are fixed; they come from
//! the `scoop_core` constants and are not read from the environment.
//! Configuration is read-only after startup.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use scoop_core::{DeliveryPolicy, Money, DELIVERY_CHARGE, FREE_DELIVERY_ABOVE, MIN_ORDER};

/// Variables that look like settings but are not read.
const FIXED_SETTINGS: [&str; 4] = [
    "SCOOP_ADMIN_PASSWORD",
    "SCOOP_MIN_ORDER",
    "SCOOP_DELIVERY_CHARGE",
    "SCOOP_FREE_DELIVERY_ABOVE",
];

/// Shop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// Shop name (shown in the header and the order message)
    pub shop_name: String,

    /// WhatsApp number orders are sent to, digits only with country code
    pub whatsapp_number: String,

    /// Back-office password
    pub admin_password: String,

    /// Smallest order the shop would like to take. Shown as a hint only;
    /// checkout does not enforce it.
    pub min_order: Money,

    /// Delivery fee charged below `free_delivery_above`
    pub delivery_charge: Money,

    /// Subtotal from which delivery is free
    pub free_delivery_above: Money,

    /// Overrides the platform app data directory
    pub data_dir: Option<PathBuf>,

    /// Pause before the storefront is shown
    pub load_delay: Duration,

    /// How long an "Invalid coupon code" message stays up
    pub coupon_error_ttl: Duration,

    /// How long a toast stays up
    pub toast_ttl: Duration,
}

impl Default for ShopConfig {
    /// ## Default Values
    /// - Shop: "Murlidhar Icecream", WhatsApp 918218377572
    /// - Minimum order ₹200, delivery ₹50, free from ₹500
    /// - 800 ms load delay, 2 s coupon message, 3 s toasts
    fn default() -> Self {
        ShopConfig {
            shop_name: "Murlidhar Icecream".to_string(),
            whatsapp_number: "918218377572".to_string(),
            admin_password: "admin123".to_string(),
            min_order: MIN_ORDER,
            delivery_charge: DELIVERY_CHARGE,
            free_delivery_above: FREE_DELIVERY_ABOVE,
            data_dir: None,
            load_delay: Duration::from_millis(800),
            coupon_error_ttl: Duration::from_millis(2000),
            toast_ttl: Duration::from_millis(3000),
        }
    }
}

impl ShopConfig {
    /// Creates a ShopConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SCOOP_SHOP_NAME`: Override shop name
    /// - `SCOOP_WHATSAPP_NUMBER`: Override the order number
    /// - `SCOOP_DATA_DIR`: Use this directory for the persisted state
    /// - `SCOOP_LOAD_DELAY_MS`: Startup delay in milliseconds
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ShopConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ShopConfig::default();

        if let Some(name) = lookup("SCOOP_SHOP_NAME") {
            config.shop_name = name;
        }

        if let Some(number) = lookup("SCOOP_WHATSAPP_NUMBER") {
            config.whatsapp_number = number;
        }

        for key in FIXED_SETTINGS {
            if lookup(key).is_some() {
                warn!(key, "Ignoring environment override of a fixed setting");
            }
        }

        if let Some(dir) = lookup("SCOOP_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(ms) = lookup("SCOOP_LOAD_DELAY_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => config.load_delay = Duration::from_millis(ms),
                Err(_) => warn!(value = %ms, "Ignoring unparseable SCOOP_LOAD_DELAY_MS"),
            }
        }

        debug!(shop = %config.shop_name, "Shop configuration loaded");
        config
    }

    pub fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy::new(self.delivery_charge, self.free_delivery_above)
    }

    /// Whether `subtotal` is under the advisory minimum order.
    pub fn is_below_minimum(&self, subtotal: Money) -> bool {
        subtotal < self.min_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.shop_name, "Murlidhar Icecream");
        assert_eq!(config.whatsapp_number, "918218377572");
        assert_eq!(config.delivery_policy(), DeliveryPolicy::default());
        assert_eq!(config.load_delay, Duration::from_millis(800));
        assert_eq!(config.coupon_error_ttl, Duration::from_secs(2));
    }

    #[test]
    fn test_env_overrides() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("SCOOP_SHOP_NAME", "Kwality Corner"),
            ("SCOOP_WHATSAPP_NUMBER", "919800000000"),
            ("SCOOP_DATA_DIR", "/tmp/scoop"),
            ("SCOOP_LOAD_DELAY_MS", "0"),
        ]));

        assert_eq!(config.shop_name, "Kwality Corner");
        assert_eq!(config.whatsapp_number, "919800000000");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/scoop")));
        assert_eq!(config.load_delay, Duration::ZERO);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = ShopConfig::from_lookup(lookup(&[("SCOOP_LOAD_DELAY_MS", "-5")]));
        assert_eq!(config.load_delay, Duration::from_millis(800));
    }

    #[test]
    fn test_prices_and_password_are_not_overridable() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("SCOOP_ADMIN_PASSWORD", "letmein"),
            ("SCOOP_MIN_ORDER", "1"),
            ("SCOOP_DELIVERY_CHARGE", "0"),
            ("SCOOP_FREE_DELIVERY_ABOVE", "1"),
        ]));
        assert_eq!(config.admin_password, "admin123");
        assert_eq!(config.min_order, MIN_ORDER);
        assert_eq!(config.delivery_charge, DELIVERY_CHARGE);
        assert_eq!(config.free_delivery_above, FREE_DELIVERY_ABOVE);
        assert_eq!(config.delivery_policy(), DeliveryPolicy::default());
    }

    #[test]
    fn test_minimum_order_hint() {
        let config = ShopConfig::default();
        assert!(config.is_below_minimum(Money::from_rupees(199)));
        assert!(!config.is_below_minimum(Money::from_rupees(200)));
    }
}
