//! # Storefront Commands Module
//!
//! Everything the storefront UI (or the `scoop` shell) can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Menu listing, category filter, theme
//! ├── cart.rs      ◄─── Cart manipulation, coupons
//! ├── checkout.rs  ◄─── Place order via WhatsApp
//! └── admin.rs     ◄─── Back-office (login required)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  fn add_to_cart(                                                        │
//! │      app: &mut Storefront<S>,   ◄── store, config, session, notices    │
//! │      id: ProductId,             ◄── from the UI                        │
//! │      now: DateTime<Utc>,        ◄── stamps the notice it raises        │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ├── Ok  → response for the UI  + success toast                 │
//! │         └── Err → ApiError for the UI  + error toast                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command raises the notice the shopper sees, so the UI only renders
//! `Notices`; it never builds messages itself.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use scoop_store::MemoryStorage;

    use crate::config::ShopConfig;
    use crate::Storefront;

    pub fn storefront() -> Storefront<MemoryStorage> {
        let mut app = Storefront::new(ShopConfig::default(), MemoryStorage::new());
        app.store.initialize();
        app
    }

    pub fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_760_000_000_000 + ms).unwrap()
    }
}
