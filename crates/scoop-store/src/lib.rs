//! # scoop-store: State Store for the Scoop Storefront
//!
//! Holds the storefront's single state aggregate, applies every shopper and
//! admin mutation to it, and mirrors it into one persistent key-value slot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scoop Data Flow                                  │
//! │                                                                         │
//! │  Storefront command (add_to_cart, checkout, admin_add_product, ...)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   scoop-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Store      │    │   AppState    │    │   Storage    │   │   │
//! │  │   │  (store.rs)   │    │  (state.rs)   │    │ (storage.rs) │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ mutations     │───►│ products,cart │───►│ "appState"   │   │   │
//! │  │   │ checkout      │    │ coupons,orders│    │ memory/file  │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │          │                                                      │   │
//! │  │          ▼ OrderLink (link.rs)                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  scoop-core: pricing, order message, validation                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store`: lifecycle, mutations, checkout
//! - [`admin`] - Admin form inputs and validated adds
//! - [`state`] - `AppState` and lenient snapshot decoding
//! - [`storage`] - Key-value slot trait, memory and file backends
//! - [`link`] - Outbound order link capability
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use scoop_core::{DeliveryPolicy, ProductId};
//! use scoop_store::{MemoryStorage, Store};
//!
//! let mut store = Store::new(MemoryStorage::new());
//! store.initialize();
//!
//! store.add_to_cart(ProductId(1)).unwrap();
//! let pricing = store.pricing(&DeliveryPolicy::default());
//! assert_eq!(pricing.total.to_string(), "₹80");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod error;
pub mod link;
pub mod state;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use admin::{NewCoupon, NewProduct};
pub use error::{StoreError, StoreResult};
pub use link::OrderLink;
pub use state::{decode_with_defaults, AppState, STATE_KEY};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::Store;
