//! # Scoop Storefront Library
//!
//! Core library for the Scoop storefront app: configuration, logging,
//! notices, the admin gate and the command layer the UI talks to.
//!
//! ## Module Organization
//! ```text
//! scoop_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront context, startup)
//! ├── config.rs       ◄─── ShopConfig (defaults + SCOOP_* env)
//! ├── notify.rs       ◄─── Toasts and the coupon box message
//! ├── session.rs      ◄─── Admin password gate
//! ├── whatsapp.rs     ◄─── wa.me order link
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Menu, categories, theme
//! │   ├── cart.rs     ◄─── Cart and coupons
//! │   ├── checkout.rs ◄─── Place order
//! │   └── admin.rs    ◄─── Back-office
//! ├── shell.rs        ◄─── Line-oriented front end for the `scoop` binary
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging      tracing-subscriber, RUST_LOG or default    │
//! │  2. Load ShopConfig         defaults, then SCOOP_* overrides           │
//! │  3. Open Storage            SCOOP_DATA_DIR or the platform data dir:   │
//! │                               Linux:   ~/.local/share/storefront       │
//! │                               macOS:   ~/Library/Application Support/  │
//! │                                        com.scoop.storefront            │
//! │                               Windows: %APPDATA%\scoop\storefront      │
//! │  4. Loading pause           config.load_delay ("Loading Flavors...")   │
//! │  5. Initialize Store        persisted snapshot or defaults             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod shell;
pub mod whatsapp;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scoop_store::{FileStorage, KeyValueStore, Store, StoreError};

use config::ShopConfig;
use error::ApiError;
use notify::{Notice, Notices};
use session::AdminSession;

/// Everything a command can touch.
pub struct Storefront<S: KeyValueStore> {
    pub store: Store<S>,
    pub config: ShopConfig,
    pub session: AdminSession,
    pub notices: Notices,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Wraps `storage` in a store that is not yet initialized.
    pub fn new(config: ShopConfig, storage: S) -> Self {
        Storefront {
            store: Store::new(storage),
            session: AdminSession::new(config.admin_password.clone()),
            config,
            notices: Notices::new(),
        }
    }

    /// Shows a toast for the configured time.
    pub fn toast(&mut self, notice: Notice) {
        self.notices.toast(notice.with_ttl(self.config.toast_ttl));
    }

    /// Shows `err` as an error toast and hands it back.
    pub fn fail(&mut self, err: ApiError, now: DateTime<Utc>) -> ApiError {
        self.toast(Notice::error(err.message.clone(), now));
        err
    }
}

#[derive(Debug, Error)]
pub enum BootError {
    #[error("Could not open storage: {0}")]
    Storage(#[from] StoreError),
}

/// Opens the storage, waits out the loading pause and initializes the store.
pub async fn boot(config: ShopConfig) -> Result<Storefront<FileStorage>, BootError> {
    let storage = match &config.data_dir {
        Some(dir) => FileStorage::open(dir)?,
        None => FileStorage::open_default()?,
    };
    info!(dir = %storage.dir().display(), "Data directory determined");

    boot_with(config, storage).await
}

/// [`boot`] with an already-open storage backend.
pub async fn boot_with<S: KeyValueStore>(
    config: ShopConfig,
    storage: S,
) -> Result<Storefront<S>, BootError> {
    let mut app = Storefront::new(config, storage);

    if !app.config.load_delay.is_zero() {
        tokio::time::sleep(app.config.load_delay).await;
    }
    app.store.initialize();

    info!(shop = %app.config.shop_name, "Storefront ready");
    Ok(app)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=scoop_store=trace` - Trace the store only
/// - Default: INFO, DEBUG for the scoop crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scoop=debug,scoop_store=debug,scoop_storefront=debug"));

    // logs go to stderr so they never mix with the shell's output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoop_store::{MemoryStorage, STATE_KEY};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_boot_waits_then_loads_snapshot() {
        let storage = MemoryStorage::new().with_entry(STATE_KEY, r#"{"shopOpen": false}"#);
        let started = tokio::time::Instant::now();

        let app = boot_with(ShopConfig::default(), storage).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(800));
        assert!(app.store.is_ready());
        assert!(!app.store.state().shop_open);
    }

    #[tokio::test]
    async fn test_boot_opens_file_storage() {
        let dir = std::env::temp_dir().join(format!("scoop-boot-{}", std::process::id()));
        let config = ShopConfig {
            data_dir: Some(dir.clone()),
            load_delay: Duration::ZERO,
            ..ShopConfig::default()
        };

        let app = boot(config).await.unwrap();
        assert!(app.store.is_ready());
        assert_eq!(app.store.storage().dir(), dir.as_path());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_fail_raises_error_toast() {
        let mut app = Storefront::new(ShopConfig::default(), MemoryStorage::new());
        let now = Utc::now();
        let err = app.fail(ApiError::validation("price is required"), now);

        assert_eq!(err.message, "price is required");
        let toast = app.notices.current_toast(now).unwrap();
        assert_eq!(toast.level, notify::NoticeLevel::Error);
        assert!(app.notices.current_toast(now + chrono::Duration::seconds(3)).is_none());
    }
}
