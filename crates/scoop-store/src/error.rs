//! # Store Error Types
//!
//! Errors from the persistence slot and the store operations built on it.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key / path involved               │
//! │       │                                                                 │
//! │       ├── at load:   logged, defaults used, never surfaced             │
//! │       └── at persist: logged, the mutation still stands                │
//! │                                                                         │
//! │  CoreError (business rules) passes through as StoreError::Core         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use scoop_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the slot file failed.
    #[error("Storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The messaging link could not be opened.
    #[error("Could not open order link: {0}")]
    Link(String),

    /// No platform data directory could be determined.
    #[error("Could not determine app data directory")]
    NoDataDir,

    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// The business-rule error inside, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            StoreError::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<scoop_core::ValidationError> for StoreError {
    fn from(err: scoop_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through_unchanged() {
        let err: StoreError = CoreError::ShopClosed.into();
        assert_eq!(err.to_string(), "Shop is closed");
        assert_eq!(err.as_core(), Some(&CoreError::ShopClosed));
    }

    #[test]
    fn test_validation_errors_wrap_as_core() {
        let err: StoreError = scoop_core::ValidationError::required("name").into();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = StoreError::io(
            "/tmp/appState.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/appState.json"));
    }
}
