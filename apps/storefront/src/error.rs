//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Scoop                                  │
//! │                                                                         │
//! │  Command Function  →  Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError ───────┐                                    │
//! │         ├── CoreError ─────────────┼──► ApiError { code, message }      │
//! │         └── StoreError ────────────┘          │                         │
//! │                                               ▼                         │
//! │                                  error notice (toast / coupon box)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The frontend receives both a machine-readable `code` and the message it
//! shows to the user.

use serde::Serialize;
use scoop_core::CoreError;
use scoop_store::StoreError;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "SHOP_CLOSED",
///   "message": "Shop is closed"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, coupon or order not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The shop is closed for orders
    ShopClosed,

    /// Product is out of stock
    OutOfStock,

    /// Shopper typed an unknown coupon code
    InvalidCoupon,

    /// Cart operation failed
    CartError,

    /// Admin command without an admin session
    Unauthorized,

    /// The order link could not be opened
    LinkError,

    /// Persistence failed
    StorageError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized() -> Self {
        ApiError::new(ErrorCode::Unauthorized, "Admin login required")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ShopClosed => ApiError::new(ErrorCode::ShopClosed, "Shop is closed"),
            CoreError::OutOfStock { name } => {
                ApiError::new(ErrorCode::OutOfStock, format!("{} is out of stock", name))
            }
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id.to_string()),
            CoreError::CouponNotFound(code) => ApiError::not_found("Coupon", &code),
            CoreError::InvalidCoupon(_) => {
                ApiError::new(ErrorCode::InvalidCoupon, "Invalid coupon code")
            }
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::CartTooLarge { max } => ApiError::new(
                ErrorCode::CartError,
                format!("Cart cannot have more than {} items", max),
            ),
            CoreError::QuantityTooLarge { requested, max } => ApiError::new(
                ErrorCode::ValidationError,
                format!("Quantity {} exceeds maximum allowed ({})", requested, max),
            ),
            CoreError::DuplicateProduct(id) => {
                ApiError::validation(format!("Product {} already exists", id))
            }
            CoreError::DuplicateCoupon(code) => {
                ApiError::validation(format!("Coupon {} already exists", code))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => ApiError::from(e),
            StoreError::Link(reason) => {
                tracing::error!("Order link failed: {}", reason);
                ApiError::new(ErrorCode::LinkError, "Could not open WhatsApp")
            }
            StoreError::Io { .. } | StoreError::NoDataDir => {
                tracing::error!("Storage failed: {}", err);
                ApiError::new(ErrorCode::StorageError, "Could not save your data")
            }
            StoreError::Serialize(e) => {
                tracing::error!("State serialization failed: {}", e);
                ApiError::internal("Could not save your data")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
