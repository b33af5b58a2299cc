//! # Error Types
//!
//! Domain-specific error types for scoop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  scoop-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Admin form input failures                      │
//! │                                                                         │
//! │  scoop-store errors (separate crate)                                   │
//! │  └── StoreError       - Persistence slot failures                      │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the shopper/admin sees (serialized)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → notice                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. The worst outcome of any of them is a discarded
//! action and a notification.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The shop-open gate is off.
    ///
    /// ## When This Occurs
    /// - Add to cart while the admin has closed the shop
    /// - Checkout while the shop is closed (the store re-checks even when
    ///   the UI has already disabled the button)
    #[error("Shop is closed")]
    ShopClosed,

    /// Product is marked out of stock.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Product id does not exist in the catalogue.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Coupon code does not exist (admin delete, apply of a stale coupon).
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Code typed by the shopper matches no coupon.
    #[error("Invalid coupon code")]
    InvalidCoupon(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed distinct products.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: u32 },

    /// A product with this id is already in the catalogue.
    #[error("Product {0} already exists")]
    DuplicateProduct(ProductId),

    /// A coupon with this code already exists.
    #[error("Coupon {0} already exists")]
    DuplicateCoupon(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the admin forms before any state changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value could not be parsed (e.g. "abc" typed as a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::ShopClosed.to_string(), "Shop is closed");
        assert_eq!(
            CoreError::InvalidCoupon("NOPE".to_string()).to_string(),
            "Invalid coupon code"
        );
        assert_eq!(
            CoreError::OutOfStock {
                name: "Mango Cone".to_string()
            }
            .to_string(),
            "Mango Cone is out of stock"
        );
        assert_eq!(
            CoreError::ProductNotFound(ProductId(7)).to_string(),
            "Product not found: 7"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::invalid_format("price", "must be a number").to_string(),
            "price has invalid format: must be a number"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("price").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
