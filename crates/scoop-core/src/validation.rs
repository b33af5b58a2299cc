//! # Validation Module
//!
//! Input validation for the admin back-office forms and the cart limits.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                      │
//! │  ├── Empty-field checks, numeric inputs                                 │
//! │  └── Immediate feedback                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Raw text → typed values (Money, Percentage, CouponCode)            │
//! │  └── Business rules (positive price, percent ≤ 100, rating 0-5)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: State store                                                   │
//! │  └── Uniqueness of product ids and coupon codes                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed validation never leaves partial state behind: every function
//! here runs before the store is touched.
//!
//! ## Usage
//! ```rust
//! use scoop_core::validation::{parse_price, validate_product_name};
//!
//! assert!(validate_product_name("Kulfi Stick").is_ok());
//! assert_eq!(parse_price("45").unwrap().paise(), 4500);
//! assert!(parse_price("free").is_err());
//! ```

use crate::coupon::{CouponCode, Discount, DiscountKind};
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Percentage;
use crate::{MAX_AMOUNT, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name the menu card can show.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name)
}

/// Parses a coupon code typed into the admin form.
pub fn parse_coupon_code(code: &str) -> ValidationResult<CouponCode> {
    CouponCode::parse(code)
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn parse_number(field: &str, text: &str) -> ValidationResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "must be a number"))?;

    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a finite number"));
    }

    Ok(value)
}

/// Parses a product price typed in rupees.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as a decimal number
/// - Must be strictly positive
/// - At most [`MAX_AMOUNT`]
///
/// ## Example
/// ```rust
/// use scoop_core::validation::parse_price;
///
/// assert_eq!(parse_price("12.50").unwrap().paise(), 1250);
/// assert!(parse_price("").is_err());
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("-5").is_err());
/// assert!(parse_price("90000000000000000").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let rupees = parse_number("price", text)?;
    let price = Money::from_rupees_f64(rupees)
        .ok_or_else(|| ValidationError::invalid_format("price", "out of range"))?;

    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    validate_price(price)?;
    Ok(price)
}

/// Validates a product price that is already typed (0..=[`MAX_AMOUNT`]).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_amount("price", price)
}

fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT.rupees(),
        });
    }

    Ok(())
}

/// Validates a star rating (0-5 inclusive).
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

/// Parses a coupon value for the chosen discount kind.
///
/// ## Rules
/// - Must not be empty, must parse as a number, must not be negative
/// - `Percent`: percentage points, at most 100
/// - `Flat`: rupees, at most [`MAX_AMOUNT`]; it may still exceed a cart's
///   subtotal (see the pricing module on negative totals)
///
/// ## Example
/// ```rust
/// use scoop_core::coupon::{Discount, DiscountKind};
/// use scoop_core::money::Money;
/// use scoop_core::validation::parse_coupon_value;
///
/// let flat = parse_coupon_value(DiscountKind::Flat, "50").unwrap();
/// assert_eq!(flat, Discount::Flat(Money::from_rupees(50)));
/// assert!(parse_coupon_value(DiscountKind::Percent, "150").is_err());
/// ```
pub fn parse_coupon_value(kind: DiscountKind, text: &str) -> ValidationResult<Discount> {
    let value = parse_number("value", text)?;
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "value".to_string(),
            min: 0,
            max: if kind == DiscountKind::Percent { 100 } else { MAX_AMOUNT.rupees() },
        });
    }

    let discount = match kind {
        DiscountKind::Percent => Discount::Percent(
            Percentage::from_percentage(value)
                .ok_or_else(|| ValidationError::invalid_format("value", "out of range"))?,
        ),
        DiscountKind::Flat => Discount::Flat(
            Money::from_rupees_f64(value)
                .ok_or_else(|| ValidationError::invalid_format("value", "out of range"))?,
        ),
    };

    validate_discount(&discount)?;
    Ok(discount)
}

/// Validates an already-typed discount rule.
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Percent(rate) if rate.bps() > 10_000 => Err(ValidationError::OutOfRange {
            field: "value".to_string(),
            min: 0,
            max: 100,
        }),
        Discount::Flat(amount) => validate_amount("value", *amount),
        Discount::Percent(_) => Ok(()),
    }
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a line quantity (1..=[`MAX_ITEM_QUANTITY`]).
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=i64::from(MAX_ITEM_QUANTITY)).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates that one more distinct product fits in the cart.
///
/// ## Rules
/// - Current line count must be below [`MAX_CART_ITEMS`]
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
