//! # Coupons
//!
//! A coupon is a named discount rule: either a percentage of the subtotal or
//! a flat rupee amount off.
//!
//! ## Code Normalisation
//! ```text
//!  admin types " sweet10 "  ──► CouponCode::parse ──► "SWEET10"  (stored)
//!  shopper types "Sweet10"  ──► CouponCode::parse ──► "SWEET10"  (lookup)
//! ```
//! Codes are trimmed and uppercased on the way in, so every comparison after
//! that is a plain string equality.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Percentage;

/// Longest coupon code the admin form accepts.
pub const MAX_COUPON_CODE_LEN: usize = 32;

// =============================================================================
// Coupon Code
// =============================================================================

/// Trimmed, uppercase, non-empty coupon code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalises user input into a code.
    ///
    /// ```rust
    /// use scoop_core::coupon::CouponCode;
    ///
    /// assert_eq!(CouponCode::parse(" sweet10 ").unwrap().as_str(), "SWEET10");
    /// assert!(CouponCode::parse("   ").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let code = input.trim();
        if code.is_empty() {
            return Err(ValidationError::required("code"));
        }
        if code.chars().count() > MAX_COUPON_CODE_LEN {
            return Err(ValidationError::TooLong {
                field: "code".to_string(),
                max: MAX_COUPON_CODE_LEN,
            });
        }
        Ok(CouponCode(code.to_uppercase()))
    }

    /// Built-in codes, already trimmed and uppercase.
    pub(crate) fn from_static(code: &'static str) -> Self {
        CouponCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CouponCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CouponCode::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CouponCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// Which kind of discount an admin is creating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DiscountKind {
    #[default]
    Percent,
    Flat,
}

/// The discount a coupon grants.
///
/// Wire format: `{"type": "percent", "value": 10}` (percentage points) or
/// `{"type": "flat", "value": 50}` (rupees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
#[ts(export)]
pub enum Discount {
    /// Percentage of the subtotal.
    Percent(Percentage),
    /// Fixed amount off. Not capped at the subtotal.
    Flat(Money),
}

impl Discount {
    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::Percent(_) => DiscountKind::Percent,
            Discount::Flat(_) => DiscountKind::Flat,
        }
    }

    /// Amount taken off `subtotal`.
    ///
    /// A flat discount is returned as-is even when it exceeds the subtotal.
    pub fn amount_for(&self, subtotal: Money) -> Money {
        match self {
            Discount::Percent(rate) => subtotal.percentage_of(*rate),
            Discount::Flat(amount) => *amount,
        }
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::Percent(rate) => write!(f, "{} off", rate),
            Discount::Flat(amount) => write!(f, "{} off", amount),
        }
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A named discount.
///
/// Stored flat, the way the admin form reads:
/// `{"code": "SWEET10", "type": "percent", "value": 10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CouponRecord", into = "CouponRecord")]
pub struct Coupon {
    pub code: CouponCode,
    pub discount: Discount,
}

impl Coupon {
    pub fn new(code: CouponCode, discount: Discount) -> Self {
        Coupon { code, discount }
    }
}

/// Persisted layout of a [`Coupon`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, rename = "Coupon")]
pub struct CouponRecord {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[ts(type = "number")]
    pub value: Number,
}

impl From<Coupon> for CouponRecord {
    fn from(coupon: Coupon) -> Self {
        let value = match coupon.discount {
            Discount::Percent(rate) => Number::from(rate),
            Discount::Flat(amount) => Number::from(amount),
        };
        CouponRecord {
            code: coupon.code.into(),
            kind: coupon.discount.kind(),
            value,
        }
    }
}

impl TryFrom<CouponRecord> for Coupon {
    type Error = ValidationError;

    fn try_from(record: CouponRecord) -> Result<Self, Self::Error> {
        let code = CouponCode::parse(&record.code)?;
        let discount = match record.kind {
            DiscountKind::Percent => Discount::Percent(Percentage::try_from(record.value)?),
            DiscountKind::Flat => Discount::Flat(Money::try_from(record.value)?),
        };
        Ok(Coupon { code, discount })
    }
}

/// Looks up a shopper-entered code, ignoring case and surrounding spaces.
///
/// ```rust
/// use scoop_core::catalog::default_coupons;
/// use scoop_core::coupon::find_coupon;
///
/// let coupons = default_coupons();
/// assert!(find_coupon(&coupons, "sweet10").is_some());
/// assert!(find_coupon(&coupons, "BOGUS").is_none());
/// ```
pub fn find_coupon<'a>(coupons: &'a [Coupon], input: &str) -> Option<&'a Coupon> {
    let code = CouponCode::parse(input).ok()?;
    coupons.iter().find(|c| c.code == code)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sweet10() -> Coupon {
        Coupon::new(
            CouponCode::parse("SWEET10").unwrap(),
            Discount::Percent(Percentage::from_points(10)),
        )
    }

    #[test]
    fn test_code_is_normalised() {
        let code = CouponCode::parse("  family50").unwrap();
        assert_eq!(code.as_str(), "FAMILY50");
        assert!(code == *"FAMILY50");
    }

    #[test]
    fn test_code_rejects_empty_and_overlong() {
        assert_eq!(CouponCode::parse(""), Err(ValidationError::required("code")));
        assert!(matches!(
            CouponCode::parse(&"X".repeat(MAX_COUPON_CODE_LEN + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_discount_amounts() {
        let subtotal = Money::from_rupees(100);
        assert_eq!(
            Discount::Percent(Percentage::from_points(10)).amount_for(subtotal),
            Money::from_rupees(10)
        );
        assert_eq!(
            Discount::Flat(Money::from_rupees(150)).amount_for(subtotal),
            Money::from_rupees(150)
        );
    }

    #[test]
    fn test_coupon_wire_format() {
        let json = serde_json::to_value(sweet10()).unwrap();
        assert_eq!(json, serde_json::json!({"code": "SWEET10", "type": "percent", "value": 10}));

        let flat = Coupon::new(
            CouponCode::parse("FAMILY50").unwrap(),
            Discount::Flat(Money::from_rupees(50)),
        );
        assert_eq!(
            serde_json::to_value(flat).unwrap(),
            serde_json::json!({"code": "FAMILY50", "type": "flat", "value": 50})
        );
    }

    #[test]
    fn test_deserializing_normalises_code() {
        let coupon: Coupon =
            serde_json::from_str(r#"{"code": "sweet10", "type": "percent", "value": 10}"#).unwrap();
        assert_eq!(coupon, sweet10());
    }

    #[test]
    fn test_deserializing_reads_decimal_values() {
        let coupon: Coupon =
            serde_json::from_str(r#"{"code": "HALF", "type": "flat", "value": 12.5}"#).unwrap();
        assert_eq!(coupon.discount, Discount::Flat(Money::from_paise(1250)));
    }

    #[test]
    fn test_deserializing_rejects_blank_code() {
        let result: Result<Coupon, _> =
            serde_json::from_str(r#"{"code": " ", "type": "flat", "value": 100}"#);
        assert!(result.is_err());

        let result: Result<Coupon, _> =
            serde_json::from_str(r#"{"code": "X", "type": "percent", "value": -5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_coupon_is_case_insensitive() {
        let coupons = vec![sweet10()];
        assert_eq!(find_coupon(&coupons, " Sweet10 "), Some(&coupons[0]));
        assert_eq!(find_coupon(&coupons, ""), None);
        assert_eq!(find_coupon(&coupons, "SWEET1"), None);
    }

    #[test]
    fn test_discount_display() {
        assert_eq!(sweet10().discount.to_string(), "10% off");
        assert_eq!(Discount::Flat(Money::from_rupees(50)).to_string(), "₹50 off");
    }
}
