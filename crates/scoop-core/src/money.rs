//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  A 12.5% coupon on ₹35 is ₹4.375 - which paisa does the shop keep?     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 rupee = 100 paise)                      │
//! │    3500 paise × 1250 bps = 437.5 paise → 438 paise (half-up)           │
//! │    Exactly one rounding step, at a known place                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts keep full paise precision through every calculation. Only the
//! `Display` implementation rounds, to whole rupees, because that is how the
//! storefront prints prices and totals.
//!
//! ## Usage
//! ```rust
//! use scoop_core::money::Money;
//!
//! let price = Money::from_rupees(30);
//! let line = price * 2u32;
//! assert_eq!(line.paise(), 6000);
//! assert_eq!(line.to_string(), "₹60");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::Percentage;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest rupee unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: a flat coupon may exceed the subtotal, and the
///   resulting negative total must be representable rather than clamped
/// - **Saturating arithmetic**: amounts loaded from an old snapshot are not
///   bounded, so sums and products stop at the `i64` limits
/// - **Rupees on the wire**: stored snapshots hold plain rupee numbers
///   (`45`, `12.5`), so serde goes through [`serde_json::Number`]
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem.price (snapshot) ──► line total
///                                                     │
///                                    Σ ──► subtotal ──┼──► discount
///                                                     ├──► delivery
///                                                     └──► total ──► Order.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "Number", into = "Number")]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(4550).rupees(), 45);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Converts a decimal rupee amount (as typed into an admin form) to the
    /// nearest paisa.
    ///
    /// Returns `None` for NaN or infinite input, or for amounts that do not
    /// fit in an `i64` of paise.
    ///
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees_f64(12.5), Some(Money::from_paise(1250)));
    /// assert_eq!(Money::from_rupees_f64(f64::NAN), None);
    /// ```
    pub fn from_rupees_f64(rupees: f64) -> Option<Self> {
        if !rupees.is_finite() {
            return None;
        }
        let paise = (rupees * 100.0).round();
        if paise.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(paise as i64))
    }

    /// Parses decimal rupee text such as `"45"` or `"12.50"`.
    ///
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// assert_eq!(Money::parse_rupees(" 12.50 "), Some(Money::from_paise(1250)));
    /// assert_eq!(Money::parse_rupees("twelve"), None);
    /// ```
    pub fn parse_rupees(text: &str) -> Option<Self> {
        text.trim().parse::<f64>().ok().and_then(Money::from_rupees_f64)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Rounds to the nearest whole rupee, halves away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(4350).round_to_rupees(), 44);
    /// assert_eq!(Money::from_paise(4349).round_to_rupees(), 43);
    /// assert_eq!(Money::from_paise(-4350).round_to_rupees(), -44);
    /// ```
    pub const fn round_to_rupees(&self) -> i64 {
        if self.0 < 0 {
            self.0.saturating_sub(50) / 100
        } else {
            self.0.saturating_add(50) / 100
        }
    }

    /// Zero rupees.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a unit price by a cart quantity, saturating at the
    /// bounds of `i64`.
    ///
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// let line = Money::from_rupees(35).multiply_quantity(3);
    /// assert_eq!(line, Money::from_rupees(105));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Takes a percentage of this amount, rounded half-up to the paisa.
    ///
    /// ## Implementation
    /// Integer math in basis points: `(paise * bps + 5000) / 10000`.
    /// The +5000 is the half-up rounding term.
    ///
    /// ```rust
    /// use scoop_core::money::Money;
    /// use scoop_core::types::Percentage;
    ///
    /// let subtotal = Money::from_rupees(100);
    /// assert_eq!(subtotal.percentage_of(Percentage::from_bps(1000)), Money::from_rupees(10));
    /// ```
    pub fn percentage_of(&self, rate: Percentage) -> Money {
        // i128 so large subtotals cannot overflow mid-calculation
        let paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(i64::try_from(paise).unwrap_or(if paise < 0 { i64::MIN } else { i64::MAX }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount the way the storefront does: rupee sign, whole rupees.
///
/// ```rust
/// use scoop_core::money::Money;
///
/// assert_eq!(Money::from_paise(13950).to_string(), "₹140");
/// assert_eq!(Money::from_rupees(-50).to_string(), "-₹50");
/// ```
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_rupees();
        let sign = if rounded < 0 { "-" } else { "" };
        write!(f, "{}₹{}", sign, rounded.abs())
    }
}

/// Whole rupees become an integer, anything else a decimal.
impl From<Money> for Number {
    fn from(money: Money) -> Self {
        if money.paise_part() == 0 {
            return Number::from(money.rupees());
        }
        Number::from_f64(money.0 as f64 / 100.0).unwrap_or_else(|| Number::from(money.rupees()))
    }
}

impl TryFrom<Number> for Money {
    type Error = ValidationError;

    fn try_from(number: Number) -> Result<Self, Self::Error> {
        let money = match number.as_i64() {
            Some(rupees) => rupees.checked_mul(100).map(Money),
            None => number.as_f64().and_then(Money::from_rupees_f64),
        };
        money.ok_or_else(|| ValidationError::invalid_format("amount", "out of range"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise_and_parts() {
        let money = Money::from_paise(4599);
        assert_eq!(money.paise(), 4599);
        assert_eq!(money.rupees(), 45);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees_f64_rounds_to_nearest_paisa() {
        assert_eq!(Money::from_rupees_f64(45.0), Some(Money::from_rupees(45)));
        assert_eq!(Money::from_rupees_f64(0.125), Some(Money::from_paise(13)));
        assert_eq!(Money::from_rupees_f64(f64::INFINITY), None);
        assert_eq!(Money::from_rupees_f64(1e30), None);
    }

    #[test]
    fn test_display_rounds_to_whole_rupees() {
        assert_eq!(Money::from_rupees(140).to_string(), "₹140");
        assert_eq!(Money::from_paise(14049).to_string(), "₹140");
        assert_eq!(Money::from_paise(14050).to_string(), "₹141");
        assert_eq!(Money::zero().to_string(), "₹0");
        assert_eq!(Money::from_paise(-1050).to_string(), "-₹11");
    }

    #[test]
    fn test_display_does_not_print_negative_zero() {
        assert_eq!(Money::from_paise(-49).to_string(), "₹0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(100);
        let b = Money::from_rupees(40);

        assert_eq!(a + b, Money::from_rupees(140));
        assert_eq!(b - a, Money::from_rupees(-60));
        assert_eq!(-b, Money::from_rupees(-40));
        assert_eq!(b * 3u32, Money::from_rupees(120));

        let mut c = a;
        c += b;
        c -= Money::from_rupees(10);
        assert_eq!(c, Money::from_rupees(130));
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_rupees(60), Money::from_rupees(40)];
        let total: Money = lines.iter().sum();
        assert_eq!(total, Money::from_rupees(100));

        let empty: Vec<Money> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_percentage_of_rounds_half_up() {
        let subtotal = Money::from_rupees(35);
        // 12.5% of ₹35 = ₹4.375 → 437.5 paise → 438
        assert_eq!(subtotal.percentage_of(Percentage::from_bps(1250)).paise(), 438);
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_paise(1).is_positive());
        assert!(Money::from_paise(-1).is_negative());
        assert_eq!(Money::from_paise(-550).abs().paise(), 550);
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let huge = Money::from_paise(i64::MAX / 2);

        assert_eq!(huge * 999u32, Money::from_paise(i64::MAX));
        assert_eq!(huge + huge + huge, Money::from_paise(i64::MAX));
        assert_eq!(-huge - huge - huge, Money::from_paise(i64::MIN));
        assert_eq!(Money::from_paise(i64::MIN).abs(), Money::from_paise(i64::MAX));
        assert_eq!(-Money::from_paise(i64::MIN), Money::from_paise(i64::MAX));

        let max = Money::from_paise(i64::MAX);
        assert_eq!(max.round_to_rupees(), i64::MAX / 100);
        assert_eq!(max.percentage_of(Percentage::from_points(100)), max);
        assert_eq!(vec![max, max].into_iter().sum::<Money>(), max);
    }

    #[test]
    fn test_serializes_as_rupees() {
        assert_eq!(serde_json::to_string(&Money::from_rupees(45)).unwrap(), "45");
        assert_eq!(serde_json::to_string(&Money::from_paise(1250)).unwrap(), "12.5");
        assert_eq!(serde_json::to_string(&Money::from_rupees(-120)).unwrap(), "-120");
    }

    #[test]
    fn test_deserializes_rupee_numbers() {
        let whole: Money = serde_json::from_str("30").unwrap();
        assert_eq!(whole, Money::from_rupees(30));
        let decimal: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(decimal, Money::from_paise(1250));

        assert!(serde_json::from_str::<Money>("92233720368547758").is_err());
        assert!(serde_json::from_str::<Money>("1e300").is_err());
        assert!(serde_json::from_str::<Money>("\"30\"").is_err());
    }
}
