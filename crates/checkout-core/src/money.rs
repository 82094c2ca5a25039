//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    49.99 + 5399.99 = 5449.9800000000005  ❌ WRONG!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    4999 + 539999 = 544998 cents = $5449.98  ✅                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let google_tv = Money::from_cents(4999);
//! let macbook = Money::from_cents(539999);
//!
//! let total = google_tv.checked_add(macbook).unwrap();
//! assert_eq!(total.cents(), 544998);
//! assert_eq!(total.to_string(), "$5449.98");
//! ```
//!
//! ## Overflow
//! There are no arithmetic operators on `Money`. Sums and products go through
//! `checked_*` methods that return `None` on overflow, so a large ingested
//! price surfaces as an error instead of a panic or a wrapped total.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results (gross − deduction) may dip
///   below zero before being floored
/// - **Single field tuple struct**: serializes as a bare integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(4999); // $49.99
    /// assert_eq!(price.cents(), 4999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_major_minor(5399, 99);
    /// assert_eq!(price.cents(), 539999);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `self`, or zero if `self` is negative.
    #[inline]
    pub const fn floor_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Computes `rate` percent of this amount.
    ///
    /// ## Implementation
    /// Integer math in basis points with half-up rounding:
    /// `(amount * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use checkout_core::types::DiscountRate;
    ///
    /// // Four Alexa Speakers at $109.50, 10% off
    /// let line = Money::from_cents(10950).multiply_quantity(4).unwrap();
    /// let off = line.percentage_of(DiscountRate::from_bps(1000));
    /// assert_eq!(off.cents(), 4380);
    /// ```
    pub fn percentage_of(&self, rate: DiscountRate) -> Money {
        // i128 keeps large amounts from overflowing mid-calculation
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        // rates above 100% can exceed the input
        Money::from_cents(cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4999);
    /// assert_eq!(unit_price.multiply_quantity(3).unwrap().cents(), 14997);
    /// assert!(Money::from_cents(i64::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts, or `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds, clamping at the `i64` bounds.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts, clamping at the `i64` bounds.
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Self {
        Money(self.0.saturating_sub(other.0))
    }

    /// Sums an iterator of amounts, or `None` if any partial sum overflows.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let prices = [Money::from_cents(4999), Money::from_cents(539999)];
    /// assert_eq!(Money::checked_sum(prices).unwrap().cents(), 544998);
    /// assert!(Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]).is_none());
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, amount| acc.checked_add(amount))
    }

    /// `self - deduction`, never below zero.
    ///
    /// Both sides are expected to be non-negative, so the subtraction itself
    /// cannot overflow; it saturates regardless.
    #[inline]
    pub const fn less_floored(&self, deduction: Money) -> Self {
        self.saturating_sub(deduction).floor_zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC`, for logs and error messages only.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(539999);
        assert_eq!(money.cents(), 539999);
        assert_eq!(money.dollars(), 5399);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(49, 99).cents(), 4999);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(544998).to_string(), "$5449.98");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b).unwrap().cents(), 1500);
        assert_eq!(a.checked_sub(b).unwrap().cents(), 500);
        assert_eq!(a.multiply_quantity(3).unwrap().cents(), 3000);
        assert_eq!(Money::checked_sum([a, b, b]).unwrap().cents(), 2000);
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = Money::from_cents(i64::MAX / 2 + 1);

        assert!(big.checked_add(big).is_none());
        assert!(big.multiply_quantity(2).is_none());
        assert!(Money::checked_sum([big, big]).is_none());
        assert!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)).is_none());

        assert_eq!(big.saturating_add(big).cents(), i64::MAX);
    }

    #[test]
    fn test_less_floored() {
        let gross = Money::from_cents(14997);
        assert_eq!(gross.less_floored(Money::from_cents(4999)).cents(), 9998);
        assert_eq!(gross.less_floored(Money::from_cents(20000)), Money::zero());
        assert_eq!(
            Money::zero().less_floored(Money::from_cents(i64::MAX)),
            Money::zero()
        );
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 10% of $0.05 = 0.5 cent → 1 cent
        let amount = Money::from_cents(5);
        assert_eq!(amount.percentage_of(DiscountRate::from_bps(1000)).cents(), 1);

        // 10% of $0.04 = 0.4 cent → 0 cents
        let amount = Money::from_cents(4);
        assert_eq!(amount.percentage_of(DiscountRate::from_bps(1000)).cents(), 0);
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(Money::from_cents(-1).floor_zero(), Money::zero());
        assert_eq!(Money::from_cents(42).floor_zero().cents(), 42);
        assert!(Money::from_cents(-1).is_negative());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(4999)).unwrap();
        assert_eq!(json, "4999");
    }
}
