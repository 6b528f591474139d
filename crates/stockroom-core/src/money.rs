//! # Money Module
//!
//! Provides the `Money` type for prices and stock valuation.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing 5,000 float prices × quantities drifts:                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every price is stored in cents, every total is exact                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let stock_value = price.multiply_quantity(3);
//! assert_eq!(stock_value.cents(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A monetary value in the smallest currency unit (cents).
///
/// Wraps an `i64`, so sums over large inventories stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a stock quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Desk Lamp $24.99
    /// Quantity on hand: 12
    ///      │
    ///      ▼
    /// multiply_quantity(12) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Stock value: $299.88 ──► Statistics.total_value
    /// ```
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// Shows money as `$12.34` (debugging and the demo binary).
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let mut total = Money::zero();
        total += a;
        total += b;
        assert_eq!(total.cents(), 1500);
    }

    #[test]
    fn test_sum_of_stock_values() {
        let lines = [(299, 3), (1000, 0), (150, 10)];
        let total: Money = lines
            .iter()
            .map(|(price, qty)| Money::from_cents(*price).multiply_quantity(*qty))
            .sum();
        assert_eq!(total.cents(), 897 + 1500);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(3).cents(), i64::MAX);
        assert_eq!((huge + huge + huge).cents(), i64::MAX);

        let mut total = Money::from_cents(i64::MAX);
        total += Money::from_cents(1);
        assert_eq!(total.cents(), i64::MAX);
    }
}
