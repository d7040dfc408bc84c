//! # Money Module
//!
//! Provides the `Money` type for menu prices, line subtotals and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Backend prices are cents, cart math is cents, order totals are      │
//! │    cents. Only the display boundary divides by 100.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use munchies_core::money::{format_price, Money};
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 3;
//! assert_eq!(line.cents(), 3297);
//!
//! assert_eq!(format_price(123456), "$1,234.56");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price_cents ──► CartLine.subtotal ──► Cart.total ──► Checkout
///                                                                   │
/// Order.total_cents ◄── computed by the backend ◄───────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use munchies_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
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

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use munchies_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity, `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a price typed in major units ("12.50") into cents.
    ///
    /// ## Rules
    /// - Surrounding whitespace and a leading `$` are ignored
    /// - At most one decimal point
    /// - Digits past the second decimal round half-up (`"1.005"` → 101)
    /// - Negative values are rejected
    ///
    /// ## Example
    /// ```rust
    /// use munchies_core::money::Money;
    ///
    /// assert_eq!(Money::parse_major("12.5").unwrap().cents(), 1250);
    /// assert_eq!(Money::parse_major("$3").unwrap().cents(), 300);
    /// assert!(Money::parse_major("-1").is_err());
    /// assert!(Money::parse_major("abc").is_err());
    /// ```
    pub fn parse_major(input: &str) -> Result<Money, ValidationError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Err(ValidationError::required("price"));
        }
        if trimmed.starts_with('-') {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(ValidationError::invalid_format(
                "price",
                "must be a number like 12.50",
            ));
        }

        let overflow = || ValidationError::invalid_format("price", "value is too large");

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };

        let digits: Vec<i64> = fraction
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(i64::from)
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);

        let cents = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(overflow)?;

        Ok(Money(cents))
    }
}

/// Formats a cents amount as US currency with thousands separators.
///
/// This is the single display boundary for prices: everything upstream works
/// in integer cents.
///
/// ## Example
/// ```rust
/// use munchies_core::money::format_price;
///
/// assert_eq!(format_price(500), "$5.00");
/// assert_eq!(format_price(1234567), "$12,345.67");
/// assert_eq!(format_price(-250), "-$2.50");
/// ```
pub fn format_price(cents: i64) -> String {
    Money::from_cents(cents).to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================
// Arithmetic saturates instead of wrapping; carts keep their totals in range,
// so saturation only shows up on repriced or backend-supplied data.

/// Displays money as en-US currency (`$1,234.56`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}${}.{:02}",
            sign,
            group_thousands(abs / 100),
            abs % 100
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(100_000).to_string(), "$1,000.00");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "$1,234,567.89");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX - 1);

        assert_eq!((big + Money::from_cents(10)).cents(), i64::MAX);
        assert_eq!(Money::from_cents(500).multiply_quantity(i64::MAX).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);

        let total: Money = [big, big, big].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(
            Money::from_cents(299).checked_multiply_quantity(3),
            Some(Money::from_cents(897))
        );
        assert_eq!(Money::from_cents(500).checked_multiply_quantity(i64::MAX), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_parse_major() {
        assert_eq!(Money::parse_major("12.50").unwrap().cents(), 1250);
        assert_eq!(Money::parse_major(" 7 ").unwrap().cents(), 700);
        assert_eq!(Money::parse_major(".99").unwrap().cents(), 99);
        assert_eq!(Money::parse_major("3.").unwrap().cents(), 300);
        assert_eq!(Money::parse_major("0").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_major_rounds_extra_decimals() {
        assert_eq!(Money::parse_major("1.005").unwrap().cents(), 101);
        assert_eq!(Money::parse_major("1.004").unwrap().cents(), 100);
        assert_eq!(Money::parse_major("9.999").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_major_rejects_bad_input() {
        assert_eq!(
            Money::parse_major(""),
            Err(ValidationError::required("price"))
        );
        assert!(matches!(
            Money::parse_major("-3.00"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(Money::parse_major("1.2.3").is_err());
        assert!(Money::parse_major("12a").is_err());
        assert!(Money::parse_major(".").is_err());
        assert!(Money::parse_major("99999999999999999999").is_err());
    }
}
