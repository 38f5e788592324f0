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
//! │    540.00 × 0.69 = 372.59999999999997  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    54000 cents × 69 / 100 = 37260 cents = 372.60                        │
//! │    Exact base-10 arithmetic, rounding only where we ask for it         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Money travels as a decimal string with two fractional digits
//! (`"1000.00"`). Deserialization also accepts JSON numbers, but never more
//! than two fractional digits: an input like `"12.345"` is rejected instead
//! of being silently rounded.
//!
//! ## Usage
//! ```rust
//! use cartprice_core::money::Money;
//! use cartprice_core::types::Percent;
//!
//! let price: Money = "1000.00".parse().unwrap();
//! let discount = price.percent_of(Percent::new(40).unwrap());
//! assert_eq!(discount.to_string(), "400.00");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Percent;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences between totals may be computed freely
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Custom serde**: decimal strings on the wire, cents in memory
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.base_price ──► brand discount ──► category discount           │
/// │                                                 │                       │
/// │                                                 ▼                       │
/// │                        LinePrice.unit_price × quantity ──► subtotal     │
/// │                                                                         │
/// │  subtotal ──► voucher ──► bank offers ──► PriceBreakdown.final_total   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cartprice_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
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

    /// Calculates `self × percent / 100`, rounded half-up to the cent.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (away from zero on ties)                             │
    /// │                                                                     │
    /// │    0.5 → 1, 1.5 → 2, 2.5 → 3, -2.5 → -3                             │
    /// │                                                                     │
    /// │  Every discount amount is rounded here, once, before it is         │
    /// │  multiplied by a quantity or added to a running total.             │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math on i128: `(cents × pct + 50) / 100` for non-negative
    /// amounts, mirrored for negative ones.
    ///
    /// ## Example
    /// ```rust
    /// use cartprice_core::money::Money;
    /// use cartprice_core::types::Percent;
    ///
    /// let subtotal = Money::from_cents(54_000); // 540.00
    /// let off = subtotal.percent_of(Percent::new(69).unwrap());
    /// assert_eq!(off.cents(), 37_260); // 372.60
    ///
    /// // 0.05 × 50% = 0.025 → 0.03
    /// assert_eq!(Money::from_cents(5).percent_of(Percent::new(50).unwrap()).cents(), 3);
    /// ```
    pub fn percent_of(&self, percent: Percent) -> Money {
        let raw = self.0 as i128 * percent.value() as i128;
        let rounded = if raw >= 0 {
            (raw + 50) / 100
        } else {
            (raw - 50) / 100
        };
        Money(rounded as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use cartprice_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    fn invalid(reason: impl Into<String>) -> ValidationError {
        ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `"1000"`, `"10.5"` or `"-3.25"`.
///
/// At most two fractional digits are accepted.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Money::invalid(format!("'{}' is not a decimal amount", s)));
        }
        if !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Money::invalid(format!("'{}' is not a decimal amount", s)));
        }
        if minor.len() > 2 {
            return Err(Money::invalid(format!(
                "'{}' has more than 2 decimal places",
                s
            )));
        }

        let major: i64 = major
            .parse()
            .map_err(|_| Money::invalid(format!("'{}' is out of range", s)))?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().unwrap_or(0) * 10,
            _ => minor.parse::<i64>().unwrap_or(0),
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| Money::invalid(format!("'{}' is out of range", s)))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount with at most 2 decimal places")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom("amount is out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .ok_or_else(|| E::custom("amount is out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be a finite number"));
        }
        // Shortest round-trip representation: 19.99 prints as "19.99".
        v.to_string().parse().map_err(E::custom)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, no currency symbol (`"1000.00"`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
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

    fn pct(value: u8) -> Percent {
        Percent::new(value).unwrap()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("1000".parse::<Money>().unwrap().cents(), 100_000);
        assert_eq!("1000.5".parse::<Money>().unwrap().cents(), 100_050);
        assert_eq!("1000.05".parse::<Money>().unwrap().cents(), 100_005);
        assert_eq!(" 19.99 ".parse::<Money>().unwrap().cents(), 1999);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);
        assert_eq!("7.".parse::<Money>().unwrap().cents(), 700);

        assert!("".parse::<Money>().is_err());
        assert!(".5".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!("1,000.00".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 1000.00 × 40% = 400.00
        assert_eq!(Money::from_cents(100_000).percent_of(pct(40)).cents(), 40_000);
        // 540.00 × 69% = 372.60
        assert_eq!(Money::from_cents(54_000).percent_of(pct(69)).cents(), 37_260);
        // 0.05 × 50% = 0.025 → 0.03
        assert_eq!(Money::from_cents(5).percent_of(pct(50)).cents(), 3);
        // 0.03 × 50% = 0.015 → 0.02
        assert_eq!(Money::from_cents(3).percent_of(pct(50)).cents(), 2);
        // 0.01 × 10% = 0.001 → 0.00
        assert_eq!(Money::from_cents(1).percent_of(pct(10)).cents(), 0);
        // Ties on negative amounts round away from zero
        assert_eq!(Money::from_cents(-5).percent_of(pct(50)).cents(), -3);
        assert!(Money::from_cents(12_345).percent_of(pct(0)).is_zero());
        assert_eq!(Money::from_cents(12_345).percent_of(pct(100)).cents(), 12_345);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(vec![a, b, b].into_iter().sum::<Money>().cents(), 2000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(1);
        assert_eq!(c.cents(), 1499);
        assert!((b - a).is_negative());

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(48_600)).unwrap();
        assert_eq!(json, "\"486.00\"");

        let from_str: Money = serde_json::from_str("\"1000.00\"").unwrap();
        let from_int: Money = serde_json::from_str("1000").unwrap();
        let from_float: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(from_str.cents(), 100_000);
        assert_eq!(from_int.cents(), 100_000);
        assert_eq!(from_float.cents(), 1999);

        assert!(serde_json::from_str::<Money>("\"12.345\"").is_err());
        assert!(serde_json::from_str::<Money>("12.345").is_err());
    }
}
