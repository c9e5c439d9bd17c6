//! Money type for fee amounts
//!
//! Internally stores amounts in minor units (piastres, cents) as i64 to avoid
//! floating-point drift when totals are summed across many payments.
//! Arithmetic saturates at the i64 bounds, so summing stored amounts of any
//! size never fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A monetary amount stored in minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use roster::models::Money;
    /// let amount = Money::from_minor(15050); // 150.50
    /// assert_eq!(amount.major(), 150);
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from a whole number of currency units
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Create a Money amount from a floating-point value, rounding to the
    /// nearest minor unit. Non-finite values become zero and values beyond
    /// the i64 range are clamped to it.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self((value * 100.0).round() as i64)
        } else {
            Self::zero()
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole-units portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "150", "150.5", "150.50", "-20". Amounts too large
    /// for minor units are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let minor = if let Some((whole, fraction)) = s.split_once('.') {
            let whole: i64 = if whole.is_empty() {
                0
            } else {
                whole
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
            };

            if !fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            // Pad or truncate to 2 digits
            let fraction: i64 = match fraction.len() {
                0 => 0,
                1 => fraction.parse::<i64>().unwrap_or(0) * 10,
                _ => fraction[..2].parse().unwrap_or(0),
            };

            whole
                .checked_mul(100)
                .and_then(|w| w.checked_add(fraction))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        } else {
            s.parse::<i64>()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                .checked_mul(100)
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        };

        let minor = if negative {
            minor
                .checked_neg()
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        } else {
            minor
        };
        Ok(Self(minor))
    }

    /// Format with a currency symbol, e.g. "150.00 EGP"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", self, symbol)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.minor_part())
        } else {
            write!(f, "{}.{:02}", self.major(), self.minor_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Money amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(15050);
        assert_eq!(m.minor(), 15050);
        assert_eq!(m.major(), 150);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_from_f64_rounds() {
        assert_eq!(Money::from_f64(150.0).minor(), 15000);
        assert_eq!(Money::from_f64(99.99).minor(), 9999);
        assert!(Money::from_f64(f64::NAN).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(15000).to_string(), "150.00");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_major(150).format_with_symbol("EGP"), "150.00 EGP");
        assert_eq!(Money::from_major(7).format_with_symbol(""), "7.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("150").unwrap().minor(), 15000);
        assert_eq!(Money::parse("150.5").unwrap().minor(), 15050);
        assert_eq!(Money::parse(" 150.505 ").unwrap().minor(), 15050);
        assert_eq!(Money::parse(".75").unwrap().minor(), 75);
        assert_eq!(Money::parse("-20").unwrap().minor(), -2000);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.x").is_err());
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![Money::from_major(100), Money::from_minor(250)]
            .into_iter()
            .sum();
        assert_eq!(total.minor(), 10250);
    }

    #[test]
    fn test_large_amounts_saturate() {
        assert!(matches!(
            Money::parse("100000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("100000000000000000.50"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert_eq!(Money::from_f64(1e30).minor(), i64::MAX);
        assert_eq!(Money::from_f64(-1e30).minor(), i64::MIN);

        let max = Money::from_minor(i64::MAX);
        assert_eq!(max + max, max);
        let total: Money = vec![max, max, Money::from_major(1)].into_iter().sum();
        assert_eq!(total, max);
        assert_eq!(Money::from_minor(i64::MIN) - max, Money::from_minor(i64::MIN));
    }
}
