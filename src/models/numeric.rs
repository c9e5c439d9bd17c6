//! Loosely typed numeric values
//!
//! Scores, maxima, ages and fee amounts in the student document may have been
//! written as JSON numbers or as numeric strings. `NumericField` keeps the
//! value exactly as stored and coerces it only when read.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A numeric value as stored in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl NumericField {
    /// The value as a finite number; anything non-numeric reads as 0
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(n) if n.is_finite() => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// The value as a whole number, if it is one
    pub fn as_whole(&self) -> Option<u32> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Missing => return None,
        };
        (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
            .then_some(value as u32)
    }

    /// The value as a money amount
    pub fn money(&self) -> Money {
        match self {
            Self::Text(s) => Money::parse(s).unwrap_or_else(|_| Money::from_f64(self.value())),
            _ => Money::from_f64(self.value()),
        }
    }

    /// Check whether the stored value reads as a number
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Number(n) => n.is_finite(),
            Self::Text(s) => s.trim().parse::<f64>().map_or(false, f64::is_finite),
            Self::Missing => false,
        }
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for NumericField {
    fn from(value: u32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Missing => Ok(()),
        }
    }
}
