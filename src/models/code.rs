//! Student codes
//!
//! A student is identified by a short numeric code (3 or 4 digits) that is
//! typed at the front desk, so it is a validated string rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Attempts at drawing an unused random code before giving up
pub const CODE_ATTEMPTS: usize = 1000;

/// A 3-4 digit student code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentCode(String);

impl StudentCode {
    /// Parse and validate a code
    pub fn parse(s: &str) -> Result<Self, CodeError> {
        let s = s.trim();
        if !(3..=4).contains(&s.len()) || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(CodeError::Invalid(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Wrap a stored code without validation
    ///
    /// Codes already in the document are trusted as-is.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Generate a random 4-digit code (1000-9999)
    pub fn random() -> Self {
        let n = Uuid::new_v4().as_u128() % 9000 + 1000;
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StudentCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Student code validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    Invalid(String),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeError::Invalid(s) => write!(f, "Student code must be 3-4 digits, got '{}'", s),
        }
    }
}

impl std::error::Error for CodeError {}
