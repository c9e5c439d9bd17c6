//! Report window: an optional month filter

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a month (1-12)
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Restricts which events are included in a history, report or summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// No filtering
    #[default]
    All,
    /// Only events whose local month (1-12) matches, in any year
    Month(u32),
}

impl MonthFilter {
    /// Filter for the current local month
    pub fn current() -> Self {
        Self::Month(Local::now().month())
    }

    /// Check whether a local day falls in the window
    pub fn matches(&self, day: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => day.month() == *m,
        }
    }

    /// The month number, if filtering
    pub fn month(&self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Month(m) => Some(*m),
        }
    }
}

impl From<Option<u32>> for MonthFilter {
    fn from(month: Option<u32>) -> Self {
        month.map_or(Self::All, Self::Month)
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All months"),
            Self::Month(m) => f.write_str(month_name(*m)),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match s.parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => Ok(Self::Month(m)),
            _ => Err(format!("Invalid month '{}'. Use 1-12 or 'all'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("3".parse::<MonthFilter>().unwrap(), MonthFilter::Month(3));
        assert!("13".parse::<MonthFilter>().is_err());
        assert!("0".parse::<MonthFilter>().is_err());
        assert!("march".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_matches_any_year() {
        let march = MonthFilter::Month(3);
        assert!(march.matches(NaiveDate::from_ymd_opt(2023, 3, 31).unwrap()));
        assert!(march.matches(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(!march.matches(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(MonthFilter::All.matches(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "Unknown");
        assert_eq!(MonthFilter::Month(6).to_string(), "June");
    }
}
