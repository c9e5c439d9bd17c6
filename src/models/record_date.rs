//! Timestamps of recorded events
//!
//! Event timestamps are stored as the strings the client wrote. They are
//! resolved to a local calendar day only when needed, so an unreadable value
//! never prevents the rest of a record from loading.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Resolve a stored timestamp to local wall-clock time in `tz`
///
/// - offset-bearing timestamps (`2024-03-05T22:30:00Z`) are converted into `tz`
/// - naive date-times are already local wall-clock time
/// - date-only strings are the calendar day as written, at midnight
///
/// Returns `None` for anything unreadable.
pub fn resolve_local<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).naive_local());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// A stored event timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    /// Wrap a stored timestamp string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Stamp a selected calendar day with a local time of day
    pub fn on_day(day: NaiveDate, time: NaiveTime) -> Self {
        Self(day.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    /// Stamp a selected calendar day with the current local time of day
    pub fn on_day_now(day: NaiveDate) -> Self {
        Self::on_day(day, Local::now().time())
    }

    /// The stored string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local wall-clock time in `tz`
    pub fn local_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        resolve_local(&self.0, tz)
    }

    /// Local calendar day in `tz`
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.local_in(tz).map(|dt| dt.date())
    }

    /// Local calendar day in the system time zone
    pub fn local_day(&self) -> Option<NaiveDate> {
        self.day_in(&Local)
    }

    /// Local month (1-12) in `tz`
    pub fn month_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<u32> {
        self.day_in(tz).map(|d| d.month())
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn cairo() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_only_is_taken_as_written() {
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(RecordDate::from("2024-03-05").day_in(&west), Some(ymd(2024, 3, 5)));
        assert_eq!(RecordDate::from("2024-03-05").day_in(&cairo()), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_naive_datetime_is_local() {
        let date = RecordDate::from("2024-03-05T23:59:00");
        assert_eq!(date.day_in(&cairo()), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_utc_timestamp_converts_near_midnight() {
        // 23:30 UTC is already the next day in Cairo
        let date = RecordDate::from("2024-03-05T23:30:00.000Z");
        assert_eq!(date.day_in(&cairo()), Some(ymd(2024, 3, 6)));
        assert_eq!(date.day_in(&chrono::Utc), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_month_boundary_uses_local_month() {
        let date = RecordDate::from("2024-02-29T23:00:00Z");
        assert_eq!(date.month_in(&cairo()), Some(3));
    }

    #[test]
    fn test_unreadable_dates() {
        assert_eq!(RecordDate::from("").day_in(&cairo()), None);
        assert_eq!(RecordDate::from("not a date").day_in(&cairo()), None);
        assert_eq!(RecordDate::from("2024-13-40").day_in(&cairo()), None);
    }

    #[test]
    fn test_on_day_keeps_selected_day() {
        let stamped = RecordDate::on_day(ymd(2024, 3, 5), NaiveTime::from_hms_opt(0, 15, 0).unwrap());
        assert_eq!(stamped.as_str(), "2024-03-05T00:15:00");
        assert_eq!(stamped.day_in(&cairo()), Some(ymd(2024, 3, 5)));
    }
}
