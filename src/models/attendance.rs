//! Attendance days
//!
//! Attendance is a set of calendar days, so the same day can never be
//! recorded twice for a student. On disk it is the plain list of date strings
//! the document has always used.

use std::collections::BTreeSet;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::record_date::resolve_local;

/// The days a student attended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttendanceDays {
    days: BTreeSet<NaiveDate>,
    /// Stored entries that are not readable dates; kept so a save never drops them
    unreadable: Vec<String>,
}

impl AttendanceDays {
    /// Create an empty attendance set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a day; returns false if the day was already present
    pub fn insert(&mut self, day: NaiveDate) -> bool {
        self.days.insert(day)
    }

    /// Check whether a day is recorded
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Number of recorded days
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Recorded days in ascending order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    /// Days falling in the given month (1-12), any year
    pub fn in_month(&self, month: u32) -> impl Iterator<Item = NaiveDate> + '_ {
        self.iter().filter(move |d| d.month() == month)
    }

    /// Stored entries that could not be read as dates
    pub fn unreadable(&self) -> &[String] {
        &self.unreadable
    }

    /// Build from stored strings, collapsing duplicates
    pub fn from_raw<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut attendance = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            match resolve_local(entry, &Local) {
                Some(dt) => {
                    attendance.days.insert(dt.date());
                }
                None => {
                    tracing::debug!(entry, "keeping unreadable attendance entry");
                    attendance.unreadable.push(entry.to_string());
                }
            }
        }
        attendance
    }
}

impl FromIterator<NaiveDate> for AttendanceDays {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
            unreadable: Vec::new(),
        }
    }
}

impl Serialize for AttendanceDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<String> = self
            .days
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .chain(self.unreadable.iter().cloned())
            .collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttendanceDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Option<Vec<String>> = Option::deserialize(deserializer)?;
        Ok(Self::from_raw(entries.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duplicate_days_collapse() {
        let attendance: AttendanceDays =
            serde_json::from_str(r#"["2024-03-05", "2024-03-05", "2024-03-07"]"#).unwrap();
        assert_eq!(attendance.len(), 2);
        assert!(attendance.contains(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_insert_reports_existing_day() {
        let mut attendance = AttendanceDays::new();
        assert!(attendance.insert(ymd(2024, 3, 5)));
        assert!(!attendance.insert(ymd(2024, 3, 5)));
        assert_eq!(attendance.len(), 1);
    }

    #[test]
    fn test_null_reads_as_empty() {
        let attendance: AttendanceDays = serde_json::from_str("null").unwrap();
        assert!(attendance.is_empty());
    }

    #[test]
    fn test_unreadable_entries_survive_a_save() {
        let attendance: AttendanceDays =
            serde_json::from_str(r#"["garbage", "2024-03-05"]"#).unwrap();
        assert_eq!(attendance.len(), 1);
        assert_eq!(attendance.unreadable(), ["garbage".to_string()]);

        let json = serde_json::to_string(&attendance).unwrap();
        assert_eq!(json, r#"["2024-03-05","garbage"]"#);
    }

    #[test]
    fn test_in_month() {
        let attendance: AttendanceDays = [ymd(2024, 3, 5), ymd(2025, 3, 1), ymd(2024, 4, 2)]
            .into_iter()
            .collect();
        assert_eq!(attendance.in_month(3).count(), 2);
        assert_eq!(attendance.in_month(6).count(), 0);
    }
}
