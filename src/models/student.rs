//! Student model
//!
//! One entry of the shared student document. Field names on disk follow the
//! camelCase shape the document has always had.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::attendance::AttendanceDays;
use super::code::StudentCode;
use super::numeric::NumericField;
use super::records::{GradeRecord, PaymentRecord};
use super::stage::{self, Stage};

/// A registered student with their full history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// 3-4 digit code, unique within the roster
    pub id: StudentCode,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub age: NumericField,

    #[serde(default, with = "stage::optional")]
    pub stage: Option<Stage>,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub guardian_phone: String,

    /// Photo URL
    #[serde(default, with = "blank_as_none")]
    pub photo: Option<String>,

    #[serde(default, with = "blank_as_none")]
    pub note: Option<String>,

    #[serde(default)]
    pub attendance: AttendanceDays,

    #[serde(default, deserialize_with = "null_as_default")]
    pub grades: Vec<GradeRecord>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: Vec<PaymentRecord>,

    #[serde(default)]
    pub created_at: String,

    /// "year-month" -> when the monthly report was last sent
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_log: BTreeMap<String, String>,
}

impl Student {
    /// Create a student with an empty history
    pub fn new(id: StudentCode, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age: NumericField::Missing,
            stage: None,
            phone: String::new(),
            guardian_phone: String::new(),
            photo: None,
            note: None,
            attendance: AttendanceDays::new(),
            grades: Vec::new(),
            payments: Vec::new(),
            created_at: now_timestamp(),
            report_log: BTreeMap::new(),
        }
    }

    /// Age in years, if recorded as a whole number
    pub fn age(&self) -> Option<u32> {
        self.age.as_whole()
    }

    /// Check whether a free-text query matches the code, name or phone
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.id.as_str().contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self.phone.contains(&query)
    }

    /// Key used in the report log
    pub fn report_key(year: i32, month: u32) -> String {
        format!("{}-{}", year, month)
    }

    /// When the report for a month was sent, if it was
    pub fn report_sent_at(&self, year: i32, month: u32) -> Option<&str> {
        self.report_log
            .get(&Self::report_key(year, month))
            .map(String::as_str)
    }

    /// Check whether the student has any recorded history
    pub fn has_history(&self) -> bool {
        !self.attendance.is_empty() || !self.grades.is_empty() || !self.payments.is_empty()
    }
}

/// Current UTC time in the document's timestamp format
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional text stored as "" when absent
mod blank_as_none {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        value.as_deref().unwrap_or("").serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.trim().is_empty()))
    }
}
