//! Report service
//!
//! Monthly reports, the report send log, guardian share links and the
//! dashboard.

use chrono::{Datelike, Local};
use serde_json::json;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{RosterError, RosterResult};
use crate::models::{month_name, now_timestamp, MonthFilter, Stage, Student};
use crate::reports::{DashboardReport, ReportStatusReport, StudentReport};
use crate::storage::Storage;

/// A ready-to-open message link to a student's guardian
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    /// Normalized guardian number (digits only, with country prefix)
    pub phone: String,
    pub message: String,
    pub url: String,
}

/// Service for monthly reports
pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Build a student's report for a calendar month
    ///
    /// Events from that month of any year are included. The sent mark is the
    /// one for the current year.
    pub fn student_report(
        &self,
        code: &str,
        month: u32,
        note: Option<String>,
    ) -> RosterResult<StudentReport> {
        validate_month(month)?;
        StudentReport::generate(self.storage, code.trim(), month, note)
    }

    /// Record that this month's report was sent to the guardian
    pub fn mark_report_sent(&self, code: &str, month: u32) -> RosterResult<Student> {
        validate_month(month)?;

        let key = Student::report_key(Local::now().year(), month);
        let sent_at = now_timestamp();

        let (before, after) = self
            .storage
            .students
            .update(code.trim(), |s| {
                let before = s.report_log.get(&key).cloned();
                s.report_log.insert(key.clone(), sent_at.clone());
                (before, s.clone())
            })?
            .ok_or_else(|| RosterError::student_not_found(code.trim()))?;

        self.storage.commit()?;

        let entry = json!({ "report": key, "sentAt": sent_at });
        match before {
            Some(previous) => self.storage.log_update(
                EntityType::Report,
                after.id.to_string(),
                Some(after.name.clone()),
                &json!({ "report": key, "sentAt": previous }),
                &entry,
            )?,
            None => self.storage.log_create(
                EntityType::Report,
                after.id.to_string(),
                Some(after.name.clone()),
                &entry,
            )?,
        }

        tracing::info!(code = %after.id, report = %key, "report marked as sent");
        Ok(after)
    }

    /// Message link to the student's guardian announcing the month's report
    pub fn share_link(&self, student: &Student, month: u32) -> RosterResult<ShareLink> {
        validate_month(month)?;
        Ok(build_share_link(self.storage.settings(), student, month))
    }

    /// Send status of every student in a stage
    pub fn report_status(&self, month: u32, stage: Option<Stage>) -> RosterResult<ReportStatusReport> {
        validate_month(month)?;
        ReportStatusReport::generate(self.storage, month, stage)
    }

    pub fn dashboard(&self, stage: Option<Stage>, month: MonthFilter) -> RosterResult<DashboardReport> {
        DashboardReport::generate(self.storage, stage, month)
    }
}

fn validate_month(month: u32) -> RosterResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(RosterError::Validation(format!(
            "Month must be between 1 and 12, got {}",
            month
        )))
    }
}

/// Digits only; local numbers starting with "01" get the country prefix
pub fn normalize_phone(raw: &str, country_prefix: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with("01") {
        format!("{}{}", country_prefix, digits)
    } else {
        digits
    }
}

pub fn build_share_link(settings: &Settings, student: &Student, month: u32) -> ShareLink {
    let phone = normalize_phone(&student.guardian_phone, &settings.share_country_prefix);

    let mut message = format!(
        "Hello, this is the performance report of {} for {} in {}.",
        student.name,
        month_name(month),
        settings.subject
    );
    if !settings.teacher_name.trim().is_empty() {
        message.push_str(&format!("\nSupervised by: {}", settings.teacher_name.trim()));
    }

    let url = format!(
        "{}?phone={}&text={}",
        settings.share_base_url,
        phone,
        encode_uri_component(&message)
    );

    ShareLink { phone, message, url }
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterPaths;
    use crate::models::{Money, PaymentRecord, RecordDate, StudentCode};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RosterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            teacher_name: "Mr. Hany".into(),
            ..Settings::default()
        };
        let storage = Storage::new(paths, settings).unwrap();
        storage.load().unwrap();

        let mut student = Student::new(StudentCode::parse("1234").unwrap(), "Mona Adel");
        student.guardian_phone = "010-1234-5678".into();
        storage.students.insert(student).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_mark_report_sent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);

        let student = service.mark_report_sent("1234", 3).unwrap();
        let year = Local::now().year();
        let key = format!("{}-3", year);
        assert!(student.report_log.contains_key(&key));
        assert!(student.report_sent_at(year, 3).is_some());

        let status = service.report_status(3, None).unwrap();
        assert_eq!(status.sent_count(), 1);

        // Sending again replaces the timestamp and logs an update
        service.mark_report_sent("1234", 3).unwrap();
        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, crate::audit::Operation::Update);
    }

    #[test]
    fn test_mark_report_sent_errors() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);

        assert!(service.mark_report_sent("9999", 3).unwrap_err().is_not_found());
        assert!(service.mark_report_sent("1234", 13).unwrap_err().is_validation());
    }

    #[test]
    fn test_phone_normalization() {
        assert_eq!(normalize_phone("010-1234-5678", "2"), "201012345678");
        assert_eq!(normalize_phone("+20 101 234 5678", "2"), "201012345678");
        assert_eq!(normalize_phone("", "2"), "");
    }

    #[test]
    fn test_share_link() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);
        let student = storage.students.get("1234").unwrap().unwrap();

        let link = service.share_link(&student, 3).unwrap();

        assert_eq!(link.phone, "201012345678");
        assert!(link.message.contains("Mona Adel"));
        assert!(link.message.contains("March"));
        assert!(link.message.contains("Maths"));
        assert!(link.message.ends_with("Supervised by: Mr. Hany"));
        assert!(link
            .url
            .starts_with("https://web.whatsapp.com/send?phone=201012345678&text=Hello%2C%20this"));
        assert!(link.url.contains("%0ASupervised"));
    }

    #[test]
    fn test_uri_encoding() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("(ok)!*'~"), "(ok)!*'~");
        assert_eq!(encode_uri_component("م"), "%D9%85");
    }

    #[test]
    fn test_student_report_includes_month_of_earlier_year() {
        let (_temp_dir, storage) = create_test_storage();
        let mut student = Student::new(StudentCode::parse("5678").unwrap(), "Omar Ali");
        student
            .attendance
            .insert(NaiveDate::from_ymd_opt(2019, 3, 5).unwrap());
        student.payments.push(PaymentRecord::new(
            Money::from_major(150),
            "",
            RecordDate::from("2019-03-05"),
        ));
        storage.students.insert(student).unwrap();

        let report = ReportService::new(&storage)
            .student_report("5678", 3, None)
            .unwrap();

        assert_eq!(report.summary.attendance_days, 1);
        assert_eq!(report.summary.payment_count, 1);
        assert_eq!(report.days.len(), 1);
        assert!(report.sent_at.is_none());
    }

    #[test]
    fn test_student_report_for_unknown_student() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);
        assert!(service.student_report("9999", 3, None).unwrap_err().is_not_found());
        assert!(service.student_report("1234", 3, None).unwrap().days.is_empty());
    }
}
