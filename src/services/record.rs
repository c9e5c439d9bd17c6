//! Performance recording
//!
//! Attendance, grades and fee payments for a selected day. Grades and
//! payments are stamped with that day and the current local time of day, so
//! they always land in the selected day's bucket.

use chrono::NaiveDate;
use serde_json::json;

use crate::audit::EntityType;
use crate::error::{RosterError, RosterResult};
use crate::models::{GradeKind, GradeRecord, Money, MonthFilter, PaymentRecord, RecordDate, Student};
use crate::reports::{BucketOrder, DailyBucket, ReportAggregator};
use crate::storage::Storage;

/// Result of marking attendance
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceOutcome {
    /// The day was recorded
    Marked(Student),
    /// The student was already marked present that day; nothing was written
    AlreadyPresent(Student),
}

impl AttendanceOutcome {
    pub fn student(&self) -> &Student {
        match self {
            Self::Marked(s) | Self::AlreadyPresent(s) => s,
        }
    }

    pub fn was_marked(&self) -> bool {
        matches!(self, Self::Marked(_))
    }
}

/// A grade that was just recorded
#[derive(Debug, Clone)]
pub struct RecordedGrade {
    pub student: Student,
    pub grade: GradeRecord,
    /// Attendance was added for the day along with the grade
    pub attendance_marked: bool,
}

/// Service for recording a student's daily performance
pub struct RecordService<'a> {
    storage: &'a Storage,
}

impl<'a> RecordService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Mark a student present, looked up by code or exact name
    pub fn mark_attendance(&self, query: &str, day: NaiveDate) -> RosterResult<AttendanceOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RosterError::Validation("Enter a student code or name".into()));
        }

        let student = self
            .storage
            .students
            .find(query)?
            .ok_or_else(|| RosterError::student_not_found(query))?;

        if student.attendance.contains(day) {
            tracing::debug!(code = %student.id, %day, "already marked present");
            return Ok(AttendanceOutcome::AlreadyPresent(student));
        }

        let updated = self
            .storage
            .students
            .update(student.id.as_str(), |s| {
                s.attendance.insert(day);
                s.clone()
            })?
            .ok_or_else(|| RosterError::student_not_found(query))?;

        self.storage.commit()?;
        self.storage.log_create(
            EntityType::Attendance,
            updated.id.to_string(),
            Some(updated.name.clone()),
            &json!({ "day": day.format("%Y-%m-%d").to_string() }),
        )?;

        Ok(AttendanceOutcome::Marked(updated))
    }

    /// Record a grade for a day, marking attendance for that day if missing
    pub fn record_grade(
        &self,
        code: &str,
        kind: GradeKind,
        score: f64,
        max: f64,
        day: NaiveDate,
    ) -> RosterResult<RecordedGrade> {
        if !max.is_finite() || max <= 0.0 {
            return Err(RosterError::Validation(
                "Maximum score must be greater than zero".into(),
            ));
        }
        if !score.is_finite() || score < 0.0 {
            return Err(RosterError::Validation("Score cannot be negative".into()));
        }

        let grade = GradeRecord::new(kind, score, max, RecordDate::on_day_now(day));

        let (student, attendance_marked) = self
            .storage
            .students
            .update(code.trim(), |s| {
                s.grades.push(grade.clone());
                let marked = s.attendance.insert(day);
                (s.clone(), marked)
            })?
            .ok_or_else(|| RosterError::student_not_found(code.trim()))?;

        self.storage.commit()?;

        let name = Some(student.name.clone());
        self.storage
            .log_create(EntityType::Grade, student.id.to_string(), name.clone(), &grade)?;
        if attendance_marked {
            self.storage.log_create(
                EntityType::Attendance,
                student.id.to_string(),
                name,
                &json!({ "day": day.format("%Y-%m-%d").to_string() }),
            )?;
        }

        Ok(RecordedGrade {
            student,
            grade,
            attendance_marked,
        })
    }

    /// Record a fee payment for a day
    pub fn record_payment(
        &self,
        code: &str,
        amount: Money,
        note: &str,
        day: NaiveDate,
    ) -> RosterResult<PaymentRecord> {
        if amount.is_negative() {
            return Err(RosterError::Validation("Amount cannot be negative".into()));
        }

        let payment = PaymentRecord::new(amount, note.trim(), RecordDate::on_day_now(day));

        let student = self
            .storage
            .students
            .update(code.trim(), |s| {
                s.payments.push(payment.clone());
                s.clone()
            })?
            .ok_or_else(|| RosterError::student_not_found(code.trim()))?;

        self.storage.commit()?;
        self.storage.log_create(
            EntityType::Payment,
            student.id.to_string(),
            Some(student.name.clone()),
            &payment,
        )?;

        Ok(payment)
    }

    /// A student's activity by day, newest first
    pub fn history(&self, code: &str, filter: MonthFilter) -> RosterResult<(Student, Vec<DailyBucket>)> {
        let student = self
            .storage
            .students
            .get(code.trim())?
            .ok_or_else(|| RosterError::student_not_found(code.trim()))?;

        let days = ReportAggregator::local().build_daily_buckets(&student, filter, BucketOrder::Descending);
        Ok((student, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::{RosterPaths, Settings};
    use crate::models::StudentCode;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RosterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Settings::default()).unwrap();
        storage.load().unwrap();
        storage
            .students
            .insert(Student::new(StudentCode::parse("1234").unwrap(), "Mona Adel"))
            .unwrap();
        (temp_dir, storage)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_mark_attendance_once_per_day() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RecordService::new(&storage);

        let first = service.mark_attendance("1234", day(5)).unwrap();
        assert!(first.was_marked());

        let second = service.mark_attendance("Mona Adel", day(5)).unwrap();
        assert!(!second.was_marked());
        assert_eq!(second.student().attendance.len(), 1);

        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_mark_attendance_unknown_student() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RecordService::new(&storage);

        assert!(service.mark_attendance("9999", day(5)).unwrap_err().is_not_found());
        assert!(service.mark_attendance("  ", day(5)).unwrap_err().is_validation());
    }

    #[test]
    fn test_grade_marks_attendance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RecordService::new(&storage);

        let recorded = service
            .record_grade("1234", GradeKind::Quiz, 8.0, 10.0, day(5))
            .unwrap();

        assert!(recorded.attendance_marked);
        assert_eq!(recorded.grade.date.local_day(), Some(day(5)));
        assert!(recorded.student.attendance.contains(day(5)));

        let again = service
            .record_grade("1234", GradeKind::Monthly, 18.0, 20.0, day(5))
            .unwrap();
        assert!(!again.attendance_marked);
        assert_eq!(again.student.grades.len(), 2);
        assert_eq!(again.student.attendance.len(), 1);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.operation == Operation::Create));
    }

    #[test]
    fn test_grade_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RecordService::new(&storage);

        assert!(service
            .record_grade("1234", GradeKind::Quiz, 5.0, 0.0, day(5))
            .unwrap_err()
            .is_validation());
        assert!(service
            .record_grade("1234", GradeKind::Quiz, -1.0, 10.0, day(5))
            .unwrap_err()
            .is_validation());
        assert!(service
            .record_grade("9999", GradeKind::Quiz, 5.0, 10.0, day(5))
            .unwrap_err()
            .is_not_found());

        assert!(storage.students.get("1234").unwrap().unwrap().grades.is_empty());
    }

    #[test]
    fn test_record_payment() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RecordService::new(&storage);

        let payment = service
            .record_payment("1234", Money::from_major(150), " March ", day(5))
            .unwrap();
        assert_eq!(payment.note, "March");
        assert_eq!(payment.amount(), Money::from_major(150));
        assert_eq!(payment.date.local_day(), Some(day(5)));

        assert!(service
            .record_payment("1234", Money::from_major(-5), "", day(5))
            .unwrap_err()
            .is_validation());

        let student = storage.students.get("1234").unwrap().unwrap();
        assert_eq!(student.payments.len(), 1);
        // Payments alone don't count as attendance
        assert!(student.attendance.is_empty());
    }

    #[test]
    fn test_history_is_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = RecordService::new(&storage);
        service.mark_attendance("1234", day(5)).unwrap();
        service
            .record_payment("1234", Money::from_major(100), "", day(12))
            .unwrap();

        let (_, days) = service.history("1234", MonthFilter::Month(3)).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, day(12));

        let (_, april) = service.history("1234", MonthFilter::Month(4)).unwrap();
        assert!(april.is_empty());
    }
}
