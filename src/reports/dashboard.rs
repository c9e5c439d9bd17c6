//! Dashboard statistics
//!
//! Headline numbers for a stage and month: how many students there are, how
//! many showed up at least once, their combined average and fees collected.

use chrono::TimeZone;
use serde::Serialize;

use crate::error::RosterResult;
use crate::models::{Money, MonthFilter, Stage, Student};
use crate::storage::Storage;

use super::daily::ReportAggregator;
use super::summary::Summary;

/// Dashboard numbers for one stage (or all) and one month (or all)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub stage: Option<Stage>,
    #[serde(skip)]
    pub month: MonthFilter,
    pub total_students: usize,
    /// Students with at least one attendance day in the window
    pub attending_students: usize,
    pub average_percent: u32,
    pub payments_total: Money,
    pub summary: Summary,
}

impl DashboardReport {
    /// Compute the dashboard from the loaded roster
    pub fn generate(storage: &Storage, stage: Option<Stage>, month: MonthFilter) -> RosterResult<Self> {
        let students = storage.students.snapshot()?;
        Ok(Self::from_students(&students, &ReportAggregator::local(), stage, month))
    }

    pub fn from_students<Tz: TimeZone>(
        students: &[Student],
        aggregator: &ReportAggregator<Tz>,
        stage: Option<Stage>,
        month: MonthFilter,
    ) -> Self {
        let in_stage: Vec<&Student> = students
            .iter()
            .filter(|s| stage.is_none() || s.stage == stage)
            .collect();

        let summaries: Vec<Summary> = in_stage
            .iter()
            .map(|s| aggregator.summarize(s, month))
            .collect();

        let attending_students = summaries.iter().filter(|s| s.attendance_days > 0).count();
        let summary: Summary = summaries.into_iter().sum();

        Self {
            stage,
            month,
            total_students: in_stage.len(),
            attending_students,
            average_percent: summary.average_percent(),
            payments_total: summary.payments_total,
            summary,
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let stage = self
            .stage
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "All stages".to_string());

        let mut output = String::new();
        output.push_str(&format!("Dashboard: {} / {}\n", stage, self.month));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!("{:<28} {:>20}\n", "Total students", self.total_students));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Attended this month", self.attending_students
        ));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Average score",
            format!("{}%", self.average_percent)
        ));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Fees collected",
            self.payments_total.format_with_symbol(currency)
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GradeKind, GradeRecord, PaymentRecord, RecordDate, StudentCode};
    use chrono::{NaiveDate, Utc};

    fn student(code: &str, stage: Stage) -> Student {
        let mut s = Student::new(StudentCode::parse(code).unwrap(), format!("Student {}", code));
        s.stage = Some(stage);
        s
    }

    fn roster() -> Vec<Student> {
        let mut a = student("1001", Stage::Prep1);
        a.attendance.insert(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        a.attendance.insert(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        a.grades.push(GradeRecord::new(GradeKind::Quiz, 8.0, 10.0, RecordDate::from("2024-03-05")));
        a.payments.push(PaymentRecord {
            amount: "150".into(),
            note: String::new(),
            date: RecordDate::from("2024-03-05"),
        });

        let mut b = student("1002", Stage::Prep1);
        b.grades.push(GradeRecord::new(GradeKind::Monthly, 18.0, 20.0, RecordDate::from("2024-03-20")));
        b.payments.push(PaymentRecord {
            amount: "abc".into(),
            note: String::new(),
            date: RecordDate::from("2024-03-20"),
        });

        let mut c = student("1003", Stage::Sec1);
        c.attendance.insert(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());

        vec![a, b, c]
    }

    #[test]
    fn test_stage_and_month() {
        let report = DashboardReport::from_students(
            &roster(),
            &ReportAggregator::new(Utc),
            Some(Stage::Prep1),
            MonthFilter::Month(3),
        );

        assert_eq!(report.total_students, 2);
        assert_eq!(report.attending_students, 1);
        assert_eq!(report.average_percent, 87);
        assert_eq!(report.payments_total, Money::from_major(150));
    }

    #[test]
    fn test_all_stages() {
        let report = DashboardReport::from_students(
            &roster(),
            &ReportAggregator::new(Utc),
            None,
            MonthFilter::Month(3),
        );
        assert_eq!(report.total_students, 3);
        assert_eq!(report.attending_students, 2);
    }

    #[test]
    fn test_quiet_month_is_zero() {
        let report = DashboardReport::from_students(
            &roster(),
            &ReportAggregator::new(Utc),
            None,
            MonthFilter::Month(6),
        );
        assert_eq!(report.total_students, 3);
        assert_eq!(report.attending_students, 0);
        assert_eq!(report.average_percent, 0);
        assert!(report.payments_total.is_zero());

        let text = report.format_terminal("EGP");
        assert!(text.contains("June"));
        assert!(text.contains("0.00 EGP"));
    }
}
