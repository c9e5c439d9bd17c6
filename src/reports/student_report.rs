//! Monthly student report
//!
//! The report a guardian receives: the student's details, every active day
//! of the month in date order and the month totals.

use std::io::Write;

use chrono::{Datelike, Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::config::Settings;
use crate::error::{RosterError, RosterResult};
use crate::models::{month_name, Money, MonthFilter, Stage, Student};
use crate::storage::Storage;

use super::daily::{BucketOrder, DailyBucket, ReportAggregator};
use super::summary::Summary;

/// A student's report for one month
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub code: String,
    pub name: String,
    pub stage: Option<Stage>,
    pub phone: String,
    pub guardian_phone: String,
    pub month: u32,
    pub year: i32,
    pub generated_on: NaiveDate,
    pub note: Option<String>,
    /// Active days of the month, oldest first
    pub days: Vec<DailyBucket>,
    pub summary: Summary,
    /// When this month's report was last sent
    pub sent_at: Option<String>,
}

impl StudentReport {
    /// Generate the report for a stored student
    ///
    /// The month is matched in any year. The sent mark is looked up for the
    /// current year.
    pub fn generate(
        storage: &Storage,
        code: &str,
        month: u32,
        note: Option<String>,
    ) -> RosterResult<Self> {
        let student = storage
            .students
            .get(code)?
            .ok_or_else(|| RosterError::student_not_found(code))?;

        let today = Local::now().date_naive();
        Ok(Self::build(
            &student,
            &ReportAggregator::local(),
            month,
            today.year(),
            today,
            note,
        ))
    }

    pub fn build<Tz: TimeZone>(
        student: &Student,
        aggregator: &ReportAggregator<Tz>,
        month: u32,
        year: i32,
        generated_on: NaiveDate,
        note: Option<String>,
    ) -> Self {
        let filter = MonthFilter::Month(month);

        Self {
            code: student.id.to_string(),
            name: student.name.clone(),
            stage: student.stage,
            phone: student.phone.clone(),
            guardian_phone: student.guardian_phone.clone(),
            month,
            year,
            generated_on,
            note: note.filter(|n| !n.trim().is_empty()),
            days: aggregator.build_daily_buckets(student, filter, BucketOrder::Ascending),
            summary: aggregator.summarize(student, filter),
            sent_at: student.report_sent_at(year, month).map(str::to_string),
        }
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let currency = settings.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(&format!(
            "Monthly Report: {} - {}\n",
            self.name,
            self.month_name()
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Code:         {}\n", self.code));
        output.push_str(&format!(
            "Stage:        {}\n",
            self.stage.map(|s| s.label()).unwrap_or("-")
        ));
        output.push_str(&format!("Phone:        {}\n", or_dash(&self.phone)));
        output.push_str(&format!("Parent phone: {}\n", or_dash(&self.guardian_phone)));
        output.push_str(&format!(
            "Generated:    {}\n",
            self.generated_on.format(&settings.date_format)
        ));
        if let Some(note) = &self.note {
            output.push_str(&format!("Note:         {}\n", note));
        }
        output.push('\n');

        output.push_str(&format!(
            "{:<12} {:<22} {:<16} {}\n",
            "Date", "Activity", "Scores", "Payments"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.days.is_empty() {
            output.push_str("No records for this month.\n");
        }

        for day in &self.days {
            let activities = day_activities(day);
            let scores: Vec<String> = day
                .grades
                .iter()
                .map(|g| format!("{}/{}", g.score, g.max))
                .collect();
            let payments: Vec<String> = day
                .payments
                .iter()
                .map(|p| {
                    let amount = p.amount().format_with_symbol(currency);
                    if p.note.trim().is_empty() {
                        amount
                    } else {
                        format!("{} ({})", amount, p.note.trim())
                    }
                })
                .collect();

            output.push_str(&format!(
                "{:<12} {:<22} {:<16} {}\n",
                day.date.format(&settings.date_format).to_string(),
                or_dashes(&activities.join(" + ")),
                or_dashes(&scores.join(", ")),
                or_dashes(&payments.join(", "))
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!("Days attended:  {}\n", self.summary.attendance_days));
        output.push_str(&format!("Average score:  {}%\n", self.summary.average_percent()));
        output.push_str(&format!(
            "Fees paid:      {}\n",
            self.summary.payments_total.format_with_symbol(currency)
        ));

        output
    }

    /// Export the day rows to CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> RosterResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Date", "Attendance", "Grades", "Payments", "Amount"])?;

        for day in &self.days {
            let grades: Vec<String> = day
                .grades
                .iter()
                .map(|g| format!("{} {}/{}", g.kind.code(), g.score, g.max))
                .collect();
            let amount: Money = day.payments.iter().map(|p| p.amount()).sum();

            csv.write_record([
                day.day_key(),
                if day.attendance { "yes" } else { "no" }.to_string(),
                grades.join("; "),
                day.payments.len().to_string(),
                amount.to_string(),
            ])?;
        }

        csv.flush()
            .map_err(|e| RosterError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Labels for what happened on a day: attendance first, then each grade kind
pub fn day_activities(day: &DailyBucket) -> Vec<String> {
    let mut activities = Vec::new();
    if day.attendance {
        activities.push("Attendance".to_string());
    }
    for grade in &day.grades {
        let label = grade.kind.to_string();
        if !activities.contains(&label) {
            activities.push(label);
        }
    }
    if !day.payments.is_empty() {
        activities.push("Payment".to_string());
    }
    activities
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

fn or_dashes(s: &str) -> &str {
    if s.is_empty() {
        "---"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GradeKind, GradeRecord, PaymentRecord, RecordDate, StudentCode};
    use chrono::Utc;

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn student() -> Student {
        let mut s = Student::new(StudentCode::parse("1234").unwrap(), "Mona Adel");
        s.stage = Some(Stage::Prep2);
        s.attendance.insert(ymd(3, 12));
        s.attendance.insert(ymd(3, 5));
        s.attendance.insert(ymd(4, 1));
        s.grades.push(GradeRecord::new(GradeKind::Quiz, 8.0, 10.0, RecordDate::from("2024-03-05T10:00:00")));
        s.payments.push(PaymentRecord {
            amount: "150".into(),
            note: "March fees".into(),
            date: RecordDate::from("2024-03-12T09:00:00"),
        });
        s.report_log.insert(Student::report_key(2024, 3), "2024-03-31T10:00:00.000Z".into());
        s
    }

    fn march_report() -> StudentReport {
        StudentReport::build(
            &student(),
            &ReportAggregator::new(Utc),
            3,
            2024,
            ymd(3, 31),
            Some("  ".into()),
        )
    }

    #[test]
    fn test_days_are_chronological() {
        let report = march_report();
        let dates: Vec<_> = report.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![ymd(3, 5), ymd(3, 12)]);
        assert_eq!(report.summary.attendance_days, 2);
        assert_eq!(report.summary.average_percent(), 80);
        assert!(report.note.is_none());
        assert!(report.sent_at.is_some());
    }

    #[test]
    fn test_terminal_output() {
        let text = march_report().format_terminal(&Settings::default());

        assert!(text.contains("Monthly Report: Mona Adel - March"));
        assert!(text.contains("05/03/2024"));
        assert!(text.contains("Attendance + Quiz"));
        assert!(text.contains("150.00 EGP (March fees)"));
        assert!(text.contains("Average score:  80%"));
    }

    #[test]
    fn test_empty_month() {
        let report = StudentReport::build(
            &student(),
            &ReportAggregator::new(Utc),
            6,
            2024,
            ymd(6, 30),
            None,
        );
        assert!(report.days.is_empty());
        assert!(report.sent_at.is_none());
        assert!(report
            .format_terminal(&Settings::default())
            .contains("No records for this month."));
    }

    #[test]
    fn test_csv_export() {
        let mut buffer = Vec::new();
        march_report().export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Date,Attendance,Grades,Payments,Amount");
        assert_eq!(lines[1], "2024-03-05,yes,quiz 8/10,0,0.00");
        assert_eq!(lines[2], "2024-03-12,yes,,1,150.00");
    }
}
