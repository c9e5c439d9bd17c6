//! Report send status
//!
//! Which students have been sent their report for a given month.

use std::io::Write;

use chrono::{Datelike, Local};
use serde::Serialize;

use crate::display::truncate;
use crate::error::{RosterError, RosterResult};
use crate::models::{month_name, resolve_local, Stage, Student};
use crate::storage::Storage;

/// One student's send status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStatusRow {
    pub code: String,
    pub name: String,
    pub stage: Option<Stage>,
    pub guardian_phone: String,
    /// Raw timestamp from the report log, if sent
    pub sent_at: Option<String>,
}

impl ReportStatusRow {
    pub fn is_sent(&self) -> bool {
        self.sent_at.is_some()
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_sent() {
            "✅ Sent"
        } else {
            "❌ Not Sent"
        }
    }

    /// Sent time as local `dd/mm/yyyy, HH:MM:SS`, or "-"
    pub fn sent_display(&self) -> String {
        self.sent_at
            .as_deref()
            .map(|raw| match resolve_local(raw, &Local) {
                Some(dt) => dt.format("%d/%m/%Y, %H:%M:%S").to_string(),
                None => raw.to_string(),
            })
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Send status of every student in a stage for one month
#[derive(Debug, Clone, Serialize)]
pub struct ReportStatusReport {
    pub year: i32,
    pub month: u32,
    pub stage: Option<Stage>,
    pub rows: Vec<ReportStatusRow>,
}

impl ReportStatusReport {
    /// Status for `month` of the current year
    pub fn generate(storage: &Storage, month: u32, stage: Option<Stage>) -> RosterResult<Self> {
        let students = storage.students.snapshot()?;
        Ok(Self::from_students(
            &students,
            Local::now().year(),
            month,
            stage,
        ))
    }

    pub fn from_students(students: &[Student], year: i32, month: u32, stage: Option<Stage>) -> Self {
        let rows = students
            .iter()
            .filter(|s| stage.is_none() || s.stage == stage)
            .map(|s| ReportStatusRow {
                code: s.id.to_string(),
                name: s.name.clone(),
                stage: s.stage,
                guardian_phone: s.guardian_phone.clone(),
                sent_at: s.report_sent_at(year, month).map(str::to_string),
            })
            .collect();

        Self {
            year,
            month,
            stage,
            rows,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_sent()).count()
    }

    /// Format the status list for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Report status: {} {} ({})\n",
            month_name(self.month),
            self.year,
            self.stage.map(|s| s.label()).unwrap_or("all stages")
        ));
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No students found in this stage.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<6} {:<24} {:<6} {:<13} {:<12} {}\n",
            "Code", "Name", "Stage", "Parent Phone", "Status", "Sent Date"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<6} {:<24} {:<6} {:<13} {:<12} {}\n",
                row.code,
                truncate(&row.name, 24),
                row.stage.map(|s| s.label()).unwrap_or("-"),
                row.guardian_phone,
                row.status_label(),
                row.sent_display()
            ));
        }

        output.push_str(&"-".repeat(78));
        output.push('\n');
        output.push_str(&format!("Sent: {} of {}\n", self.sent_count(), self.rows.len()));
        output
    }

    /// Export to CSV: `Code, Name, Stage, Parent Phone, Status, Sent Date`
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> RosterResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Code", "Name", "Stage", "Parent Phone", "Status", "Sent Date"])?;

        for row in &self.rows {
            csv.write_record([
                row.code.as_str(),
                row.name.as_str(),
                row.stage.map(|s| s.code()).unwrap_or(""),
                row.guardian_phone.as_str(),
                row.status_label(),
                row.sent_display().as_str(),
            ])?;
        }

        csv.flush().map_err(|e| RosterError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentCode;

    fn roster() -> Vec<Student> {
        let mut sent = Student::new(StudentCode::parse("1001").unwrap(), "Mona Adel");
        sent.stage = Some(Stage::Prep1);
        sent.guardian_phone = "01012345678".into();
        sent.report_log.insert(Student::report_key(2024, 3), "2024-03-31T10:00:00".into());

        let mut pending = Student::new(StudentCode::parse("1002").unwrap(), "Omar Ali");
        pending.stage = Some(Stage::Prep1);
        // Sent for another month only
        pending.report_log.insert(Student::report_key(2024, 2), "2024-02-28T10:00:00".into());

        let mut other_stage = Student::new(StudentCode::parse("1003").unwrap(), "Sara");
        other_stage.stage = Some(Stage::Sec2);

        vec![sent, pending, other_stage]
    }

    #[test]
    fn test_rows_for_stage() {
        let report = ReportStatusReport::from_students(&roster(), 2024, 3, Some(Stage::Prep1));

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.sent_count(), 1);
        assert_eq!(report.rows[0].status_label(), "✅ Sent");
        assert_eq!(report.rows[0].sent_display(), "31/03/2024, 10:00:00");
        assert_eq!(report.rows[1].status_label(), "❌ Not Sent");
        assert_eq!(report.rows[1].sent_display(), "-");
    }

    #[test]
    fn test_csv_export() {
        let report = ReportStatusReport::from_students(&roster(), 2024, 3, None);
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Code,Name,Stage,Parent Phone,Status,Sent Date");
        assert_eq!(lines[1], "1001,Mona Adel,prep1,01012345678,✅ Sent,\"31/03/2024, 10:00:00\"");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_stage() {
        let report = ReportStatusReport::from_students(&roster(), 2024, 3, Some(Stage::Sec3));
        assert!(report.format_terminal().contains("No students found"));
    }
}
