//! Student display formatting
//!
//! Formats students for terminal output in table and detail views.

use chrono::Datelike;

use super::{format_percentage, truncate};
use crate::config::Settings;
use crate::models::{MonthFilter, Student};
use crate::reports::ReportAggregator;

/// Format a list of students as a table
pub fn format_student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    let name_width = students
        .iter()
        .map(|s| s.name.chars().count().min(30))
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:<name_width$}  {:<6}  {:<13}  {:<13}  {:>5}\n",
        "Code",
        "Name",
        "Stage",
        "Phone",
        "Parent Phone",
        "Days",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<6}  {:-<name_width$}  {:-<6}  {:-<13}  {:-<13}  {:->5}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for student in students {
        output.push_str(&format!(
            "{:<6}  {:<name_width$}  {:<6}  {:<13}  {:<13}  {:>5}\n",
            student.id.as_str(),
            truncate(&student.name, 30),
            student.stage.map(|s| s.label()).unwrap_or("-"),
            student.phone,
            student.guardian_phone,
            student.attendance.len(),
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\n{} student(s)\n", students.len()));
    output
}

/// Format a single student's profile with a summary of the current month
pub fn format_student_details(student: &Student, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Student: {}\n", student.name));
    output.push_str(&format!("  Code:           {}\n", student.id));
    output.push_str(&format!(
        "  Stage:          {}\n",
        student.stage.map(|s| s.label()).unwrap_or("-")
    ));
    output.push_str(&format!(
        "  Age:            {}\n",
        student
            .age()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".into())
    ));
    output.push_str(&format!("  Phone:          {}\n", student.phone));
    output.push_str(&format!("  Parent phone:   {}\n", student.guardian_phone));
    if let Some(photo) = &student.photo {
        output.push_str(&format!("  Photo:          {}\n", photo));
    }
    if let Some(note) = &student.note {
        output.push_str(&format!("  Note:           {}\n", note));
    }
    output.push_str(&format!("  Registered:     {}\n", student.created_at));

    let month = MonthFilter::current();
    let summary = ReportAggregator::local().summarize(student, month);

    output.push('\n');
    output.push_str(&format!("This month ({}):\n", month));
    output.push_str(&format!("  Attendance:     {} day(s)\n", summary.attendance_days));
    output.push_str(&format!(
        "  Grades:         {} (average {})\n",
        summary.grade_count,
        format_percentage(summary.average_percent())
    ));
    output.push_str(&format!(
        "  Payments:       {} ({})\n",
        summary.payment_count,
        summary
            .payments_total
            .format_with_symbol(&settings.currency_symbol)
    ));

    let year = chrono::Local::now().year();
    if let Some(m) = month.month() {
        let sent = student
            .report_sent_at(year, m)
            .map(|s| format!("sent {}", s))
            .unwrap_or_else(|| "not sent".into());
        output.push_str(&format!("  Report:         {}\n", sent));
    }

    output.push_str(&format!(
        "\nAll time: {} day(s), {} grade(s), {} payment(s)\n",
        student.attendance.len(),
        student.grades.len(),
        student.payments.len()
    ));

    output
}
