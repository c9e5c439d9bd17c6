//! Day-by-day history view

use super::{separator, truncate};
use crate::models::Student;
use crate::reports::{day_activities, DailyBucket};

/// Format a student's history buckets, in the order given
pub fn format_history(student: &Student, days: &[DailyBucket], currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("History: {} ({})\n", student.name, student.id));
    output.push_str(&separator(70));
    output.push('\n');

    if days.is_empty() {
        output.push_str("No activity recorded.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<12}  {:<28}  {:<12}  {}\n",
        "Date", "Activity", "Scores", "Paid"
    ));

    for day in days {
        let scores: Vec<String> = day
            .grades
            .iter()
            .map(|g| format!("{}/{}", g.score, g.max))
            .collect();
        let paid = if day.payments.is_empty() {
            String::new()
        } else {
            day.payments
                .iter()
                .map(|p| p.amount())
                .sum::<crate::models::Money>()
                .format_with_symbol(currency)
        };

        output.push_str(&format!(
            "{:<12}  {:<28}  {:<12}  {}\n",
            day.day_key(),
            truncate(&day_activities(day).join(", "), 28),
            truncate(&scores.join(" "), 12),
            paid
        ));
    }

    output
}
