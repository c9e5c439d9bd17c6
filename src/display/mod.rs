//! Display formatting for terminal output
//!
//! Provides utilities for formatting students and their history for terminal
//! display, plus small text helpers shared by the reports.

pub mod history;
pub mod student;

pub use history::format_history;
pub use student::{format_student_details, format_student_list};

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a percentage for display
pub fn format_percentage(pct: u32) -> String {
    format!("{}%", pct)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
