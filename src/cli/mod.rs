//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod config;
pub mod export;
pub mod record;
pub mod report;
pub mod student;

pub use audit::{handle_audit_command, AuditArgs};
pub use config::{handle_config_command, handle_status_command, ConfigArgs};
pub use export::{handle_export_command, handle_import_command, ExportCommands, ImportFormat};
pub use record::{
    handle_attend, handle_grade, handle_history, handle_pay, AttendArgs, GradeArgs, HistoryArgs,
    PayArgs,
};
pub use report::{handle_dashboard, handle_report_command, DashboardArgs, ReportCommands};
pub use student::{handle_student_command, StudentCommands};

use std::fs::File;
use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{RosterError, RosterResult};
use crate::models::{MonthFilter, Stage};

/// Parse a `YYYY-MM-DD` day, defaulting to today
pub(crate) fn parse_day(date: Option<&str>) -> RosterResult<NaiveDate> {
    match date {
        None => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            RosterError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", s))
        }),
    }
}

/// Parse a month number (1-12), defaulting to the current month
pub(crate) fn parse_month(month: Option<&str>) -> RosterResult<u32> {
    match month {
        None => Ok(Local::now().month()),
        Some(s) => match s.trim().parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => Ok(m),
            _ => Err(RosterError::Validation(format!(
                "Invalid month: {}. Use 1-12",
                s
            ))),
        },
    }
}

pub(crate) fn parse_month_filter(month: &str) -> RosterResult<MonthFilter> {
    month.parse().map_err(RosterError::Validation)
}

pub(crate) fn parse_stage(stage: &str) -> RosterResult<Stage> {
    stage.parse().map_err(RosterError::Validation)
}

pub(crate) fn create_output(path: &Path) -> RosterResult<File> {
    File::create(path).map_err(|e| {
        RosterError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })
}
