//! Reports module for roster
//!
//! Day-by-day activity, month summaries, the dashboard, the monthly report
//! sent to guardians and the report send status.

pub mod daily;
pub mod dashboard;
pub mod status;
pub mod student_report;
pub mod summary;

pub use daily::{BucketOrder, DailyBucket, ReportAggregator};
pub use dashboard::DashboardReport;
pub use status::{ReportStatusReport, ReportStatusRow};
pub use student_report::{day_activities, StudentReport};
pub use summary::Summary;
