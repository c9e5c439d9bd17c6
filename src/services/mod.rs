//! Service layer for roster
//!
//! Business logic on top of the storage layer: validation, lookups, the
//! single sync after each change and audit logging.

pub mod record;
pub mod report;
pub mod student;

pub use record::{AttendanceOutcome, RecordService, RecordedGrade};
pub use report::{ReportService, ShareLink};
pub use student::{NewStudent, StudentFilter, StudentService, StudentUpdate};
