//! Audit logging for roster
//!
//! Every change to the student document (registrations, edits, deletions and
//! each recorded attendance, grade, payment or sent report) is appended to a
//! line-delimited JSON log with before/after values.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries to `audit.log` and reads them back
//! - `generate_diff`: one-line summary of what an edit changed

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
