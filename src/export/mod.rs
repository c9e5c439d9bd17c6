//! Export module for roster
//!
//! Provides data import/export in multiple formats:
//! - CSV: the student spreadsheet (one row per student)
//! - JSON: machine-readable full roster export
//! - YAML: human-readable full roster export
//!
//! The report status sheet is exported by `reports::ReportStatusReport`.

pub mod json;
pub mod students;
pub mod yaml;

pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use students::{
    export_students_csv, import_students_csv, merge_students, ImportSummary, STUDENT_COLUMNS,
};
pub use yaml::{export_full_yaml, import_from_yaml};
