//! JSON Export functionality
//!
//! Exports the complete roster to JSON format with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};
use crate::models::Student;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full roster export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub students: Vec<Student>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub student_count: usize,
    pub attendance_count: usize,
    pub grade_count: usize,
    pub payment_count: usize,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> RosterResult<Self> {
        Ok(Self::from_students(storage.students.snapshot()?))
    }

    pub fn from_students(students: Vec<Student>) -> Self {
        let metadata = ExportMetadata {
            student_count: students.len(),
            attendance_count: students.iter().map(|s| s.attendance.len()).sum(),
            grade_count: students.iter().map(|s| s.grades.len()).sum(),
            payment_count: students.iter().map(|s| s.payments.len()).sum(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            students,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut codes = HashSet::new();
        for student in &self.students {
            if !codes.insert(student.id.as_str()) {
                return Err(format!("Student code {} appears more than once", student.id));
            }
        }

        Ok(())
    }
}

/// Export the full roster to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> RosterResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| RosterError::Export(e.to_string()))?;

    Ok(())
}

/// Read a JSON export back (for restore)
pub fn import_from_json(json_str: &str) -> RosterResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| RosterError::Import(e.to_string()))?;

    export.validate().map_err(RosterError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RosterPaths, Settings};
    use crate::models::{Money, PaymentRecord, RecordDate, StudentCode};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = RosterPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Settings::default()).unwrap();
        storage.load().unwrap();
        (temp_dir, storage)
    }

    fn student(code: &str, name: &str) -> Student {
        Student::new(StudentCode::parse(code).unwrap(), name)
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();

        let mut mona = student("1234", "Mona Adel");
        mona.payments.push(PaymentRecord::new(
            Money::from_major(150),
            "March",
            RecordDate::new("2024-03-05T10:00:00"),
        ));
        storage.students.insert(mona).unwrap();
        storage.students.insert(student("5678", "Omar Ali")).unwrap();

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.student_count, 2);
        assert_eq!(export.metadata.payment_count, 1);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        storage.students.insert(student("1234", "Mona Adel")).unwrap();

        let mut json_output = Vec::new();
        export_full_json(&storage, &mut json_output, true).unwrap();
        let json_string = String::from_utf8(json_output).unwrap();

        let imported = import_from_json(&json_string).unwrap();

        assert_eq!(imported.students.len(), 1);
        assert_eq!(imported.students[0].name, "Mona Adel");
    }

    #[test]
    fn test_duplicate_codes_fail_validation() {
        let export = FullExport::from_students(vec![
            student("1234", "Mona Adel"),
            student("1234", "Omar Ali"),
        ]);
        assert!(export.validate().is_err());
    }
}
