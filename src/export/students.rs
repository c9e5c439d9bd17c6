//! Student spreadsheet import/export
//!
//! One row per student with a fixed set of columns. The history columns hold
//! JSON arrays so a roster survives a round trip through a spreadsheet.

use std::collections::HashSet;
use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Writer};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, EntityType};
use crate::error::{RosterError, RosterResult};
use crate::models::{AttendanceDays, NumericField, Stage, Student, StudentCode, CODE_ATTEMPTS};
use crate::storage::Storage;

/// Column headers, in the only order accepted on import
pub const STUDENT_COLUMNS: [&str; 11] = [
    "Code",
    "Name",
    "Age",
    "Stage",
    "Phone",
    "Parent Phone",
    "Photo",
    "Created At",
    "_attendance",
    "_grades",
    "_payments",
];

/// Outcome of merging imported students into the roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub replaced: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.added + self.replaced
    }
}

/// Write every student as one spreadsheet row
pub fn export_students_csv<W: Write>(storage: &Storage, writer: &mut W) -> RosterResult<()> {
    let students = storage.students.snapshot()?;
    write_students_csv(&students, writer)
}

pub fn write_students_csv<W: Write>(students: &[Student], writer: &mut W) -> RosterResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(STUDENT_COLUMNS)?;

    for student in students {
        wtr.write_record([
            student.id.to_string(),
            student.name.clone(),
            student.age.to_string(),
            student.stage.map(|s| s.code().to_string()).unwrap_or_default(),
            student.phone.clone(),
            student.guardian_phone.clone(),
            student.photo.clone().unwrap_or_default(),
            student.created_at.clone(),
            json_cell(&student.attendance)?,
            json_cell(&student.grades)?,
            json_cell(&student.payments)?,
        ])?;
    }

    wtr.flush()
        .map_err(|e| RosterError::Export(e.to_string()))?;
    Ok(())
}

fn json_cell<T: Serialize + ?Sized>(value: &T) -> RosterResult<String> {
    serde_json::to_string(value).map_err(|e| RosterError::Export(e.to_string()))
}

/// Read students from a spreadsheet
///
/// The whole file is rejected if the header differs from [`STUDENT_COLUMNS`]
/// or any history cell is not valid JSON. Rows without a code get a fresh one
/// that collides with neither `taken` nor another generated code.
pub fn parse_students_csv<R: Read>(reader: R, taken: &HashSet<String>) -> RosterResult<Vec<Student>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers().map_err(import_error)?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(RosterError::Import("The file is empty".into()));
    }
    check_headers(&headers)?;

    let mut used: HashSet<String> = taken.clone();
    let mut students = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result.map_err(import_error)?;
        let line = index + 2;
        let student = parse_row(&record, &mut used)
            .map_err(|e| RosterError::Import(format!("row {}: {}", line, e)))?;
        students.push(student);
    }

    Ok(students)
}

fn check_headers(headers: &StringRecord) -> RosterResult<()> {
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != STUDENT_COLUMNS {
        return Err(RosterError::Import(format!(
            "Unexpected columns. Expected: {}",
            STUDENT_COLUMNS.join(", ")
        )));
    }
    Ok(())
}

fn parse_row(record: &StringRecord, used: &mut HashSet<String>) -> Result<Student, String> {
    let cell = move |i: usize| record.get(i).map(str::trim).unwrap_or("");

    let code = match cell(0) {
        "" => generate_unused_code(used)?,
        code => StudentCode::from_stored(code),
    };
    used.insert(code.to_string());

    let name = match cell(1) {
        "" => "No Name",
        name => name,
    };
    let mut student = Student::new(code, name);

    student.age = match cell(2) {
        "" => NumericField::Missing,
        raw => raw
            .parse::<f64>()
            .map(NumericField::Number)
            .unwrap_or_else(|_| NumericField::Text(raw.to_string())),
    };
    student.stage = match cell(3) {
        "" => None,
        raw => match raw.parse::<Stage>() {
            Ok(stage) => Some(stage),
            Err(e) => {
                tracing::warn!(stage = raw, "{}", e);
                None
            }
        },
    };
    student.phone = cell(4).to_string();
    student.guardian_phone = cell(5).to_string();
    student.photo = Some(cell(6).to_string()).filter(|p| !p.is_empty());
    if !cell(7).is_empty() {
        student.created_at = cell(7).to_string();
    }

    student.attendance = parse_json_cell::<AttendanceDays>(cell(8), "_attendance")?;
    student.grades = parse_json_cell(cell(9), "_grades")?;
    student.payments = parse_json_cell(cell(10), "_payments")?;

    Ok(student)
}

fn parse_json_cell<T: DeserializeOwned + Default>(raw: &str, column: &str) -> Result<T, String> {
    if raw.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str::<Option<T>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|e| format!("invalid JSON in {}: {}", column, e))
}

fn generate_unused_code(used: &HashSet<String>) -> Result<StudentCode, String> {
    for _ in 0..CODE_ATTEMPTS {
        let code = StudentCode::random();
        if !used.contains(code.as_str()) {
            return Ok(code);
        }
    }
    Err("no free student code left in 1000-9999".into())
}

fn import_error(err: csv::Error) -> RosterError {
    RosterError::Import(err.to_string())
}

/// Import a spreadsheet into the roster
///
/// Nothing is changed unless the whole file parses.
pub fn import_students_csv<R: Read>(storage: &Storage, reader: R) -> RosterResult<ImportSummary> {
    let taken: HashSet<String> = storage
        .students
        .snapshot()?
        .into_iter()
        .map(|s| s.id.to_string())
        .collect();

    let students = parse_students_csv(reader, &taken)?;
    if students.is_empty() {
        return Err(RosterError::Import("The file has no student rows".into()));
    }

    merge_students(storage, students)
}

/// Merge students by code: existing ones are replaced, new ones appended
///
/// The store is written once, after all students are merged.
pub fn merge_students(storage: &Storage, students: Vec<Student>) -> RosterResult<ImportSummary> {
    let mut summary = ImportSummary::default();
    let mut entries = Vec::with_capacity(students.len());

    for student in students {
        let code = student.id.to_string();
        let name = Some(student.name.clone());

        match storage.students.upsert(student.clone())? {
            Some(before) => {
                summary.replaced += 1;
                let diff = match (serde_json::to_value(&before), serde_json::to_value(&student)) {
                    (Ok(b), Ok(a)) => generate_diff(&b, &a),
                    _ => None,
                };
                entries.push(AuditEntry::update(
                    EntityType::Student,
                    code,
                    name,
                    &before,
                    &student,
                    diff,
                ));
            }
            None => {
                summary.added += 1;
                entries.push(AuditEntry::create(EntityType::Student, code, name, &student));
            }
        }
    }

    storage.commit()?;
    storage.log_batch(&entries)?;

    tracing::info!(
        added = summary.added,
        replaced = summary.replaced,
        "imported students"
    );
    Ok(summary)
}
