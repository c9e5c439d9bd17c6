//! Student service
//!
//! Registration, lookup, editing and removal of students. Every change is
//! synced to the document store and written to the audit log.

use crate::audit::EntityType;
use crate::error::{RosterError, RosterResult};
use crate::models::{NumericField, Stage, Student, StudentCode, CODE_ATTEMPTS};
use crate::storage::Storage;

/// Details for registering a student
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    /// Requested code; a random unused one is generated when absent
    pub code: Option<String>,
    pub name: String,
    pub age: Option<u32>,
    pub stage: Option<Stage>,
    pub phone: String,
    pub guardian_phone: String,
    pub photo: Option<String>,
    pub note: Option<String>,
}

/// Field changes for an existing student; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub stage: Option<Option<Stage>>,
    pub phone: Option<String>,
    pub guardian_phone: Option<String>,
    pub photo: Option<Option<String>>,
    pub note: Option<Option<String>>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.stage.is_none()
            && self.phone.is_none()
            && self.guardian_phone.is_none()
            && self.photo.is_none()
            && self.note.is_none()
    }
}

/// Filters for listing students
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Matches code, name or phone (case-insensitive)
    pub query: Option<String>,
    pub stage: Option<Stage>,
}

/// Service for student management
pub struct StudentService<'a> {
    storage: &'a Storage,
}

impl<'a> StudentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new student with an empty history
    pub fn register(&self, details: NewStudent) -> RosterResult<Student> {
        let code = match details.code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => StudentCode::parse(code)
                .map_err(|e| RosterError::Validation(e.to_string()))?,
            _ => self.generate_code()?,
        };

        if self.storage.students.code_exists(code.as_str())? {
            return Err(RosterError::duplicate_student(code.as_str()));
        }

        let name = validate_name(&details.name)?;
        let phone = validate_phone("Phone", &details.phone)?;
        let guardian_phone = validate_phone("Parent phone", &details.guardian_phone)?;

        let mut student = Student::new(code, name);
        student.age = details.age.map_or(NumericField::Missing, NumericField::from);
        student.stage = details.stage;
        student.phone = phone;
        student.guardian_phone = guardian_phone;
        student.photo = non_blank(details.photo);
        student.note = non_blank(details.note);

        self.storage.students.insert(student.clone())?;
        self.storage.commit()?;

        self.storage.log_create(
            EntityType::Student,
            student.id.to_string(),
            Some(student.name.clone()),
            &student,
        )?;

        tracing::info!(code = %student.id, "registered student");
        Ok(student)
    }

    /// Draw a random 4-digit code not used by any student
    pub fn generate_code(&self) -> RosterResult<StudentCode> {
        for _ in 0..CODE_ATTEMPTS {
            let code = StudentCode::random();
            if !self.storage.students.code_exists(code.as_str())? {
                return Ok(code);
            }
        }
        Err(RosterError::Storage(
            "No free student code left in 1000-9999".into(),
        ))
    }

    /// Look up by exact code, else by exact name
    pub fn find(&self, query: &str) -> RosterResult<Option<Student>> {
        self.storage.students.find(query)
    }

    /// Get a student by code
    pub fn get(&self, code: &str) -> RosterResult<Student> {
        self.storage
            .students
            .get(code.trim())?
            .ok_or_else(|| RosterError::student_not_found(code.trim()))
    }

    /// Resolve a code or name to a student
    pub fn resolve(&self, query: &str) -> RosterResult<Student> {
        self.find(query)?
            .ok_or_else(|| RosterError::student_not_found(query.trim()))
    }

    /// List students in registration order
    pub fn list(&self, filter: &StudentFilter) -> RosterResult<Vec<Student>> {
        let students = self.storage.students.snapshot()?;
        Ok(students
            .into_iter()
            .filter(|s| filter.stage.is_none() || s.stage == filter.stage)
            .filter(|s| filter.query.as_deref().map_or(true, |q| s.matches_query(q)))
            .collect())
    }

    /// Edit a student's details; histories are left untouched
    pub fn update(&self, code: &str, changes: StudentUpdate) -> RosterResult<Student> {
        let before = self.get(code)?;

        if changes.is_empty() {
            return Ok(before);
        }

        let mut student = before.clone();
        if let Some(name) = &changes.name {
            student.name = validate_name(name)?;
        }
        if let Some(age) = changes.age {
            student.age = NumericField::from(age);
        }
        if let Some(stage) = changes.stage {
            student.stage = stage;
        }
        if let Some(phone) = &changes.phone {
            student.phone = validate_phone("Phone", phone)?;
        }
        if let Some(phone) = &changes.guardian_phone {
            student.guardian_phone = validate_phone("Parent phone", phone)?;
        }
        if let Some(photo) = changes.photo {
            student.photo = non_blank(photo);
        }
        if let Some(note) = changes.note {
            student.note = non_blank(note);
        }

        self.storage.students.upsert(student.clone())?;
        self.storage.commit()?;

        self.storage.log_update(
            EntityType::Student,
            student.id.to_string(),
            Some(student.name.clone()),
            &before,
            &student,
        )?;

        Ok(student)
    }

    /// Remove a student and their whole history
    pub fn delete(&self, code: &str) -> RosterResult<Student> {
        let student = self
            .storage
            .students
            .remove(code.trim())?
            .ok_or_else(|| RosterError::student_not_found(code.trim()))?;

        self.storage.commit()?;

        self.storage.log_delete(
            EntityType::Student,
            student.id.to_string(),
            Some(student.name.clone()),
            &student,
        )?;

        tracing::info!(code = %student.id, "deleted student");
        Ok(student)
    }

    pub fn count(&self) -> RosterResult<usize> {
        self.storage.students.count()
    }
}

fn validate_name(name: &str) -> RosterResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::Validation("Student name cannot be empty".into()));
    }
    Ok(name.to_string())
}

/// Phones are optional, but when given must be exactly 11 digits
fn validate_phone(label: &str, phone: &str) -> RosterResult<String> {
    let phone = phone.trim();
    if phone.is_empty() || (phone.len() == 11 && phone.chars().all(|c| c.is_ascii_digit())) {
        Ok(phone.to_string())
    } else {
        Err(RosterError::Validation(format!(
            "{} must be exactly 11 digits, got '{}'",
            label, phone
        )))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
