//! Student repository
//!
//! Holds the in-memory student list in registration order. Mutations here
//! never touch the document store; `Storage::commit` does that.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::RosterError;
use crate::models::Student;

/// In-memory list of students
pub struct StudentRepository {
    data: RwLock<Vec<Student>>,
}

impl Default for StudentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentRepository {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Student>>, RosterError> {
        self.data
            .read()
            .map_err(|e| RosterError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Student>>, RosterError> {
        self.data
            .write()
            .map_err(|e| RosterError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the whole list (used after loading)
    pub fn replace(&self, students: Vec<Student>) -> Result<(), RosterError> {
        *self.write()? = students;
        Ok(())
    }

    /// Copy of the whole list
    pub fn snapshot(&self) -> Result<Vec<Student>, RosterError> {
        Ok(self.read()?.clone())
    }

    /// Get a student by code
    pub fn get(&self, code: &str) -> Result<Option<Student>, RosterError> {
        Ok(self.read()?.iter().find(|s| s.id.as_str() == code).cloned())
    }

    /// Find a student by exact code, else by exact trimmed name
    pub fn find(&self, query: &str) -> Result<Option<Student>, RosterError> {
        let query = query.trim();
        let data = self.read()?;
        Ok(data
            .iter()
            .find(|s| s.id.as_str() == query)
            .or_else(|| data.iter().find(|s| s.name.trim() == query))
            .cloned())
    }

    /// Check whether a code is taken
    pub fn code_exists(&self, code: &str) -> Result<bool, RosterError> {
        Ok(self.read()?.iter().any(|s| s.id.as_str() == code))
    }

    pub fn count(&self) -> Result<usize, RosterError> {
        Ok(self.read()?.len())
    }

    /// Append a new student
    pub fn insert(&self, student: Student) -> Result<(), RosterError> {
        self.write()?.push(student);
        Ok(())
    }

    /// Replace a student with the same code in place, or append it
    ///
    /// Returns the previous record, if any.
    pub fn upsert(&self, student: Student) -> Result<Option<Student>, RosterError> {
        let mut data = self.write()?;
        match data.iter_mut().find(|s| s.id == student.id) {
            Some(slot) => Ok(Some(std::mem::replace(slot, student))),
            None => {
                data.push(student);
                Ok(None)
            }
        }
    }

    /// Apply `f` to the student with `code` and return its result
    ///
    /// Returns `None` when no such student exists.
    pub fn update<F, T>(&self, code: &str, f: F) -> Result<Option<T>, RosterError>
    where
        F: FnOnce(&mut Student) -> T,
    {
        let mut data = self.write()?;
        Ok(data.iter_mut().find(|s| s.id.as_str() == code).map(f))
    }

    /// Remove a student by code
    pub fn remove(&self, code: &str) -> Result<Option<Student>, RosterError> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|s| s.id.as_str() == code)
            .map(|i| data.remove(i)))
    }
}
