//! Document store backends
//!
//! The whole roster lives in one document. A backend only has to read the
//! full list and replace it; there is no partial update.

use std::path::{Path, PathBuf};

use crate::error::RosterResult;
use crate::models::Student;

use super::file_io::{read_json, write_json_atomic};

/// A store holding the complete student list as one document
pub trait DocumentStore: Send + Sync {
    /// Read the full list; an absent or empty document is an empty list
    fn load(&self) -> RosterResult<Vec<Student>>;

    /// Overwrite the stored list with `students`
    fn replace_all(&self, students: &[Student]) -> RosterResult<()>;

    /// Where the document lives, for messages
    fn location(&self) -> String;
}

/// Document kept in a local JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> RosterResult<Vec<Student>> {
        read_json(&self.path)
    }

    fn replace_all(&self, students: &[Student]) -> RosterResult<()> {
        write_json_atomic(&self.path, students)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
