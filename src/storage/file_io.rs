//! File I/O utilities with atomic writes
//!
//! The student document is always replaced as a whole, so a write must
//! either land completely or leave the previous file untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::RosterError;

/// Read JSON from a file, returning a default value if the file doesn't exist
/// or holds `null`
pub fn read_json<T, P>(path: P) -> Result<T, RosterError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| RosterError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    let value: Option<T> = serde_json::from_reader(reader)
        .map_err(|e| RosterError::Storage(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(value.unwrap_or_default())
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), RosterError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RosterError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| RosterError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| RosterError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| RosterError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| RosterError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RosterError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Entry {
        name: String,
        value: i32,
    }

    #[test]
    fn test_missing_file_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Vec<Entry> = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_null_document_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.json");
        fs::write(&path, "null").unwrap();

        let data: Vec<Entry> = read_json(&path).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("students.json");
        let data = vec![Entry {
            name: "a".into(),
            value: 1,
        }];

        write_json_atomic(&path, &data).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded: Vec<Entry> = read_json(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Vec<Entry>, _> = read_json(&path);
        assert!(matches!(result, Err(RosterError::Storage(_))));
    }
}
