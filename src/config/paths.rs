//! Path management for roster
//!
//! Provides platform-aware path resolution for configuration, the student
//! document and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `ROSTER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (e.g. `~/.config/roster` on Linux, `%APPDATA%\roster` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::RosterError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";

/// Manages all paths used by roster
#[derive(Debug, Clone)]
pub struct RosterPaths {
    /// Base directory for all roster data
    base_dir: PathBuf,
}

impl RosterPaths {
    /// Create a new RosterPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, RosterError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create RosterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the default path of the student document
    pub fn students_file(&self) -> PathBuf {
        self.data_dir().join("students.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), RosterError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RosterError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RosterError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if roster has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, RosterError> {
    ProjectDirs::from("", "", "roster")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| RosterError::Config("Could not determine a home directory".into()))
}
