//! User settings for roster
//!
//! Manages user preferences: currency, report wording, share-link options,
//! the sync failure policy and where the student document lives.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::RosterPaths;
use crate::error::RosterError;

/// What to do when the document store rejects a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Log the failure and keep going with the local state
    #[default]
    Lenient,
    /// Propagate the failure to the caller
    Strict,
}

/// User settings for roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown next to fee amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Subject named in report messages
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Teacher named in report messages
    #[serde(default)]
    pub teacher_name: String,

    /// Prefix prepended to local guardian numbers starting with "01"
    #[serde(default = "default_country_prefix")]
    pub share_country_prefix: String,

    /// Base URL of the messaging share link
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Behaviour when a sync to the document store fails
    #[serde(default)]
    pub sync_policy: SyncPolicy,

    /// Storage quota of the document store, in KB
    #[serde(default = "default_storage_limit_kb")]
    pub storage_limit_kb: u64,

    /// Student document location (defaults to `<base>/data/students.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "EGP".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_subject() -> String {
    "Maths".to_string()
}

fn default_country_prefix() -> String {
    "2".to_string()
}

fn default_share_base_url() -> String {
    "https://web.whatsapp.com/send".to_string()
}

fn default_storage_limit_kb() -> u64 {
    1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            subject: default_subject(),
            teacher_name: String::new(),
            share_country_prefix: default_country_prefix(),
            share_base_url: default_share_base_url(),
            sync_policy: SyncPolicy::default(),
            storage_limit_kb: default_storage_limit_kb(),
            document_path: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RosterPaths) -> Result<Self, RosterError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| RosterError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RosterError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RosterPaths) -> Result<(), RosterError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| RosterError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| RosterError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the student document path
    pub fn document_path(&self, paths: &RosterPaths) -> PathBuf {
        self.document_path
            .clone()
            .unwrap_or_else(|| paths.students_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "EGP");
        assert_eq!(settings.sync_policy, SyncPolicy::Lenient);
        assert_eq!(settings.storage_limit_kb, 1_048_576);
        assert!(settings.document_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RosterPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.sync_policy = SyncPolicy::Strict;
        settings.teacher_name = "Eng. Amr".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.sync_policy, SyncPolicy::Strict);
        assert_eq!(loaded.teacher_name, "Eng. Amr");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"sync_policy": "strict"}"#).unwrap();
        assert_eq!(settings.sync_policy, SyncPolicy::Strict);
        assert_eq!(settings.subject, "Maths");
        assert_eq!(settings.share_country_prefix, "2");
    }

    #[test]
    fn test_document_path_override() {
        let paths = RosterPaths::with_base_dir(PathBuf::from("/tmp/roster-test"));
        let mut settings = Settings::default();
        assert_eq!(settings.document_path(&paths), paths.students_file());

        settings.document_path = Some(PathBuf::from("/mnt/shared/students.json"));
        assert_eq!(
            settings.document_path(&paths),
            PathBuf::from("/mnt/shared/students.json")
        );
    }
}
