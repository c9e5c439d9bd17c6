//! Storage initialization
//!
//! Handles first-run setup: directories, default settings and an empty
//! student document.

use crate::config::paths::RosterPaths;
use crate::config::settings::Settings;
use crate::error::RosterError;
use crate::models::Student;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing settings and documents are left untouched. Returns the settings
/// in effect.
pub fn initialize_storage(paths: &RosterPaths) -> Result<Settings, RosterError> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    let document = settings.document_path(paths);
    if !document.exists() {
        write_json_atomic(&document, &Vec::<Student>::new())?;
        tracing::info!(path = %document.display(), "created empty student document");
    }

    Ok(settings)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &RosterPaths) -> bool {
    !paths.is_initialized()
}
