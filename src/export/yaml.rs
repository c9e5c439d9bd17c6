//! YAML Export functionality
//!
//! Exports the complete roster to YAML format for human-readable backup.

use std::io::Write;

use crate::error::{RosterError, RosterResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full roster to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> RosterResult<()> {
    let export = FullExport::from_storage(storage)?;
    let io_err = |e: std::io::Error| RosterError::Export(e.to_string());

    writeln!(writer, "# Roster Full Export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer, "#").map_err(io_err)?;
    writeln!(writer, "# Contains student contact details. Keep it private.").map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| RosterError::Export(e.to_string()))?;

    Ok(())
}

/// Read a YAML export back
pub fn import_from_yaml(yaml_str: &str) -> RosterResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| RosterError::Import(e.to_string()))?;

    export.validate().map_err(RosterError::Import)?;

    Ok(export)
}
