//! CLI commands for data export and import

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use super::{create_output, parse_month, parse_stage};
use crate::error::{RosterError, RosterResult};
use crate::export::{self, json, yaml, ImportSummary};
use crate::reports::ReportStatusReport;
use crate::storage::Storage;

/// Full export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (full roster)
    Json,
    /// YAML format (full roster, human-readable)
    Yaml,
}

/// Import format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ImportFormat {
    /// Student spreadsheet
    Csv,
    /// Full JSON export
    Json,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the student spreadsheet (CSV)
    Students {
        /// Output file path
        output: PathBuf,
    },

    /// Export the report send status of a month (CSV)
    Status {
        /// Output file path
        output: PathBuf,
        /// Month (1-12, default current)
        #[arg(short, long)]
        month: Option<String>,
        /// Only students in this stage
        #[arg(short, long)]
        stage: Option<String>,
    },

    /// Export the full roster
    All {
        /// Output file path
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> RosterResult<()> {
    match cmd {
        ExportCommands::Students { output } => {
            let mut writer = BufWriter::new(create_output(&output)?);
            export::export_students_csv(storage, &mut writer)?;

            let count = storage.students.count()?;
            println!("Exported {} students to: {}", count, output.display());
        }

        ExportCommands::Status {
            output,
            month,
            stage,
        } => {
            let month = parse_month(month.as_deref())?;
            let stage = stage.as_deref().map(parse_stage).transpose()?;

            let report = ReportStatusReport::generate(storage, month, stage)?;
            let mut writer = BufWriter::new(create_output(&output)?);
            report.export_csv(&mut writer)?;

            println!(
                "Exported report status ({} of {} sent) to: {}",
                report.sent_count(),
                report.rows.len(),
                output.display()
            );
        }

        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = BufWriter::new(create_output(&output)?);
            match format {
                ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
            }
            println!("Full roster exported to: {}", output.display());
        }
    }

    Ok(())
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path, format: ImportFormat) -> RosterResult<()> {
    if !file.exists() {
        return Err(RosterError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let summary: ImportSummary = match format {
        ImportFormat::Csv => {
            let reader = File::open(file)
                .map_err(|e| RosterError::Import(format!("Failed to read file: {}", e)))?;
            export::import_students_csv(storage, BufReader::new(reader))?
        }
        ImportFormat::Json => {
            let content = std::fs::read_to_string(file)
                .map_err(|e| RosterError::Import(format!("Failed to read file: {}", e)))?;
            let restored = json::import_from_json(&content)?;
            export::merge_students(storage, restored.students)?
        }
    };

    println!("Import complete");
    println!("  Added:     {}", summary.added);
    println!("  Replaced:  {}", summary.replaced);
    println!("  Total:     {}", storage.students.count()?);

    Ok(())
}
