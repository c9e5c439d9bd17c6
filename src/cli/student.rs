//! Student CLI commands
//!
//! Implements CLI commands for student management.

use clap::Subcommand;

use super::parse_stage;
use crate::display::{format_student_details, format_student_list};
use crate::error::RosterResult;
use crate::services::{NewStudent, StudentFilter, StudentService, StudentUpdate};
use crate::storage::Storage;

/// Student subcommands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// Register a new student
    Add {
        /// Full name
        name: String,
        /// 3-4 digit code (generated when omitted)
        #[arg(short, long)]
        code: Option<String>,
        /// Stage (prep1, prep2, prep3, Sec1, Sec2, Sec3)
        #[arg(short, long)]
        stage: Option<String>,
        #[arg(short, long)]
        age: Option<u32>,
        /// Student phone (11 digits)
        #[arg(short, long, default_value = "")]
        phone: String,
        /// Parent phone (11 digits)
        #[arg(short = 'g', long, default_value = "")]
        parent_phone: String,
        /// Photo URL
        #[arg(long)]
        photo: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List students
    List {
        /// Search by code, name or phone
        #[arg(short, long)]
        query: Option<String>,
        /// Only students in this stage
        #[arg(short, long)]
        stage: Option<String>,
    },
    /// Show a student's profile
    Show {
        /// Student code or exact name
        student: String,
    },
    /// Edit a student
    Edit {
        /// Student code
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        /// New stage, or "none" to clear it
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        parent_phone: Option<String>,
        /// New photo URL ("" clears it)
        #[arg(long)]
        photo: Option<String>,
        /// New note ("" clears it)
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a student and their whole history
    Delete {
        /// Student code
        code: String,
    },
}

/// Handle a student command
pub fn handle_student_command(storage: &Storage, cmd: StudentCommands) -> RosterResult<()> {
    let service = StudentService::new(storage);

    match cmd {
        StudentCommands::Add {
            name,
            code,
            stage,
            age,
            phone,
            parent_phone,
            photo,
            note,
        } => {
            let stage = stage.as_deref().map(parse_stage).transpose()?;

            let student = service.register(NewStudent {
                code,
                name,
                age,
                stage,
                phone,
                guardian_phone: parent_phone,
                photo,
                note,
            })?;

            println!("Registered student: {}", student.name);
            println!("  Code: {}", student.id);
            if let Some(stage) = student.stage {
                println!("  Stage: {}", stage);
            }
        }

        StudentCommands::List { query, stage } => {
            let stage = stage.as_deref().map(parse_stage).transpose()?;
            let students = service.list(&StudentFilter { query, stage })?;
            print!("{}", format_student_list(&students));
        }

        StudentCommands::Show { student } => {
            let found = service.resolve(&student)?;
            print!("{}", format_student_details(&found, storage.settings()));
        }

        StudentCommands::Edit {
            code,
            name,
            age,
            stage,
            phone,
            parent_phone,
            photo,
            note,
        } => {
            let stage = match stage.as_deref() {
                None => None,
                Some(s) if s.trim().eq_ignore_ascii_case("none") || s.trim().is_empty() => {
                    Some(None)
                }
                Some(s) => Some(Some(parse_stage(s)?)),
            };

            let changes = StudentUpdate {
                name,
                age,
                stage,
                phone,
                guardian_phone: parent_phone,
                photo: photo.map(|p| Some(p).filter(|p| !p.trim().is_empty())),
                note: note.map(|n| Some(n).filter(|n| !n.trim().is_empty())),
            };

            if changes.is_empty() {
                println!("No changes specified. Use --name, --stage, --phone, ... to edit.");
                return Ok(());
            }

            let updated = service.update(&code, changes)?;
            println!("Updated student: {} ({})", updated.name, updated.id);
        }

        StudentCommands::Delete { code } => {
            let removed = service.delete(&code)?;
            println!("Deleted student: {} ({})", removed.name, removed.id);
        }
    }

    Ok(())
}
