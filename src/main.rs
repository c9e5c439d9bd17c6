use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roster::cli::{
    handle_attend, handle_audit_command, handle_config_command, handle_dashboard,
    handle_export_command, handle_grade, handle_history, handle_import_command, handle_pay,
    handle_report_command, handle_status_command, handle_student_command, AttendArgs, AuditArgs,
    ConfigArgs, DashboardArgs, ExportCommands, GradeArgs, HistoryArgs, ImportFormat, PayArgs,
    ReportCommands, StudentCommands,
};
use roster::config::{RosterPaths, Settings};
use roster::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Terminal-based student records manager",
    long_about = "roster keeps a register of students with their attendance, \
                  grades and fee payments, and produces the monthly reports \
                  sent to their parents."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and an empty roster
    Init,

    /// Show or change settings
    Config(ConfigArgs),

    /// Student management commands
    #[command(subcommand)]
    Student(StudentCommands),

    /// Mark a student present
    Attend(AttendArgs),

    /// Record a grade (also marks attendance)
    Grade(GradeArgs),

    /// Record a fee payment
    Pay(PayArgs),

    /// Show a student's activity by day, newest first
    History(HistoryArgs),

    /// Monthly report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Stage overview for a month
    Dashboard(DashboardArgs),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import students from a file, replacing those with the same code
    Import {
        /// File to import
        file: PathBuf,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ImportFormat,
    },

    /// Show storage usage
    Status,

    /// Show recent changes
    Audit(AuditArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = RosterPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Init) => {
            println!("Initializing roster at: {}", paths.base_dir().display());
            let settings = initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Student document: {}", settings.document_path(&paths).display());
            println!("Run 'roster student add <name>' to register your first student.");
            return Ok(());
        }
        Some(Commands::Config(args)) => {
            handle_config_command(&paths, settings, args)?;
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("roster - Terminal-based student records manager");
            println!();
            println!("Run 'roster --help' for usage information.");
            return Ok(());
        }
    };

    let storage = Storage::new(paths, settings)?;
    storage.load()?;

    match command {
        Commands::Student(cmd) => handle_student_command(&storage, cmd)?,
        Commands::Attend(args) => handle_attend(&storage, args)?,
        Commands::Grade(args) => handle_grade(&storage, args)?,
        Commands::Pay(args) => handle_pay(&storage, args)?,
        Commands::History(args) => handle_history(&storage, args)?,
        Commands::Report(cmd) => handle_report_command(&storage, cmd)?,
        Commands::Dashboard(args) => handle_dashboard(&storage, args)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::Import { file, format } => handle_import_command(&storage, &file, format)?,
        Commands::Status => handle_status_command(&storage)?,
        Commands::Audit(args) => handle_audit_command(&storage, args)?,
        Commands::Init | Commands::Config(_) => {}
    }

    Ok(())
}
