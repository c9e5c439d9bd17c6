//! CLI commands for reports
//!
//! Monthly student reports, the send log and the dashboard.

use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::{create_output, parse_month, parse_month_filter, parse_stage};
use crate::error::RosterResult;
use crate::models::{month_name, MonthFilter};
use crate::services::{ReportService, StudentService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show a student's monthly report
    Show {
        /// Student code
        code: String,
        /// Month (1-12, default current)
        #[arg(short, long)]
        month: Option<String>,
        /// Note printed on the report
        #[arg(short, long)]
        note: Option<String>,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mark a report as sent and print the message link for the parent
    Send {
        /// Student code
        code: String,
        /// Month (1-12, default current)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Which reports were sent this month
    Status {
        /// Month (1-12, default current)
        #[arg(short, long)]
        month: Option<String>,
        /// Only students in this stage
        #[arg(short, long)]
        stage: Option<String>,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Only students in this stage
    #[arg(short, long)]
    pub stage: Option<String>,
    /// Month (1-12) or "all" (default current)
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> RosterResult<()> {
    let service = ReportService::new(storage);

    match cmd {
        ReportCommands::Show {
            code,
            month,
            note,
            output,
        } => {
            let month = parse_month(month.as_deref())?;
            let report = service.student_report(&code, month, note)?;

            if let Some(path) = output {
                let mut writer = BufWriter::new(create_output(&path)?);
                report.export_csv(&mut writer)?;
                println!("Report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(storage.settings()));
            }
        }

        ReportCommands::Send { code, month } => {
            let month = parse_month(month.as_deref())?;
            let student = StudentService::new(storage).get(&code)?;
            let link = service.share_link(&student, month)?;

            let student = service.mark_report_sent(&code, month)?;
            println!("Marked {} report for {} as sent", month_name(month), student.name);
            if link.phone.is_empty() {
                println!("No parent phone on file; open the link and choose a contact:");
            }
            println!("{}", link.url);
        }

        ReportCommands::Status {
            month,
            stage,
            output,
        } => {
            let month = parse_month(month.as_deref())?;
            let stage = stage.as_deref().map(parse_stage).transpose()?;
            let report = service.report_status(month, stage)?;

            if let Some(path) = output {
                let mut writer = BufWriter::new(create_output(&path)?);
                report.export_csv(&mut writer)?;
                println!("Report status exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal());
            }
        }
    }

    Ok(())
}

/// Handle the dashboard command
pub fn handle_dashboard(storage: &Storage, args: DashboardArgs) -> RosterResult<()> {
    let stage = args.stage.as_deref().map(parse_stage).transpose()?;
    let month = match args.month.as_deref() {
        Some(m) => parse_month_filter(m)?,
        None => MonthFilter::current(),
    };

    let report = ReportService::new(storage).dashboard(stage, month)?;
    println!("{}", report.format_terminal(&storage.settings().currency_symbol));
    Ok(())
}
