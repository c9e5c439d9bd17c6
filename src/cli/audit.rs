//! Audit log command

use clap::Args;

use crate::error::RosterResult;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Only entries for this student code
    #[arg(short, long)]
    pub student: Option<String>,
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> RosterResult<()> {
    let entries = match &args.student {
        Some(code) => {
            let mut entries = storage.audit().read_for(code.trim())?;
            let skip = entries.len().saturating_sub(args.limit);
            entries.drain(..skip);
            entries
        }
        None => storage.audit().read_recent(args.limit)?,
    };

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
