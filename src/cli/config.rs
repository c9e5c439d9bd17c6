//! Settings and storage status commands

use clap::{Args, ValueEnum};

use crate::config::{RosterPaths, Settings, SyncPolicy};
use crate::display::separator;
use crate::error::RosterResult;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SyncPolicyArg {
    Lenient,
    Strict,
}

impl From<SyncPolicyArg> for SyncPolicy {
    fn from(arg: SyncPolicyArg) -> Self {
        match arg {
            SyncPolicyArg::Lenient => SyncPolicy::Lenient,
            SyncPolicyArg::Strict => SyncPolicy::Strict,
        }
    }
}

/// Settings to change; with none given the current configuration is shown
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Subject named in report messages
    #[arg(long)]
    pub subject: Option<String>,
    /// Teacher named in report messages
    #[arg(long)]
    pub teacher: Option<String>,
    /// Currency symbol for fees
    #[arg(long)]
    pub currency: Option<String>,
    /// Country prefix for parent phone numbers
    #[arg(long)]
    pub country_prefix: Option<String>,
    /// What to do when saving the roster fails
    #[arg(long, value_enum)]
    pub sync_policy: Option<SyncPolicyArg>,
}

impl ConfigArgs {
    fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.teacher.is_none()
            && self.currency.is_none()
            && self.country_prefix.is_none()
            && self.sync_policy.is_none()
    }
}

pub fn handle_config_command(
    paths: &RosterPaths,
    mut settings: Settings,
    args: ConfigArgs,
) -> RosterResult<()> {
    if !args.is_empty() {
        if let Some(subject) = args.subject {
            settings.subject = subject;
        }
        if let Some(teacher) = args.teacher {
            settings.teacher_name = teacher;
        }
        if let Some(currency) = args.currency {
            settings.currency_symbol = currency;
        }
        if let Some(prefix) = args.country_prefix {
            settings.share_country_prefix = prefix;
        }
        if let Some(policy) = args.sync_policy {
            settings.sync_policy = policy.into();
        }
        settings.save(paths)?;
        println!("Settings saved.");
        println!();
    }

    println!("Roster Configuration");
    println!("====================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Student document: {}", settings.document_path(paths).display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Subject:         {}", settings.subject);
    println!("  Teacher:         {}", settings.teacher_name);
    println!("  Currency:        {}", settings.currency_symbol);
    println!("  Country prefix:  {}", settings.share_country_prefix);
    println!("  Sync policy:     {:?}", settings.sync_policy);

    Ok(())
}

/// Show how much of the storage quota the roster uses
pub fn handle_status_command(storage: &Storage) -> RosterResult<()> {
    let usage = storage.usage()?;
    let count = storage.students.count()?;

    println!("Storage Status");
    println!("{}", separator(40));
    println!("Students:      {}", count);
    println!("Used:          {:.2} KB", usage.used_kb);
    println!("Quota:         {} KB", usage.limit_kb);
    println!("Used (%):      {:.2}%", usage.percent_used());
    println!("Free:          {:.2} MB", usage.free_mb());

    Ok(())
}
