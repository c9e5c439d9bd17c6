//! Attendance, grade and payment commands

use clap::Args;

use super::{parse_day, parse_month_filter};
use crate::display::format_history;
use crate::error::{RosterError, RosterResult};
use crate::models::{GradeKind, Money};
use crate::services::RecordService;
use crate::storage::Storage;

#[derive(Args)]
pub struct AttendArgs {
    /// Student code or exact name
    pub student: String,
    /// Day to record (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct GradeArgs {
    /// Student code
    pub code: String,
    /// Score obtained
    pub score: f64,
    /// Maximum score
    pub max: f64,
    /// Grade type (quiz, monthly)
    #[arg(short = 't', long = "type", default_value = "quiz")]
    pub kind: String,
    /// Day of the grade (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct PayArgs {
    /// Student code
    pub code: String,
    /// Amount paid (e.g. "150" or "150.50")
    pub amount: String,
    #[arg(short, long, default_value = "")]
    pub note: String,
    /// Day of the payment (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Student code
    pub code: String,
    /// Month (1-12) or "all"
    #[arg(short, long, default_value = "all")]
    pub month: String,
}

pub fn handle_attend(storage: &Storage, args: AttendArgs) -> RosterResult<()> {
    let day = parse_day(args.date.as_deref())?;
    let outcome = RecordService::new(storage).mark_attendance(&args.student, day)?;
    let student = outcome.student();

    if outcome.was_marked() {
        println!("Marked {} ({}) present on {}", student.name, student.id, day);
    } else {
        println!("{} ({}) is already marked present on {}", student.name, student.id, day);
    }
    Ok(())
}

pub fn handle_grade(storage: &Storage, args: GradeArgs) -> RosterResult<()> {
    let kind: GradeKind = args.kind.parse().map_err(RosterError::Validation)?;
    let day = parse_day(args.date.as_deref())?;

    let recorded = RecordService::new(storage).record_grade(&args.code, kind, args.score, args.max, day)?;

    println!(
        "Recorded {} for {}: {}/{} ({}%)",
        recorded.grade.kind,
        recorded.student.name,
        recorded.grade.score,
        recorded.grade.max,
        recorded.grade.percent()
    );
    if recorded.attendance_marked {
        println!("Also marked present on {}", day);
    }
    Ok(())
}

pub fn handle_pay(storage: &Storage, args: PayArgs) -> RosterResult<()> {
    let amount = Money::parse(&args.amount).map_err(|e| {
        RosterError::Validation(format!(
            "Invalid amount '{}'. Use a format like '150' or '150.50'. Error: {}",
            args.amount, e
        ))
    })?;
    let day = parse_day(args.date.as_deref())?;

    let payment = RecordService::new(storage).record_payment(&args.code, amount, &args.note, day)?;

    println!(
        "Recorded payment of {} for {} on {}",
        payment.amount().format_with_symbol(&storage.settings().currency_symbol),
        args.code.trim(),
        day
    );
    Ok(())
}

pub fn handle_history(storage: &Storage, args: HistoryArgs) -> RosterResult<()> {
    let filter = parse_month_filter(&args.month)?;
    let (student, days) = RecordService::new(storage).history(&args.code, filter)?;
    print!(
        "{}",
        format_history(&student, &days, &storage.settings().currency_symbol)
    );
    Ok(())
}
