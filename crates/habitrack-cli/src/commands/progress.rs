//! Streak and calendar strip commands for CLI.

use clap::Args;
use habitrack_core::storage::check_strip_days;
use habitrack_core::{DayCell, DayStatus};
use serde::Serialize;

use super::{print_json, CliResult, Context};

#[derive(Args)]
pub struct StreakArgs {
    /// Id, id prefix, or name
    key: String,
    /// Reference day (YYYY-MM-DD, default: today)
    #[arg(long)]
    as_of: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct WeekArgs {
    /// Id, id prefix, or name
    key: String,
    /// Last day of the strip (YYYY-MM-DD, default: today)
    #[arg(long)]
    as_of: Option<String>,
    /// Number of days, 1-31 (default: display.strip_days)
    #[arg(long)]
    days: Option<u32>,
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StreakReport<'a> {
    id: &'a str,
    name: &'a str,
    as_of: chrono::NaiveDate,
    current_streak: u32,
    longest_streak: u32,
}

fn status_label(status: DayStatus) -> &'static str {
    match status {
        DayStatus::NotDue => "-",
        DayStatus::Completed => "done",
        DayStatus::Skipped => "skipped",
        DayStatus::Pending => "pending",
        DayStatus::Missed => "missed",
    }
}

pub fn run_streak(args: StreakArgs) -> CliResult {
    let ctx = Context::load()?;
    let as_of = ctx.resolve_date(args.as_of.as_deref())?;
    let activity = ctx.store.find(&args.key)?;

    let report = StreakReport {
        id: &activity.id,
        name: &activity.name,
        as_of,
        current_streak: activity.current_streak(as_of),
        longest_streak: activity.longest_streak(as_of),
    };

    if args.json {
        print_json(&report)?;
    } else {
        println!("{}: current streak {}, longest {}", report.name, report.current_streak, report.longest_streak);
    }
    Ok(())
}

pub fn run_week(args: WeekArgs) -> CliResult {
    let ctx = Context::load()?;
    let as_of = ctx.resolve_date(args.as_of.as_deref())?;
    let days = args.days.unwrap_or(ctx.config.display.strip_days);
    check_strip_days("--days", days)?;
    let activity = ctx.store.find(&args.key)?;

    let strip: Vec<DayCell> = activity.week_strip(as_of, days);

    if args.json {
        print_json(&strip)?;
    } else {
        println!("{} ({})", activity.name, activity.schedule);
        for cell in &strip {
            println!("  {} {}  {}", cell.weekday, cell.date, status_label(cell.status));
        }
        println!("  streak {}", activity.current_streak(as_of));
    }
    Ok(())
}
