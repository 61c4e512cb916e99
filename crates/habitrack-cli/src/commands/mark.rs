//! Day marking commands for CLI.

use clap::{Args, Subcommand};

use super::{CliResult, Context};

#[derive(Args)]
pub struct MarkTarget {
    /// Id, id prefix, or name
    key: String,
    /// Day to mark (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<String>,
}

#[derive(Subcommand)]
pub enum MarkAction {
    /// Mark a day as completed
    Done(MarkTarget),
    /// Mark a day as explicitly skipped
    Skip(MarkTarget),
    /// Remove any mark from a day
    Clear(MarkTarget),
}

pub fn run(action: MarkAction) -> CliResult {
    let ctx = Context::load()?;

    let (target, verb) = match &action {
        MarkAction::Done(t) => (t, "done"),
        MarkAction::Skip(t) => (t, "skipped"),
        MarkAction::Clear(t) => (t, "cleared"),
    };

    let date = ctx.resolve_date(target.date.as_deref())?;
    let mut activity = ctx.store.find(&target.key)?;

    if !matches!(action, MarkAction::Clear(_)) && !activity.is_due_on(date) {
        tracing::warn!(activity = %activity.name, %date, "day is not due under the current schedule");
    }

    match action {
        MarkAction::Done(_) => activity.mark_completed(date),
        MarkAction::Skip(_) => activity.mark_skipped(date),
        MarkAction::Clear(_) => {
            if !activity.clear_status(date) {
                println!("{} had no mark on {date}", activity.name);
                return Ok(());
            }
        }
    }

    ctx.store.upsert(&activity)?;
    println!(
        "{} {verb} for {date} (streak {})",
        activity.name,
        activity.current_streak(date)
    );
    Ok(())
}
