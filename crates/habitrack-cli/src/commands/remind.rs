//! Reminder command for CLI.

use clap::Args;
use habitrack_core::{arm_due_reminders, Notifier, PlannedReminder};

use super::{short_id, CliResult, Context};

#[derive(Args)]
pub struct RemindArgs {
    /// Day to plan for (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<String>,
}

/// Prints each reminder instead of scheduling an OS notification.
struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn arm(&mut self, reminder: &PlannedReminder) -> habitrack_core::Result<()> {
        println!(
            "{}  {} ({})",
            reminder.fire_at.format("%H:%M"),
            reminder.name,
            short_id(&reminder.activity_id)
        );
        Ok(())
    }
}

pub fn run(args: RemindArgs) -> CliResult {
    let ctx = Context::load_lenient()?;
    if !ctx.config.reminders.enabled {
        println!("Reminders are disabled (reminders.enabled = false).");
        return Ok(());
    }

    let date = ctx.resolve_date(args.date.as_deref())?;
    let activities = ctx.store.load_all()?;
    let armed = arm_due_reminders(&activities, date, &mut StdoutNotifier)?;
    println!("{armed} reminder(s) armed for {date}");
    Ok(())
}
