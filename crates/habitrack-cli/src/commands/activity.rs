//! Activity management commands for CLI.

use clap::Subcommand;
use habitrack_core::storage::parse_time_of_day;
use habitrack_core::{parse_day, Activity, ScheduleRule};
use serde::Serialize;

use super::{print_json, short_id, CliResult, Context};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Create a new activity
    Add {
        /// Activity name
        name: String,
        /// daily, weekdays, weekends, once, or custom:<days> (e.g. custom:mon,wed,fri)
        #[arg(long, default_value = "daily")]
        schedule: String,
        /// First day the activity can be due (YYYY-MM-DD, default: today)
        #[arg(long)]
        created: Option<String>,
        /// Daily reminder time (HH:MM); without a value uses reminders.default_time
        #[arg(long, value_name = "HH:MM", num_args = 0..=1, default_missing_value = "default")]
        remind: Option<String>,
    },
    /// List activities with their current streak
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one activity
    Show {
        /// Id, id prefix, or name
        key: String,
        #[arg(long)]
        json: bool,
    },
    /// Replace an activity's schedule
    Schedule {
        /// Id, id prefix, or name
        key: String,
        /// New schedule rule
        rule: String,
    },
    /// Delete an activity
    Remove {
        /// Id, id prefix, or name
        key: String,
    },
}

#[derive(Serialize)]
struct ActivitySummary<'a> {
    #[serde(flatten)]
    activity: &'a Activity,
    due_today: bool,
    current_streak: u32,
}

pub fn run(action: ActivityAction) -> CliResult {
    let ctx = Context::load()?;
    let today = ctx.today();

    match action {
        ActivityAction::Add {
            name,
            schedule,
            created,
            remind,
        } => {
            let rule: ScheduleRule = schedule.parse()?;
            let created = match created {
                Some(s) => parse_day(&s)?,
                None => today,
            };
            if rule.is_never_due() {
                tracing::warn!(%rule, "custom schedule has no weekdays; the activity will never be due");
            }
            let mut activity = Activity::new(name, rule, created);
            if let Some(time) = remind {
                let time = if time == "default" {
                    ctx.config.default_reminder_time()?
                } else {
                    parse_time_of_day(&time)?
                };
                activity = activity.with_reminder(time);
            }
            ctx.store.upsert(&activity)?;
            println!("Activity created: {}", activity.id);
        }
        ActivityAction::List { json } => {
            let activities = ctx.store.load_all()?;
            if json {
                let summaries: Vec<_> = activities
                    .iter()
                    .map(|a| ActivitySummary {
                        activity: a,
                        due_today: a.is_due_on(today),
                        current_streak: a.current_streak(today),
                    })
                    .collect();
                print_json(&summaries)?;
            } else if activities.is_empty() {
                println!("No activities.");
            } else {
                for a in &activities {
                    println!(
                        "{}  {:<24} {:<16} streak {}{}",
                        short_id(&a.id),
                        a.name,
                        a.schedule.to_string(),
                        a.current_streak(today),
                        if a.is_due_on(today) { "  (due today)" } else { "" },
                    );
                }
            }
        }
        ActivityAction::Show { key, json } => {
            let a = ctx.store.find(&key)?;
            if json {
                print_json(&ActivitySummary {
                    activity: &a,
                    due_today: a.is_due_on(today),
                    current_streak: a.current_streak(today),
                })?;
            } else {
                println!("{} ({})", a.name, a.id);
                println!("  schedule:  {}", a.schedule);
                println!("  created:   {}", a.created_date);
                if let Some(time) = a.reminder {
                    println!("  reminder:  {}", time.format("%H:%M"));
                }
                println!("  completed: {} day(s)", a.completion_dates.len());
                println!("  skipped:   {} day(s)", a.skip_dates.len());
                println!("  streak:    {}", a.current_streak(today));
            }
        }
        ActivityAction::Schedule { key, rule } => {
            let rule: ScheduleRule = rule.parse()?;
            if rule.is_never_due() {
                tracing::warn!(%rule, "custom schedule has no weekdays; the activity will never be due");
            }
            let mut a = ctx.store.find(&key)?;
            a.set_schedule(rule);
            ctx.store.upsert(&a)?;
            println!("{} now scheduled {}", a.name, a.schedule);
        }
        ActivityAction::Remove { key } => {
            let removed = ctx.store.remove(&key)?;
            println!("Activity removed: {}", removed.id);
        }
    }
    Ok(())
}
