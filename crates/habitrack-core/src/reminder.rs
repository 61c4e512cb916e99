//! Daily reminder planning.
//!
//! The planner decides which activities deserve a notification today; the
//! actual delivery is behind the [`Notifier`] trait so the caller chooses the
//! backend (desktop notifications, stdout, a test recorder).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::error::Result;

/// A notification to arm for today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedReminder {
    pub activity_id: String,
    pub name: String,
    pub fire_at: NaiveDateTime,
}

/// Delivery backend for planned reminders.
pub trait Notifier {
    fn arm(&mut self, reminder: &PlannedReminder) -> Result<()>;
}

/// Reminders for activities that have a reminder time, are due on `today`,
/// and have nothing recorded for `today` yet. Sorted by fire time, then name.
pub fn plan_reminders(activities: &[Activity], today: NaiveDate) -> Vec<PlannedReminder> {
    let mut planned: Vec<PlannedReminder> = activities
        .iter()
        .filter(|a| a.is_due_on(today))
        .filter(|a| !a.is_completed_on(today) && !a.is_skipped_on(today))
        .filter_map(|a| {
            a.reminder.map(|time| PlannedReminder {
                activity_id: a.id.clone(),
                name: a.name.clone(),
                fire_at: today.and_time(time),
            })
        })
        .collect();

    planned.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then_with(|| a.name.cmp(&b.name)));
    planned
}

/// Plan today's reminders and hand each to `notifier`. Returns how many were armed.
///
/// # Errors
///
/// Stops at and returns the first error raised by the notifier.
pub fn arm_due_reminders<N: Notifier + ?Sized>(
    activities: &[Activity],
    today: NaiveDate,
    notifier: &mut N,
) -> Result<usize> {
    let planned = plan_reminders(activities, today);
    for reminder in &planned {
        notifier.arm(reminder)?;
        tracing::info!(
            activity = %reminder.activity_id,
            fire_at = %reminder.fire_at,
            "reminder armed"
        );
    }
    Ok(planned.len())
}
