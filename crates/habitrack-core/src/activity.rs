//! Tracked activities and the streak engine.
//!
//! An [`Activity`] pairs a [`ScheduleRule`] with the days it was marked done
//! or skipped. A day is in at most one of the two sets.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::ScheduleRule;

/// Presentation state of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The schedule expects nothing on this day
    NotDue,
    /// Due and marked done
    Completed,
    /// Due and explicitly skipped
    Skipped,
    /// Due, unmarked, and not yet over
    Pending,
    /// Due, unmarked, and already in the past
    Missed,
}

impl DayStatus {
    pub fn is_due(&self) -> bool {
        !matches!(self, DayStatus::NotDue)
    }
}

/// One cell of a calendar strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub status: DayStatus,
}

/// A recurring (or one-off) activity and its history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub id: String,
    pub name: String,
    /// First day the activity can be due
    pub created_date: NaiveDate,
    pub schedule: ScheduleRule,
    #[serde(default)]
    pub completion_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub skip_dates: BTreeSet<NaiveDate>,
    /// Time of day for the reminder notification, if any
    #[serde(default)]
    pub reminder: Option<NaiveTime>,
}

impl Activity {
    pub fn new(name: impl Into<String>, schedule: ScheduleRule, created_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_date,
            schedule,
            completion_dates: BTreeSet::new(),
            skip_dates: BTreeSet::new(),
            reminder: None,
        }
    }

    pub fn with_reminder(mut self, time: NaiveTime) -> Self {
        self.reminder = Some(time);
        self
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.schedule.is_due(self.created_date, date)
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completion_dates.contains(&date)
    }

    pub fn is_skipped_on(&self, date: NaiveDate) -> bool {
        self.skip_dates.contains(&date)
    }

    /// Mark `date` done, clearing any skip on the same day.
    pub fn mark_completed(&mut self, date: NaiveDate) {
        self.skip_dates.remove(&date);
        if self.completion_dates.insert(date) {
            tracing::debug!(activity = %self.id, %date, "marked completed");
        }
    }

    /// Mark `date` skipped, clearing any completion on the same day.
    pub fn mark_skipped(&mut self, date: NaiveDate) {
        self.completion_dates.remove(&date);
        if self.skip_dates.insert(date) {
            tracing::debug!(activity = %self.id, %date, "marked skipped");
        }
    }

    /// Remove any mark on `date`. Returns whether something was removed.
    pub fn clear_status(&mut self, date: NaiveDate) -> bool {
        let removed = self.completion_dates.remove(&date) | self.skip_dates.remove(&date);
        if removed {
            tracing::debug!(activity = %self.id, %date, "cleared status");
        }
        removed
    }

    /// Replace the schedule. History is kept; days that stop being due are
    /// simply ignored by the streak calculation.
    pub fn set_schedule(&mut self, schedule: ScheduleRule) {
        tracing::debug!(activity = %self.id, from = %self.schedule, to = %schedule, "schedule changed");
        self.schedule = schedule;
    }

    /// Consecutive completed due days ending at `as_of`, walking backward.
    ///
    /// Days that are not due are transparent. The walk stops at the first due
    /// day without a completion, skipped or not, which may be `as_of` itself.
    pub fn current_streak(&self, as_of: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut cursor = as_of;

        while cursor >= self.created_date {
            if self.is_due_on(cursor) {
                if !self.is_completed_on(cursor) {
                    break;
                }
                streak += 1;
            }
            match cursor.pred_opt() {
                Some(prev) => cursor = prev,
                None => break,
            }
        }

        streak
    }

    /// Longest run of consecutive completed due days between the creation
    /// date and `as_of`, with the same break rules as [`current_streak`].
    ///
    /// [`current_streak`]: Activity::current_streak
    pub fn longest_streak(&self, as_of: NaiveDate) -> u32 {
        let mut longest = 0;
        let mut run = 0;

        for day in self.created_date.iter_days().take_while(|d| *d <= as_of) {
            if !self.is_due_on(day) {
                continue;
            }
            if self.is_completed_on(day) {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 0;
            }
        }

        longest
    }

    /// Status of `date` as seen on `today`.
    pub fn status_on(&self, date: NaiveDate, today: NaiveDate) -> DayStatus {
        if !self.is_due_on(date) {
            DayStatus::NotDue
        } else if self.is_completed_on(date) {
            DayStatus::Completed
        } else if self.is_skipped_on(date) {
            DayStatus::Skipped
        } else if date < today {
            DayStatus::Missed
        } else {
            DayStatus::Pending
        }
    }

    /// First date recorded as both completed and skipped, if any.
    pub fn conflicting_date(&self) -> Option<NaiveDate> {
        self.completion_dates.intersection(&self.skip_dates).next().copied()
    }

    /// `days` cells ending at `as_of`, oldest first.
    pub fn week_strip(&self, as_of: NaiveDate, days: u32) -> Vec<DayCell> {
        if days == 0 {
            return Vec::new();
        }
        let start = as_of
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);

        start
            .iter_days()
            .take_while(|d| *d <= as_of)
            .map(|date| DayCell {
                date,
                weekday: date.weekday(),
                status: self.status_on(date, as_of),
            })
            .collect()
    }
}
