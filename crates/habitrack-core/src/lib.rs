//! # Habitrack Core Library
//!
//! Core logic for habitrack, a habit and reminder tracker. The CLI binary is
//! a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Schedule**: recurrence rules deciding which calendar days are due
//! - **Activity**: completion/skip history and the streak engine
//! - **Calendar**: the single day policy that turns instants into dates
//! - **Reminder**: daily reminder planning behind a pluggable [`Notifier`]
//! - **Storage**: JSON activity store and TOML configuration
//!
//! ## Key Components
//!
//! - [`ScheduleRule`]: tagged recurrence rule
//! - [`Activity`]: tracked entity with `current_streak` and day status
//! - [`ActivityStore`]: persistence
//! - [`Config`]: application configuration management

pub mod activity;
pub mod calendar;
pub mod error;
pub mod reminder;
pub mod schedule;
pub mod storage;

pub use activity::{Activity, DayCell, DayStatus};
pub use calendar::{parse_day, DayPolicy};
pub use error::{ConfigError, CoreError, Result, ScheduleError, StorageError};
pub use reminder::{arm_due_reminders, plan_reminders, Notifier, PlannedReminder};
pub use schedule::{weekday_number, ScheduleRule, WeekdaySet};
pub use storage::{ActivityStore, Config};
