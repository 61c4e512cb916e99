//! Subcommand implementations and the state they share.

pub mod activity;
pub mod config;
pub mod mark;
pub mod progress;
pub mod remind;

use chrono::NaiveDate;
use habitrack_core::{parse_day, ActivityStore, Config};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Configuration and store, loaded once per invocation.
pub struct Context {
    pub config: Config,
    pub store: ActivityStore,
}

impl Context {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            config: Config::load()?,
            store: ActivityStore::open()?,
        })
    }

    /// Like [`Context::load`], but a broken config falls back to defaults.
    pub fn load_lenient() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            config: Config::load_or_default(),
            store: ActivityStore::open()?,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.config.day_policy().today()
    }

    /// `--date` value if given, otherwise today under the configured day policy.
    pub fn resolve_date(&self, date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
        match date {
            Some(s) => Ok(parse_day(s)?),
            None => Ok(self.today()),
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// First eight characters of an id, enough to address it on the command line.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
