//! Day normalization.
//!
//! Every date the engine stores or compares is a [`NaiveDate`] produced by a
//! single [`DayPolicy`]. Instants are converted once at the edge, so stored
//! history never carries a time of day or an offset that could shift a
//! completion onto a neighbouring day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which calendar decides where one day ends and the next begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayPolicy {
    /// The machine's local timezone
    #[default]
    Local,
    /// UTC midnight boundaries
    Utc,
    /// A fixed offset chosen by the user, immune to machine timezone changes
    Fixed(FixedOffset),
}

impl DayPolicy {
    /// Calendar day containing `instant`.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            DayPolicy::Local => instant.with_timezone(&Local).date_naive(),
            DayPolicy::Utc => instant.date_naive(),
            DayPolicy::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.day_of(Utc::now())
    }
}

impl fmt::Display for DayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPolicy::Local => write!(f, "local"),
            DayPolicy::Utc => write!(f, "utc"),
            DayPolicy::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for DayPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => Ok(DayPolicy::Local),
            "utc" | "z" => Ok(DayPolicy::Utc),
            _ => trimmed
                .parse::<FixedOffset>()
                .map(DayPolicy::Fixed)
                .map_err(|_| ConfigError::InvalidValue {
                    key: "calendar.day_policy".to_string(),
                    message: format!("'{trimmed}' is not local, utc, or an offset like +09:00"),
                }),
        }
    }
}

impl TryFrom<String> for DayPolicy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayPolicy> for String {
    fn from(policy: DayPolicy) -> Self {
        policy.to_string()
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_day(s: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| ConfigError::InvalidValue {
        key: "date".to_string(),
        message: format!("'{}': {e}", s.trim()),
    })
}
