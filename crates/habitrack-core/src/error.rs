//! Core error types for habitrack-core.
//!
//! Schedule evaluation itself is total; errors only arise when building a
//! schedule from user input, reading/writing the activity store, or handling
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule construction errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Activity store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised while building a [`ScheduleRule`](crate::ScheduleRule).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Weekday number outside 1 (Sunday) ..= 7 (Saturday)
    #[error("invalid weekday {0}: expected 1 (Sunday) through 7 (Saturday)")]
    InvalidWeekday(u8),

    /// Weekday token that is neither a number nor a weekday name
    #[error("invalid weekday '{0}'")]
    UnknownWeekday(String),

    /// Unrecognized rule text
    #[error("unknown schedule rule '{0}' (expected daily, weekdays, weekends, once, or custom:<days>)")]
    UnknownRule(String),
}

/// Activity store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to locate or create the data directory
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),

    /// No activity matched the lookup key
    #[error("No activity matches '{0}'")]
    NotFound(String),

    /// More than one activity matched the lookup key
    #[error("'{key}' matches {count} activities; use a longer id")]
    Ambiguous { key: String, count: usize },

    /// Store file written by an unknown format version
    #[error("Unsupported store version {found} in {path} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    /// A stored activity breaks a record invariant
    #[error("Activity {id} in {path} is both completed and skipped on {date}")]
    InvalidRecord {
        path: PathBuf,
        id: String,
        date: chrono::NaiveDate,
    },

    /// Store file exists but could not be parsed
    #[error("Failed to read activities from {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key not present in the configuration schema
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
