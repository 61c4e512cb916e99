mod config;
pub mod store;

pub use config::{
    check_strip_days, parse_time_of_day, CalendarConfig, Config, DisplayConfig, RemindersConfig,
    MAX_STRIP_DAYS,
};
pub use store::ActivityStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the habitrack data directory, creating it if needed.
///
/// `HABITRACK_HOME` overrides the location outright. Otherwise the directory
/// is `~/.config/habitrack`, or `~/.config/habitrack-dev` when
/// `HABITRACK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("HABITRACK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITRACK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("habitrack-dev")
            } else {
                base_dir.join("habitrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
