//! Activity persistence.
//!
//! All activities live in one JSON document, `activities.json`, in the data
//! directory. Dates are stored as plain `YYYY-MM-DD` strings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::activity::Activity;
use crate::error::{Result, StorageError};

const STORE_VERSION: u32 = 1;

/// On-disk document.
#[derive(Serialize, Deserialize)]
struct ActivitiesFile {
    version: u32,
    #[serde(default)]
    activities: Vec<Activity>,
}

/// JSON-file storage for activities.
pub struct ActivityStore {
    path: PathBuf,
}

impl ActivityStore {
    /// Open the store in the data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::with_path(data_dir()?.join("activities.json")))
    }

    /// Store backed by an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every activity. A missing file is an empty store.
    pub fn load_all(&self) -> Result<Vec<Activity>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let file: ActivitiesFile =
            serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        if file.version != STORE_VERSION {
            return Err(StorageError::UnsupportedVersion {
                path: self.path.clone(),
                found: file.version,
                expected: STORE_VERSION,
            }
            .into());
        }

        if let Some((id, date)) = file
            .activities
            .iter()
            .find_map(|a| a.conflicting_date().map(|d| (a.id.clone(), d)))
        {
            return Err(StorageError::InvalidRecord {
                path: self.path.clone(),
                id,
                date,
            }
            .into());
        }

        Ok(file.activities)
    }

    /// Replace the stored activities.
    pub fn save_all(&self, activities: &[Activity]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = ActivitiesFile {
            version: STORE_VERSION,
            activities: activities.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), count = activities.len(), "activities saved");
        Ok(())
    }

    /// Look up an activity by exact id, name (case-insensitive), or unique
    /// id prefix, in that order.
    pub fn find(&self, key: &str) -> Result<Activity> {
        let activities = self.load_all()?;
        find_in(&activities, key).cloned()
    }

    /// Insert or replace by id.
    pub fn upsert(&self, activity: &Activity) -> Result<()> {
        let mut activities = self.load_all()?;
        match activities.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => *existing = activity.clone(),
            None => activities.push(activity.clone()),
        }
        self.save_all(&activities)
    }

    /// Remove the activity matching `key` and return it.
    pub fn remove(&self, key: &str) -> Result<Activity> {
        let mut activities = self.load_all()?;
        let id = find_in(&activities, key)?.id.clone();
        let index = activities
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        let removed = activities.remove(index);
        self.save_all(&activities)?;
        Ok(removed)
    }
}

fn find_in<'a>(activities: &'a [Activity], key: &str) -> Result<&'a Activity> {
    let key = key.trim();
    if key.is_empty() {
        return Err(StorageError::NotFound(key.to_string()).into());
    }

    if let Some(exact) = activities.iter().find(|a| a.id == key) {
        return Ok(exact);
    }

    let by_name: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.name.eq_ignore_ascii_case(key))
        .collect();
    let candidates = if by_name.is_empty() {
        activities.iter().filter(|a| a.id.starts_with(key)).collect()
    } else {
        by_name
    };

    match candidates.as_slice() {
        [single] => Ok(*single),
        [] => Err(StorageError::NotFound(key.to_string()).into()),
        many => Err(StorageError::Ambiguous {
            key: key.to_string(),
            count: many.len(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::schedule::ScheduleRule;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, ActivityStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ActivityStore::with_path(dir.path().join("activities.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn store_roundtrip() {
        let (_dir, store) = temp_store();
        let mut a = Activity::new("Meditate", ScheduleRule::Weekdays, day(1));
        a.mark_completed(day(2));
        a.mark_skipped(day(3));
        store.upsert(&a).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![a]);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let (_dir, store) = temp_store();
        let mut a = Activity::new("Meditate", ScheduleRule::Daily, day(1));
        store.upsert(&a).unwrap();
        a.mark_completed(day(1));
        store.upsert(&a).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].is_completed_on(day(1)));
    }

    #[test]
    fn find_by_prefix_and_name() {
        let (_dir, store) = temp_store();
        let a = Activity::new("Meditate", ScheduleRule::Daily, day(1));
        let b = Activity::new("Read", ScheduleRule::Daily, day(1));
        store.save_all(&[a.clone(), b.clone()]).unwrap();

        assert_eq!(store.find(&a.id).unwrap().id, a.id);
        assert_eq!(store.find(&b.id[..8]).unwrap().id, b.id);
        assert_eq!(store.find("meditate").unwrap().id, a.id);
        assert!(matches!(
            store.find("Swim"),
            Err(CoreError::Storage(StorageError::NotFound(_)))
        ));
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let (_dir, store) = temp_store();
        let a = Activity::new("Walk", ScheduleRule::Daily, day(1));
        let b = Activity::new("walk", ScheduleRule::Weekends, day(1));
        store.save_all(&[a, b]).unwrap();
        assert!(matches!(
            store.find("WALK"),
            Err(CoreError::Storage(StorageError::Ambiguous { count: 2, .. }))
        ));
    }

    #[test]
    fn name_match_beats_id_prefix() {
        let (_dir, store) = temp_store();
        let mut stretch = Activity::new("Stretch", ScheduleRule::Daily, day(1));
        stretch.id = "bed0c1a2-0000-4000-8000-000000000000".to_string();
        let bed = Activity::new("bed", ScheduleRule::Daily, day(1));
        store.save_all(&[stretch.clone(), bed.clone()]).unwrap();

        assert_eq!(store.find("bed").unwrap().id, bed.id);
        assert_eq!(store.find("BED").unwrap().id, bed.id);
        assert_eq!(store.find("bed0").unwrap().id, stretch.id);
    }

    #[test]
    fn rejects_date_both_completed_and_skipped() {
        let (_dir, store) = temp_store();
        let json = r#"{"version": 1, "activities": [{
            "id": "x", "name": "Overlap", "created_date": "2024-01-01",
            "schedule": {"type": "daily"},
            "completion_dates": ["2024-01-02", "2024-01-02"],
            "skip_dates": ["2024-01-02"]
        }]}"#;
        std::fs::write(store.path(), json).unwrap();

        match store.load_all() {
            Err(CoreError::Storage(StorageError::InvalidRecord { id, date, .. })) => {
                assert_eq!(id, "x");
                assert_eq!(date, day(2));
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
        assert!(store.find("Overlap").is_err());
    }

    #[test]
    fn remove_deletes_one() {
        let (_dir, store) = temp_store();
        let a = Activity::new("Meditate", ScheduleRule::Daily, day(1));
        let b = Activity::new("Read", ScheduleRule::Daily, day(1));
        store.save_all(&[a.clone(), b.clone()]).unwrap();

        let removed = store.remove("Read").unwrap();
        assert_eq!(removed.id, b.id);
        assert_eq!(store.load_all().unwrap(), vec![a]);
    }

    #[test]
    fn rejects_unknown_version() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path(), r#"{"version": 7, "activities": []}"#).unwrap();
        assert!(matches!(
            store.load_all(),
            Err(CoreError::Storage(StorageError::UnsupportedVersion { found: 7, .. }))
        ));
    }

    #[test]
    fn rejects_invalid_weekday_in_file() {
        let (_dir, store) = temp_store();
        let json = r#"{"version": 1, "activities": [{
            "id": "x", "name": "Bad", "created_date": "2024-01-01",
            "schedule": {"type": "custom", "days": [0]}
        }]}"#;
        std::fs::write(store.path(), json).unwrap();
        assert!(matches!(
            store.load_all(),
            Err(CoreError::Storage(StorageError::Corrupt { .. }))
        ));
    }
}
