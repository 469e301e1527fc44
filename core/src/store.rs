//! Key-value persistence over SQLite.
//!
//! Each logical record set lives under one key as a JSON document. The store
//! knows nothing about reconciliation or derivation; it only reads and
//! writes whole collections, which the service layer treats as atomic
//! read-modify-write units.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{DailyLog, DailyTargets, MetricWeight, UserProfile};

const KEY_USER: &str = "user";
const KEY_DAILY_TARGETS: &str = "daily_targets";
const KEY_DAILY_LOGS: &str = "daily_logs";
const KEY_WEIGHT_METRICS: &str = "weight_metrics";
const KEY_ONBOARDING_COMPLETE: &str = "onboarding_complete";

const ALL_KEYS: &[&str] = &[
    KEY_USER,
    KEY_DAILY_TARGETS,
    KEY_DAILY_LOGS,
    KEY_WEIGHT_METRICS,
    KEY_ONBOARDING_COMPLETE,
];

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let store = Store { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Store { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    // --- Raw key-value access ---

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read '{key}'"))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now],
            )
            .with_context(|| format!("Failed to write '{key}'"))?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt record under '{key}'"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.set_raw(key, &serde_json::to_string(value)?)
    }

    // --- Typed accessors ---

    pub fn user_profile(&self) -> Result<Option<UserProfile>> {
        self.get_json(KEY_USER)
    }

    pub fn set_user_profile(&self, profile: &UserProfile) -> Result<()> {
        self.set_json(KEY_USER, profile)
    }

    pub fn daily_targets(&self) -> Result<Option<DailyTargets>> {
        self.get_json(KEY_DAILY_TARGETS)
    }

    pub fn set_daily_targets(&self, targets: &DailyTargets) -> Result<()> {
        self.set_json(KEY_DAILY_TARGETS, targets)
    }

    pub fn daily_logs(&self) -> Result<Vec<DailyLog>> {
        Ok(self.get_json(KEY_DAILY_LOGS)?.unwrap_or_default())
    }

    pub fn set_daily_logs(&self, logs: &[DailyLog]) -> Result<()> {
        self.set_json(KEY_DAILY_LOGS, &logs)
    }

    pub fn weight_metrics(&self) -> Result<Vec<MetricWeight>> {
        Ok(self.get_json(KEY_WEIGHT_METRICS)?.unwrap_or_default())
    }

    pub fn set_weight_metrics(&self, metrics: &[MetricWeight]) -> Result<()> {
        self.set_json(KEY_WEIGHT_METRICS, &metrics)
    }

    pub fn onboarding_complete(&self) -> Result<bool> {
        Ok(self.get_raw(KEY_ONBOARDING_COMPLETE)?.as_deref() == Some("true"))
    }

    pub fn set_onboarding_complete(&self) -> Result<()> {
        self.set_raw(KEY_ONBOARDING_COMPLETE, "true")
    }

    /// Remove every record set. Full data reset.
    pub fn clear_all(&self) -> Result<()> {
        for key in ALL_KEYS {
            self.conn
                .execute("DELETE FROM kv WHERE key = ?1", params![key])
                .with_context(|| format!("Failed to clear '{key}'"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietStyle, Goal};

    fn sample_profile() -> UserProfile {
        UserProfile {
            goal: Goal::Maintain,
            diet_style: DietStyle::Omnivore,
            reset_time: "04:00".to_string(),
            reminders_on: false,
            reminder_times: vec![],
            sex: None,
            current_weight: None,
            target_weight: None,
            portion_plan: None,
        }
    }

    #[test]
    fn test_empty_store_defaults() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.user_profile().unwrap().is_none());
        assert!(store.daily_targets().unwrap().is_none());
        assert!(store.daily_logs().unwrap().is_empty());
        assert!(store.weight_metrics().unwrap().is_empty());
        assert!(!store.onboarding_complete().unwrap());
    }

    #[test]
    fn test_profile_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let profile = sample_profile();
        store.set_user_profile(&profile).unwrap();
        assert_eq!(store.user_profile().unwrap().unwrap(), profile);
    }

    #[test]
    fn test_logs_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let logs = vec![
            DailyLog::new("2024-06-14".to_string()),
            DailyLog::new("2024-06-15".to_string()),
        ];
        store.set_daily_logs(&logs).unwrap();
        assert_eq!(store.daily_logs().unwrap(), logs);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let store = Store::open_in_memory().unwrap();
        store
            .set_daily_logs(&[DailyLog::new("2024-06-14".to_string())])
            .unwrap();
        store
            .set_daily_logs(&[DailyLog::new("2024-06-15".to_string())])
            .unwrap();
        let logs = store.daily_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].date, "2024-06-15");
    }

    #[test]
    fn test_onboarding_flag() {
        let store = Store::open_in_memory().unwrap();
        assert!(!store.onboarding_complete().unwrap());
        store.set_onboarding_complete().unwrap();
        assert!(store.onboarding_complete().unwrap());
    }

    #[test]
    fn test_clear_all() {
        let store = Store::open_in_memory().unwrap();
        store.set_user_profile(&sample_profile()).unwrap();
        store
            .set_daily_logs(&[DailyLog::new("2024-06-15".to_string())])
            .unwrap();
        store.set_onboarding_complete().unwrap();

        store.clear_all().unwrap();
        assert!(store.user_profile().unwrap().is_none());
        assert!(store.daily_logs().unwrap().is_empty());
        assert!(!store.onboarding_complete().unwrap());
    }

    #[test]
    fn test_on_disk_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portions.db");

        {
            let store = Store::open(&path).unwrap();
            store.set_user_profile(&sample_profile()).unwrap();
            store
                .set_weight_metrics(&[MetricWeight {
                    date: "2024-06-15".to_string(),
                    value: 165.2,
                }])
                .unwrap();
        }

        let store = Store::open(&path).unwrap();
        assert_eq!(store.user_profile().unwrap().unwrap(), sample_profile());
        let metrics = store.weight_metrics().unwrap();
        assert_eq!(metrics.len(), 1);
        assert!((metrics[0].value - 165.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        let store = Store::open_in_memory().unwrap();
        store.set_raw(KEY_DAILY_LOGS, "not json").unwrap();
        assert!(store.daily_logs().is_err());
    }
}
