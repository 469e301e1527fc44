//! Daily-log reconciliation.
//!
//! The invariant: at most one log record per calendar date, and exactly one
//! record for the current logging day. The logging day is keyed by
//! [`crate::dates::effective_date`], so a night owl logging at 01:30 with a
//! 04:00 reset still writes to the previous calendar date's record, and the
//! first touch after the reset instant starts a fresh zero record.

use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::{NaiveDateTime, NaiveTime};

use crate::dates::{date_key, effective_date};
use crate::models::{ALCOHOL_DAILY_LIMIT, DailyLog, FoodGroup};

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// Deduplicated collection, including the resolved today record.
    pub logs: Vec<DailyLog>,
    /// The record for the current logging day (also present in `logs`).
    pub today: DailyLog,
    /// True when the collection differs from the input and must be
    /// persisted.
    pub changed: bool,
    pub duplicates_removed: usize,
}

/// Collapse duplicate dates, keeping the last-encountered record for each
/// date and preserving first-occurrence order.
#[must_use]
pub fn deduplicate(logs: Vec<DailyLog>) -> (Vec<DailyLog>, usize) {
    let input_len = logs.len();
    let mut order: Vec<String> = Vec::with_capacity(input_len);
    let mut by_date: HashMap<String, DailyLog> = HashMap::with_capacity(input_len);

    for log in logs {
        if !by_date.contains_key(&log.date) {
            order.push(log.date.clone());
        }
        by_date.insert(log.date.clone(), log);
    }

    let deduped: Vec<DailyLog> = order
        .into_iter()
        .filter_map(|date| by_date.remove(&date))
        .collect();
    let removed = input_len - deduped.len();
    (deduped, removed)
}

/// One full reconciliation pass: dedup, resolve the current logging day,
/// create its record if missing. Idempotent: running it twice on its own
/// output with the same clock is a no-op.
#[must_use]
pub fn reconcile(logs: Vec<DailyLog>, now: NaiveDateTime, reset: NaiveTime) -> Reconciled {
    let (mut logs, duplicates_removed) = deduplicate(logs);
    let today_key = date_key(effective_date(now, reset));

    let mut created = false;
    let today = match logs.iter().find(|l| l.date == today_key) {
        Some(existing) => existing.clone(),
        None => {
            let fresh = DailyLog::new(today_key);
            logs.push(fresh.clone());
            created = true;
            fresh
        }
    };

    Reconciled {
        logs,
        today,
        changed: duplicates_removed > 0 || created,
        duplicates_removed,
    }
}

/// Add portions to a food group. Alcohol has a hard daily ceiling; hitting
/// it is a rejection surfaced to the user, never a silent clamp.
pub fn increment(log: &mut DailyLog, group: FoodGroup, count: u32) -> Result<()> {
    let current = log.get(group);
    let next = current.saturating_add(count);
    if group == FoodGroup::Alcohol && next > ALCOHOL_DAILY_LIMIT {
        bail!(
            "Daily alcohol limit reached ({current}/{ALCOHOL_DAILY_LIMIT}). \
             Not logging more today."
        );
    }
    log.set(group, next);
    Ok(())
}

/// Remove portions from a food group, saturating at zero.
pub fn decrement(log: &mut DailyLog, group: FoodGroup, count: u32) {
    let current = log.get(group);
    log.set(group, current.saturating_sub(count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn at(date: &str, time: &str) -> NaiveDateTime {
        let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let t = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
        d.and_time(t)
    }

    fn reset(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn log_with(date: &str, protein: u32) -> DailyLog {
        let mut log = DailyLog::new(date.to_string());
        log.protein = protein;
        log
    }

    #[test]
    fn test_dedup_keeps_last_encountered() {
        let logs = vec![
            log_with("2024-01-05", 1),
            log_with("2024-01-06", 2),
            log_with("2024-01-05", 3),
        ];
        let (deduped, removed) = deduplicate(logs);
        assert_eq!(removed, 1);
        assert_eq!(deduped.len(), 2);
        // First-occurrence order, last-encountered value
        assert_eq!(deduped[0].date, "2024-01-05");
        assert_eq!(deduped[0].protein, 3);
        assert_eq!(deduped[1].date, "2024-01-06");
    }

    #[test]
    fn test_dedup_no_duplicates_is_identity() {
        let logs = vec![log_with("2024-01-05", 1), log_with("2024-01-06", 2)];
        let (deduped, removed) = deduplicate(logs.clone());
        assert_eq!(removed, 0);
        assert_eq!(deduped, logs);
    }

    #[test]
    fn test_reconcile_creates_missing_today() {
        let out = reconcile(vec![], at("2024-06-15", "10:00"), reset("04:00"));
        assert!(out.changed);
        assert_eq!(out.logs.len(), 1);
        assert_eq!(out.today.date, "2024-06-15");
        assert_eq!(out.today, DailyLog::new("2024-06-15".to_string()));
    }

    #[test]
    fn test_reconcile_keeps_existing_today() {
        let logs = vec![log_with("2024-06-15", 3)];
        let out = reconcile(logs.clone(), at("2024-06-15", "10:00"), reset("04:00"));
        assert!(!out.changed);
        assert_eq!(out.logs, logs);
        assert_eq!(out.today.protein, 3);
    }

    #[test]
    fn test_reconcile_idempotent() {
        let logs = vec![
            log_with("2024-06-14", 2),
            log_with("2024-06-14", 4),
            log_with("2024-06-13", 1),
        ];
        let now = at("2024-06-15", "10:00");
        let first = reconcile(logs, now, reset("04:00"));
        assert!(first.changed);

        let second = reconcile(first.logs.clone(), now, reset("04:00"));
        assert!(!second.changed);
        assert_eq!(second.logs, first.logs);
    }

    #[test]
    fn test_reconcile_dedup_shrinks_collection() {
        let logs = vec![
            log_with("2024-01-05", 1),
            log_with("2024-01-05", 9),
            log_with("2024-06-15", 0),
        ];
        let out = reconcile(logs, at("2024-06-15", "10:00"), reset("04:00"));
        assert_eq!(out.duplicates_removed, 1);
        assert_eq!(out.logs.len(), 2);
        let jan = out.logs.iter().find(|l| l.date == "2024-01-05").unwrap();
        assert_eq!(jan.protein, 9);
    }

    #[test]
    fn test_no_reset_before_rollover_time() {
        // 03:00 with a 04:00 reset: yesterday's record is still the current
        // logging day, so nothing is created or replaced.
        let logs = vec![log_with("2024-06-14", 5)];
        let out = reconcile(logs.clone(), at("2024-06-15", "03:00"), reset("04:00"));
        assert!(!out.changed);
        assert_eq!(out.today.date, "2024-06-14");
        assert_eq!(out.today.protein, 5);
        assert_eq!(out.logs, logs);
    }

    #[test]
    fn test_fresh_record_after_rollover_time() {
        let logs = vec![log_with("2024-06-14", 5)];
        let out = reconcile(logs, at("2024-06-15", "04:00"), reset("04:00"));
        assert!(out.changed);
        assert_eq!(out.today.date, "2024-06-15");
        assert_eq!(out.today.protein, 0);
        // Yesterday's record is untouched history
        assert_eq!(out.logs.len(), 2);
        assert_eq!(out.logs[0].protein, 5);
    }

    #[test]
    fn test_increment() {
        let mut log = DailyLog::new("2024-06-15".to_string());
        increment(&mut log, FoodGroup::Veggies, 1).unwrap();
        increment(&mut log, FoodGroup::Veggies, 2).unwrap();
        assert_eq!(log.veggies, 3);
    }

    #[test]
    fn test_alcohol_ceiling_rejected_not_clamped() {
        let mut log = DailyLog::new("2024-06-15".to_string());
        increment(&mut log, FoodGroup::Alcohol, 1).unwrap();
        increment(&mut log, FoodGroup::Alcohol, 1).unwrap();
        assert_eq!(log.alcohol, 2);

        assert!(increment(&mut log, FoodGroup::Alcohol, 1).is_err());
        assert_eq!(log.alcohol, 2);
    }

    #[test]
    fn test_increment_saturates_instead_of_overflowing() {
        let mut log = DailyLog::new("2024-06-15".to_string());
        log.water = u32::MAX - 1;
        increment(&mut log, FoodGroup::Water, 5).unwrap();
        assert_eq!(log.water, u32::MAX);

        // The ceiling check must not overflow either
        let mut log = DailyLog::new("2024-06-15".to_string());
        log.alcohol = 1;
        assert!(increment(&mut log, FoodGroup::Alcohol, u32::MAX).is_err());
        assert_eq!(log.alcohol, 1);
    }

    #[test]
    fn test_alcohol_bulk_increment_past_ceiling_rejected() {
        let mut log = DailyLog::new("2024-06-15".to_string());
        assert!(increment(&mut log, FoodGroup::Alcohol, 3).is_err());
        assert_eq!(log.alcohol, 0);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut log = DailyLog::new("2024-06-15".to_string());
        decrement(&mut log, FoodGroup::Water, 1);
        assert_eq!(log.water, 0);

        log.water = 2;
        decrement(&mut log, FoodGroup::Water, 5);
        assert_eq!(log.water, 0);
    }
}
