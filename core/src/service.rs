use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::dates::{date_key, effective_date, parse_reset_time};
use crate::models::{
    DEFAULT_RESET_TIME, DailyLog, DailyTargets, DietStyle, FoodGroup, Goal, MetricWeight, Sex,
    SizeCategory, UserProfile, validate_reset_time, validate_target_value, validate_weight_input,
};
use crate::plan::{calculate_portion_plan, default_targets, size_category};
use crate::reconcile::{decrement, increment, reconcile};
use crate::store::Store;

/// Answers collected by the onboarding questionnaire.
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    pub goal: Goal,
    pub diet_style: DietStyle,
    pub sex: Option<Sex>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub reset_time: Option<String>,
    pub reminders_on: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingOutcome {
    pub profile: UserProfile,
    pub targets: DailyTargets,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeCategory>,
}

/// Today's reconciled log alongside the targets to measure it against.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySnapshot {
    pub log: DailyLog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<DailyTargets>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub protein_adherence: u32,
    pub veggies_adherence: u32,
    pub streak: u32,
    pub total_days: usize,
}

/// Composition root for everything the screens/commands do. All invariants
/// (one log per date, alcohol ceilings, target validation) are enforced
/// here, never inline in callers.
pub struct PortionService {
    store: Store,
}

impl PortionService {
    pub fn new(db_path: &Path) -> Result<Self> {
        Ok(Self {
            store: Store::open(db_path)?,
        })
    }

    pub fn new_in_memory() -> Result<Self> {
        Ok(Self {
            store: Store::open_in_memory()?,
        })
    }

    // --- Profile & onboarding ---

    pub fn profile(&self) -> Result<Option<UserProfile>> {
        self.store.user_profile()
    }

    pub fn onboarding_complete(&self) -> Result<bool> {
        self.store.onboarding_complete()
    }

    fn reset_time(&self) -> Result<NaiveTime> {
        let configured = self
            .store
            .user_profile()?
            .map_or_else(|| DEFAULT_RESET_TIME.to_string(), |p| p.reset_time);
        parse_reset_time(&configured)
    }

    /// Derive targets from the questionnaire, persist the profile, targets,
    /// and onboarding flag. The composite derivation is used when a current
    /// weight was supplied; otherwise the goal-only table.
    pub fn complete_onboarding(&self, input: OnboardingInput) -> Result<OnboardingOutcome> {
        self.complete_onboarding_at(input, Local::now().naive_local())
    }

    pub fn complete_onboarding_at(
        &self,
        input: OnboardingInput,
        now: NaiveDateTime,
    ) -> Result<OnboardingOutcome> {
        if let Some(w) = input.current_weight {
            validate_weight_input(w)?;
        }
        if let Some(w) = input.target_weight {
            validate_weight_input(w)?;
        }
        let reset_time = input
            .reset_time
            .unwrap_or_else(|| DEFAULT_RESET_TIME.to_string());
        validate_reset_time(&reset_time)?;

        let today = date_key(now.date());
        let (plan, targets, size) = match input.current_weight {
            Some(weight) => {
                let sex = input.sex.unwrap_or(Sex::Unspecified);
                let plan =
                    calculate_portion_plan(input.goal, sex, weight, input.target_weight);
                let targets = plan.clone().into_daily_targets(today);
                (Some(plan), targets, Some(size_category(sex, weight)))
            }
            None => (None, default_targets(input.goal, today), None),
        };

        let profile = UserProfile {
            goal: input.goal,
            diet_style: input.diet_style,
            reset_time,
            reminders_on: input.reminders_on,
            reminder_times: vec![],
            sex: input.sex,
            current_weight: input.current_weight,
            target_weight: input.target_weight,
            portion_plan: plan,
        };

        self.store.set_user_profile(&profile)?;
        self.store.set_daily_targets(&targets)?;
        self.store.set_onboarding_complete()?;

        Ok(OnboardingOutcome {
            profile,
            targets,
            size,
        })
    }

    /// Re-derive targets from the stored profile (after a goal or weight
    /// change in settings).
    pub fn recalculate_targets(&self) -> Result<DailyTargets> {
        self.recalculate_targets_at(Local::now().naive_local())
    }

    pub fn recalculate_targets_at(&self, now: NaiveDateTime) -> Result<DailyTargets> {
        let mut profile = self
            .store
            .user_profile()?
            .context("No profile found. Run onboarding first")?;

        let today = date_key(now.date());
        let targets = match profile.current_weight {
            Some(weight) => {
                let sex = profile.sex.unwrap_or(Sex::Unspecified);
                let plan =
                    calculate_portion_plan(profile.goal, sex, weight, profile.target_weight);
                profile.portion_plan = Some(plan.clone());
                plan.into_daily_targets(today)
            }
            None => default_targets(profile.goal, today),
        };

        self.store.set_user_profile(&profile)?;
        self.store.set_daily_targets(&targets)?;
        Ok(targets)
    }

    // --- Today's log ---

    /// Reconcile the log collection against the clock and return the record
    /// for the current logging day, persisting any corrective write
    /// (creation or dedup) it produced.
    pub fn today(&self) -> Result<TodaySnapshot> {
        self.today_at(Local::now().naive_local())
    }

    pub fn today_at(&self, now: NaiveDateTime) -> Result<TodaySnapshot> {
        let reset = self.reset_time()?;
        let outcome = reconcile(self.store.daily_logs()?, now, reset);
        if outcome.changed {
            self.store.set_daily_logs(&outcome.logs)?;
        }
        Ok(TodaySnapshot {
            log: outcome.today,
            targets: self.store.daily_targets()?,
        })
    }

    pub fn add_portions(&self, group: FoodGroup, count: u32) -> Result<DailyLog> {
        self.add_portions_at(group, count, Local::now().naive_local())
    }

    pub fn add_portions_at(
        &self,
        group: FoodGroup,
        count: u32,
        now: NaiveDateTime,
    ) -> Result<DailyLog> {
        self.update_today_at(now, |log| increment(log, group, count))
    }

    pub fn remove_portions(&self, group: FoodGroup, count: u32) -> Result<DailyLog> {
        self.remove_portions_at(group, count, Local::now().naive_local())
    }

    pub fn remove_portions_at(
        &self,
        group: FoodGroup,
        count: u32,
        now: NaiveDateTime,
    ) -> Result<DailyLog> {
        self.update_today_at(now, |log| {
            decrement(log, group, count);
            Ok(())
        })
    }

    /// Two-phase update of today's record: reconcile, mutate, replace the
    /// entry by date match, write the collection, then re-read and verify
    /// the stored record equals what was written.
    fn update_today_at(
        &self,
        now: NaiveDateTime,
        mutate: impl FnOnce(&mut DailyLog) -> Result<()>,
    ) -> Result<DailyLog> {
        let reset = self.reset_time()?;
        let outcome = reconcile(self.store.daily_logs()?, now, reset);

        let mut today = outcome.today;
        mutate(&mut today)?;

        let mut logs = outcome.logs;
        let slot = logs
            .iter_mut()
            .find(|l| l.date == today.date)
            .context("Reconciled collection is missing today's record")?;
        *slot = today.clone();
        self.store.set_daily_logs(&logs)?;

        let stored = self.store.daily_logs()?;
        let verified = stored.iter().find(|l| l.date == today.date) == Some(&today);
        if !verified {
            bail!("Saved log for {} did not verify after write", today.date);
        }
        Ok(today)
    }

    // --- Targets ---

    pub fn targets(&self) -> Result<Option<DailyTargets>> {
        self.store.daily_targets()
    }

    pub fn set_target(&self, group: FoodGroup, value: u32) -> Result<DailyTargets> {
        validate_target_value(group, value)?;
        let mut targets = self
            .store
            .daily_targets()?
            .context("No targets set. Run onboarding first")?;
        targets.set(group, value);
        self.store.set_daily_targets(&targets)?;
        Ok(targets)
    }

    /// Stepper-style target edit: delta applied with a floor of zero, then
    /// the usual edit-time validation.
    pub fn adjust_target(&self, group: FoodGroup, delta: i32) -> Result<DailyTargets> {
        let targets = self
            .store
            .daily_targets()?
            .context("No targets set. Run onboarding first")?;
        let current = i64::from(targets.get(group));
        #[allow(clippy::cast_sign_loss)]
        let next = current.saturating_add(i64::from(delta)).max(0) as u32;
        self.set_target(group, next)
    }

    // --- History & progress ---

    /// All logs, reconciled and sorted newest first.
    pub fn history(&self) -> Result<Vec<DailyLog>> {
        self.history_at(Local::now().naive_local())
    }

    pub fn history_at(&self, now: NaiveDateTime) -> Result<Vec<DailyLog>> {
        let reset = self.reset_time()?;
        let outcome = reconcile(self.store.daily_logs()?, now, reset);
        if outcome.changed {
            self.store.set_daily_logs(&outcome.logs)?;
        }
        let mut logs = outcome.logs;
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    /// Adherence percentages, logging streak, and total tracked days.
    pub fn progress(&self) -> Result<ProgressStats> {
        self.progress_at(Local::now().naive_local())
    }

    pub fn progress_at(&self, now: NaiveDateTime) -> Result<ProgressStats> {
        let logs = self.history_at(now)?;
        let targets = self.store.daily_targets()?;

        let adherence = |met: usize| {
            if logs.is_empty() {
                0
            } else {
                #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
                let pct = (met as f64 / logs.len() as f64 * 100.0).round() as u32;
                pct
            }
        };

        let (protein_adherence, veggies_adherence) = match &targets {
            Some(t) => {
                let protein_hits = logs.iter().filter(|l| l.protein >= t.protein).count();
                let veggies_hits = logs.iter().filter(|l| l.veggies >= t.veggies).count();
                (adherence(protein_hits), adherence(veggies_hits))
            }
            None => (0, 0),
        };

        // logs are newest first; the streak is the run of consecutive
        // entries with any food portion logged
        let mut streak = 0;
        for log in &logs {
            if log.food_portions() > 0 {
                streak += 1;
            } else {
                break;
            }
        }

        Ok(ProgressStats {
            protein_adherence,
            veggies_adherence,
            streak,
            total_days: logs.len(),
        })
    }

    // --- Weight metrics ---

    /// Upsert a weight measurement by date: at most one entry per calendar
    /// date.
    pub fn log_weight(&self, date: NaiveDate, value: f64) -> Result<MetricWeight> {
        validate_weight_input(value)?;
        let key = date_key(date);
        let mut metrics = self.store.weight_metrics()?;

        let entry = MetricWeight { date: key, value };
        match metrics.iter_mut().find(|m| m.date == entry.date) {
            Some(existing) => *existing = entry.clone(),
            None => metrics.push(entry.clone()),
        }
        self.store.set_weight_metrics(&metrics)?;
        Ok(entry)
    }

    pub fn weight_for(&self, date: NaiveDate) -> Result<Option<MetricWeight>> {
        let key = date_key(date);
        Ok(self
            .store
            .weight_metrics()?
            .into_iter()
            .find(|m| m.date == key))
    }

    /// Weight history newest first, optionally limited to the latest
    /// `days` entries.
    pub fn weight_history(&self, days: Option<usize>) -> Result<Vec<MetricWeight>> {
        let mut metrics = self.store.weight_metrics()?;
        metrics.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(n) = days {
            metrics.truncate(n);
        }
        Ok(metrics)
    }

    /// Returns false when no entry existed for the date.
    pub fn delete_weight(&self, date: NaiveDate) -> Result<bool> {
        let key = date_key(date);
        let mut metrics = self.store.weight_metrics()?;
        let before = metrics.len();
        metrics.retain(|m| m.date != key);
        if metrics.len() == before {
            return Ok(false);
        }
        self.store.set_weight_metrics(&metrics)?;
        Ok(true)
    }

    // --- Settings ---

    pub fn set_reset_time(&self, reset_time: &str) -> Result<UserProfile> {
        validate_reset_time(reset_time)?;
        let mut profile = self
            .store
            .user_profile()?
            .context("No profile found. Run onboarding first")?;
        profile.reset_time = reset_time.to_string();
        self.store.set_user_profile(&profile)?;
        Ok(profile)
    }

    pub fn set_reminders(&self, on: bool) -> Result<UserProfile> {
        let mut profile = self
            .store
            .user_profile()?
            .context("No profile found. Run onboarding first")?;
        profile.reminders_on = on;
        self.store.set_user_profile(&profile)?;
        Ok(profile)
    }

    pub fn set_reminder_times(&self, times: Vec<String>) -> Result<UserProfile> {
        for t in &times {
            validate_reset_time(t)?;
        }
        let mut profile = self
            .store
            .user_profile()?
            .context("No profile found. Run onboarding first")?;
        profile.reminder_times = times;
        self.store.set_user_profile(&profile)?;
        Ok(profile)
    }

    // --- Full reset ---

    pub fn reset_all(&self) -> Result<()> {
        self.store.clear_all()
    }

    /// The calendar date the current logging window belongs to, using the
    /// profile's reset time.
    pub fn current_log_date(&self, now: NaiveDateTime) -> Result<NaiveDate> {
        Ok(effective_date(now, self.reset_time()?))
    }
}
