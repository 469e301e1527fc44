//! Date-key and rollover-boundary helpers.
//!
//! The diary keys every record by a local-calendar date string (`YYYY-MM-DD`),
//! but the logging day does not start at midnight: it starts at the user's
//! configured reset time. All "which day is it" questions go through
//! [`effective_date`].

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
        .with_context(|| format!("Invalid date '{s}'. Must be YYYY-MM-DD"))
}

pub fn parse_reset_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .with_context(|| format!("Invalid reset time '{s}'. Must be HH:MM"))
}

/// The most recent rollover instant at or before `now`: today at the reset
/// time, or the same time yesterday when that instant is still ahead of us.
#[must_use]
pub fn rollover_boundary(now: NaiveDateTime, reset: NaiveTime) -> NaiveDateTime {
    let boundary = now.date().and_time(reset);
    if boundary > now {
        boundary - Days::new(1)
    } else {
        boundary
    }
}

/// The calendar date the current logging window belongs to. Between midnight
/// and the reset time this is still the previous day, so late-night logging
/// lands on the day it started.
#[must_use]
pub fn effective_date(now: NaiveDateTime, reset: NaiveTime) -> NaiveDate {
    rollover_boundary(now, reset).date()
}
