use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use portions_core::dates::parse_date_key;
use portions_core::models::FoodGroup;

pub(crate) fn parse_group(s: &str) -> Result<FoodGroup> {
    s.parse()
}

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            _ => parse_date_key(&s),
        },
    }
}

/// Render a fixed-width bar like `[████████----]` for current/target.
/// Overflow past the target fills the bar; a zero target renders empty.
pub(crate) fn progress_bar(current: u32, target: u32, width: usize) -> String {
    let filled = if target == 0 {
        0
    } else {
        (current as usize * width / target as usize).min(width)
    };
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '-' });
    }
    bar.push(']');
    bar
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}
