//! Time utilities: parsing HH:MM and minute-of-day arithmetic.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Minutes elapsed since 00:00.
pub fn minute_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Parse a CLI time argument for an edit: absent → no change, `-` or empty
/// → clear the value, otherwise HH:MM.
pub fn parse_time_edit(input: Option<&String>) -> AppResult<Option<Option<NaiveTime>>> {
    match input {
        None => Ok(None),
        Some(s) if s.trim().is_empty() || s.trim() == "-" => Ok(Some(None)),
        Some(s) => parse_time(s)
            .map(|t| Some(Some(t)))
            .ok_or_else(|| AppError::InvalidTime(s.to_string())),
    }
}
