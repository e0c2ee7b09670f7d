use crate::errors::{AppError, AppResult};
use crate::models::month::PayrollMonth;
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Every calendar day of `[from, to]`, inclusive and ascending.
pub fn days_inclusive(from: NaiveDate, to: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    if to < from {
        return Err(AppError::InvalidRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let mut out = Vec::with_capacity(((to - from).num_days() + 1) as usize);
    let mut d = from;
    while d <= to {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    Ok(out)
}

pub fn current_month() -> AppResult<PayrollMonth> {
    PayrollMonth::of(today())
}

/// Resolve a `--period` value into an inclusive date range.
///
/// Supports:
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();

    if let Some((start, end)) = p.split_once(':') {
        let from = require_date(start)?;
        let to = require_date(end)?;
        if to < from {
            return Err(AppError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        return Ok((from, to));
    }

    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    let month = PayrollMonth::parse(p)?;
    Ok((month.first_day(), month.last_day()))
}
