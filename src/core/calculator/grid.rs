//! Attendance grid: one row per calendar day of a range, placeholders for
//! the gaps, persisted rows overlaid where they exist.

use crate::errors::AppResult;
use crate::models::attendance::AttendanceRecord;
use crate::models::month::PayrollMonth;
use crate::utils::date::days_inclusive;
use chrono::NaiveDate;
use std::collections::BTreeMap;

fn index_by_date<'a>(
    employee_id: &str,
    rows: &'a [AttendanceRecord],
) -> BTreeMap<NaiveDate, &'a AttendanceRecord> {
    let mut map = BTreeMap::new();
    for r in rows.iter().filter(|r| r.employee_id == employee_id) {
        // first row wins: (employee, date) is unique in storage
        map.entry(r.date).or_insert(r);
    }
    map
}

/// Exactly `(to − from) + 1` rows in ascending date order.
/// Fails with `InvalidRange` when `to < from`.
pub fn build_grid(
    employee_id: &str,
    from: NaiveDate,
    to: NaiveDate,
    persisted: &[AttendanceRecord],
) -> AppResult<Vec<AttendanceRecord>> {
    build_grid_with_edits(employee_id, from, to, persisted, &[])
}

/// Same as [`build_grid`], with unsaved local edits laid over the persisted
/// rows. An edit for a day replaces the persisted row of that day.
pub fn build_grid_with_edits(
    employee_id: &str,
    from: NaiveDate,
    to: NaiveDate,
    persisted: &[AttendanceRecord],
    edits: &[AttendanceRecord],
) -> AppResult<Vec<AttendanceRecord>> {
    let days = days_inclusive(from, to)?;
    let stored = index_by_date(employee_id, persisted);
    let local = index_by_date(employee_id, edits);

    Ok(days
        .into_iter()
        .map(|d| match local.get(&d).or_else(|| stored.get(&d)) {
            Some(r) => (*r).clone(),
            None => AttendanceRecord::placeholder(employee_id, d),
        })
        .collect())
}

/// Grid covering a whole payroll month.
pub fn month_grid(
    employee_id: &str,
    month: PayrollMonth,
    persisted: &[AttendanceRecord],
) -> AppResult<Vec<AttendanceRecord>> {
    build_grid(employee_id, month.first_day(), month.last_day(), persisted)
}
