//! Lateness / early-arrival / overtime minutes of one attendance row.
//!
//! All functions are total: a missing clock time yields 0, never an error.

use crate::models::attendance::{AttendanceEdit, AttendanceRecord};
use crate::models::schedule::{ShiftSchedule, ShiftWindow};
use crate::models::shift::ShiftKey;
use crate::utils::time::{MINUTES_PER_DAY, minute_of_day};
use chrono::{NaiveTime, Timelike};

/// Minute columns derived from the clock times of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinuteFields {
    pub lateness: u32,
    pub early_arrival: u32,
    pub overtime: u32,
}

/// Heuristic bucket for a clock-in when no shift was chosen:
/// [06:00, 14:00) → pagi, [14:00, 22:00) → siang, otherwise malam.
pub fn detect_shift(check_in: NaiveTime) -> ShiftKey {
    match check_in.hour() {
        6..=13 => ShiftKey::Pagi,
        14..=21 => ShiftKey::Siang,
        _ => ShiftKey::Malam,
    }
}

/// Signed minutes between check-in and shift start (positive = late).
///
/// For shifts crossing midnight the start is compared on a ±12h window, so
/// 00:30 against a 23:00 start counts as 90 minutes late.
fn start_offset(check_in: NaiveTime, window: &ShiftWindow) -> i64 {
    let mut diff = minute_of_day(check_in) - minute_of_day(window.start);

    if window.crosses_midnight() {
        let half = MINUTES_PER_DAY / 2;
        if diff > half {
            diff -= MINUTES_PER_DAY;
        } else if diff <= -half {
            diff += MINUTES_PER_DAY;
        }
    }

    diff
}

fn clamp_minutes(m: i64) -> u32 {
    m.clamp(0, u32::MAX as i64) as u32
}

/// `max(0, check_in − shift start)`
pub fn lateness(check_in: Option<NaiveTime>, shift: ShiftKey, schedule: &ShiftSchedule) -> u32 {
    check_in
        .map(|t| clamp_minutes(start_offset(t, &schedule.window(shift))))
        .unwrap_or(0)
}

/// `max(0, shift start − check_in)`; never non-zero together with lateness.
pub fn early_arrival(
    check_in: Option<NaiveTime>,
    shift: ShiftKey,
    schedule: &ShiftSchedule,
) -> u32 {
    check_in
        .map(|t| clamp_minutes(-start_offset(t, &schedule.window(shift))))
        .unwrap_or(0)
}

/// `max(0, check_out − shift end)`.
///
/// When the shift crosses midnight its end lies on the next day, and a
/// check-out earlier than the shift start is taken on the next day too.
pub fn overtime(check_out: Option<NaiveTime>, shift: ShiftKey, schedule: &ShiftSchedule) -> u32 {
    let Some(out) = check_out else {
        return 0;
    };
    let window = schedule.window(shift);

    let mut out_min = minute_of_day(out);
    let mut end_min = minute_of_day(window.end);

    if window.crosses_midnight() {
        end_min += MINUTES_PER_DAY;
        if out_min < minute_of_day(window.start) {
            out_min += MINUTES_PER_DAY;
        }
    }

    clamp_minutes(out_min - end_min)
}

/// Duration between check-in and check-out; a check-out earlier than the
/// check-in is on the next day. `None` when either time is missing.
pub fn worked_minutes(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> Option<i64> {
    let (cin, cout) = (check_in?, check_out?);
    let mut d = minute_of_day(cout) - minute_of_day(cin);
    if d < 0 {
        d += MINUTES_PER_DAY;
    }
    Some(d)
}

pub fn compute_minutes(
    check_in: Option<NaiveTime>,
    check_out: Option<NaiveTime>,
    shift: ShiftKey,
    schedule: &ShiftSchedule,
) -> MinuteFields {
    MinuteFields {
        lateness: lateness(check_in, shift, schedule),
        early_arrival: early_arrival(check_in, shift, schedule),
        overtime: overtime(check_out, shift, schedule),
    }
}

/// Re-derive the three minute columns of `record` from its own times.
pub fn recompute_row(record: &mut AttendanceRecord, schedule: &ShiftSchedule) {
    let m = compute_minutes(record.check_in, record.check_out, record.shift, schedule);
    record.lateness_minutes = m.lateness;
    record.early_arrival_minutes = m.early_arrival;
    record.overtime_minutes = m.overtime;
}

/// Apply a partial edit to one row. Minute columns are re-derived for this
/// row only, and only when shift or a clock time changed.
///
/// A placeholder row that receives a check-in without an explicit shift gets
/// its shift from `detect_shift`.
pub fn apply_edit(record: &mut AttendanceRecord, edit: &AttendanceEdit, schedule: &ShiftSchedule) {
    if let Some(t) = edit.check_in {
        record.check_in = t;
    }
    if let Some(t) = edit.check_out {
        record.check_out = t;
    }
    if let Some(status) = edit.status {
        record.status = status;
    }
    if let Some(notes) = &edit.notes {
        record.notes = notes.clone();
    }

    match (edit.shift, record.check_in) {
        (Some(shift), _) => record.shift = shift,
        (None, Some(cin)) if record.is_placeholder() && edit.check_in.is_some() => {
            record.shift = detect_shift(cin)
        }
        _ => {}
    }

    if edit.touches_timing() {
        recompute_row(record, schedule);
    }
}
