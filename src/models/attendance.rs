use super::{attendance_status::AttendanceStatus, shift::ShiftKey};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One attendance row for one employee on one calendar day.
///
/// `id == 0` marks a placeholder synthesized by the grid builder that has
/// never been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: String,           // ⇔ attendance.employee_id
    pub date: NaiveDate,               // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub shift: ShiftKey,               // ⇔ attendance.shift ('pagi' | 'siang' | 'malam')
    pub check_in: Option<NaiveTime>,   // ⇔ attendance.check_in (TEXT "HH:MM" or NULL)
    pub check_out: Option<NaiveTime>,  // ⇔ attendance.check_out (TEXT "HH:MM" or NULL)
    pub lateness_minutes: u32,
    pub early_arrival_minutes: u32,
    pub overtime_minutes: u32,
    pub status: AttendanceStatus,      // ⇔ attendance.status ('' when unset)
    pub notes: String,
}

impl AttendanceRecord {
    /// Empty row for a day without stored attendance.
    pub fn placeholder(employee_id: &str, date: NaiveDate) -> Self {
        Self {
            id: 0,
            employee_id: employee_id.to_string(),
            date,
            shift: ShiftKey::default(),
            check_in: None,
            check_out: None,
            lateness_minutes: 0,
            early_arrival_minutes: 0,
            overtime_minutes: 0,
            status: AttendanceStatus::Unset,
            notes: String::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == 0
    }

    /// A row is worth saving once a time or a status has been set.
    pub fn has_data(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some() || !self.status.is_unset()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn check_in_str(&self) -> String {
        fmt_opt_time(self.check_in)
    }

    pub fn check_out_str(&self) -> String {
        fmt_opt_time(self.check_out)
    }
}

fn fmt_opt_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Partial update of one attendance row.
///
/// For the time fields `None` leaves the value untouched and `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct AttendanceEdit {
    pub shift: Option<ShiftKey>,
    pub check_in: Option<Option<NaiveTime>>,
    pub check_out: Option<Option<NaiveTime>>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

impl AttendanceEdit {
    /// True when the edit touches a field the minute columns depend on.
    pub fn touches_timing(&self) -> bool {
        self.shift.is_some() || self.check_in.is_some() || self.check_out.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_timing() && self.status.is_none() && self.notes.is_none()
    }
}
