use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Present.
    Hadir,
    /// Leave.
    Cuti,
    /// Permitted absence.
    Izin,
    /// Sick.
    Sakit,
    /// Unexcused absence.
    Alpha,
    #[default]
    Unset,
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Hadir => "hadir",
            AttendanceStatus::Cuti => "cuti",
            AttendanceStatus::Izin => "izin",
            AttendanceStatus::Sakit => "sakit",
            AttendanceStatus::Alpha => "alpha",
            AttendanceStatus::Unset => "",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "hadir" => Some(AttendanceStatus::Hadir),
            "cuti" => Some(AttendanceStatus::Cuti),
            "izin" => Some(AttendanceStatus::Izin),
            "sakit" => Some(AttendanceStatus::Sakit),
            "alpha" => Some(AttendanceStatus::Alpha),
            "" => Some(AttendanceStatus::Unset),
            _ => None,
        }
    }

    /// Helper: convert CLI input (Indonesian key or English alias)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "hadir" | "present" => Some(AttendanceStatus::Hadir),
            "cuti" | "leave" => Some(AttendanceStatus::Cuti),
            "izin" | "permit" | "permitted" => Some(AttendanceStatus::Izin),
            "sakit" | "sick" => Some(AttendanceStatus::Sakit),
            "alpha" | "absent" => Some(AttendanceStatus::Alpha),
            "" | "-" | "unset" | "none" => Some(AttendanceStatus::Unset),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, AttendanceStatus::Unset)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Unset => f.write_str("-"),
            other => f.write_str(other.to_db_str()),
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::from_code(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
    }
}
