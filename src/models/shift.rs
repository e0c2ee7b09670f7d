use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named work period of a store schedule.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKey {
    /// Morning shift, the first of the day.
    #[default]
    Pagi,
    /// Afternoon shift.
    Siang,
    /// Night shift, usually crossing midnight.
    Malam,
}

impl ShiftKey {
    pub const ALL: [ShiftKey; 3] = [ShiftKey::Pagi, ShiftKey::Siang, ShiftKey::Malam];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftKey::Pagi => "pagi",
            ShiftKey::Siang => "siang",
            ShiftKey::Malam => "malam",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pagi" => Some(ShiftKey::Pagi),
            "siang" => Some(ShiftKey::Siang),
            "malam" => Some(ShiftKey::Malam),
            _ => None,
        }
    }

    /// Lenient parser for CLI input: accepts the Indonesian keys and the
    /// English aliases, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "pagi" | "morning" | "p" => Some(ShiftKey::Pagi),
            "siang" | "afternoon" | "s" => Some(ShiftKey::Siang),
            "malam" | "night" | "m" => Some(ShiftKey::Malam),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShiftKey::Pagi => "Morning",
            ShiftKey::Siang => "Afternoon",
            ShiftKey::Malam => "Night",
        }
    }
}

impl fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl FromStr for ShiftKey {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::from_code(s).ok_or_else(|| AppError::InvalidShift(s.to_string()))
    }
}
