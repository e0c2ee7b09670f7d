use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// Calendar month a payroll record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayrollMonth {
    year: i32,
    month: u32,
}

impl PayrollMonth {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(AppError::MonthOutOfRange(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parse `YYYY-MM` (a single-digit month is accepted).
    ///
    /// A string that does not have that shape is `InvalidMonth`; a
    /// well-formed value outside the calendar bounds is `MonthOutOfRange`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let raw = s.trim();
        let malformed = || AppError::InvalidMonth(s.to_string());

        let (y, m) = raw.split_once('-').ok_or_else(malformed)?;
        let digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());

        if y.len() != 4 || !digits(y) || m.len() > 2 || !digits(m) {
            return Err(malformed());
        }

        let year: i32 = y.parse().map_err(|_| malformed())?;
        let month: u32 = m.parse().map_err(|_| malformed())?;

        Self::new(year, month)
    }

    /// Month containing `date`, subject to the same bounds as `new`.
    pub fn of(date: NaiveDate) -> AppResult<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // year/month are validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_default()
    }

    pub fn num_days(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PayrollMonth {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::parse(s)
    }
}

impl Serialize for PayrollMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
