use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Bonus,
    Deduction,
}

/// Attendance anomaly a suggestion was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    EarlyArrival,
    LateDeparture,
    Lateness,
    EarlyLeave,
    Alpha,
}

impl SuggestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionSource::EarlyArrival => "early_arrival",
            SuggestionSource::LateDeparture => "late_departure",
            SuggestionSource::Lateness => "lateness",
            SuggestionSource::EarlyLeave => "early_leave",
            SuggestionSource::Alpha => "alpha",
        }
    }

    pub fn kind(&self) -> SuggestionKind {
        match self {
            SuggestionSource::EarlyArrival | SuggestionSource::LateDeparture => {
                SuggestionKind::Bonus
            }
            SuggestionSource::Lateness | SuggestionSource::EarlyLeave | SuggestionSource::Alpha => {
                SuggestionKind::Deduction
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuggestionSource::EarlyArrival => "Early arrival bonus",
            SuggestionSource::LateDeparture => "Late departure bonus",
            SuggestionSource::Lateness => "Lateness deduction",
            SuggestionSource::EarlyLeave => "Early leave deduction",
            SuggestionSource::Alpha => "Absence (alpha) deduction",
        }
    }
}

/// Candidate bonus or deduction. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionItem {
    pub id: String,
    pub kind: SuggestionKind,
    pub source: SuggestionSource,
    pub date: NaiveDate,
    pub minutes: Option<u32>,
    pub amount: i64,
    pub name: String,
    pub reason: String,
}

impl SuggestionItem {
    /// Deterministic id for one (date, source) pair.
    pub fn make_id(date: NaiveDate, source: SuggestionSource) -> String {
        format!("{}:{}", date.format("%Y-%m-%d"), source.as_str())
    }

    pub fn is_bonus(&self) -> bool {
        self.kind == SuggestionKind::Bonus
    }
}
