//! Candidate bonuses and deductions derived from a month of attendance.
//!
//! Derivation is a pure function of its inputs: the same rows always give
//! the same items, ids and order.

use crate::config::{Config, Rates};
use crate::core::calculator::delta::worked_minutes;
use crate::models::attendance::AttendanceRecord;
use crate::models::attendance_status::AttendanceStatus;
use crate::models::suggestion::{SuggestionItem, SuggestionSource};
use crate::utils::formatting::{format_amount, mins2readable};
use serde::Serialize;
use std::collections::BTreeSet;

/// Rates and thresholds a derivation runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationParams {
    pub rates: Rates,
    /// Length of a full working day, in minutes.
    pub standard_minutes: i64,
    /// Base salary is divided by this to size one absence day.
    pub absence_divisor: i64,
}

impl Default for DerivationParams {
    fn default() -> Self {
        Self {
            rates: Rates::default(),
            standard_minutes: 8 * 60,
            absence_divisor: 30,
        }
    }
}

impl From<&Config> for DerivationParams {
    fn from(cfg: &Config) -> Self {
        Self {
            rates: cfg.rates.clone(),
            standard_minutes: cfg.standard_work_hours as i64 * 60,
            absence_divisor: cfg.absence_divisor,
        }
    }
}

/// Result of one derivation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionSet {
    pub items: Vec<SuggestionItem>,
    /// Rows that carried any attendance data (placeholders excluded).
    pub attendance_rows: usize,
}

impl SuggestionSet {
    /// No attendance at all, as opposed to attendance without anomalies.
    pub fn is_no_data(&self) -> bool {
        self.attendance_rows == 0
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every item selected: the state a fresh derivation starts in.
    pub fn default_selection(&self) -> Selection {
        Selection::all(&self.items)
    }

    pub fn totals(&self, selection: &Selection) -> SuggestionTotals {
        let mut t = SuggestionTotals::default();
        for item in self.items.iter().filter(|i| selection.contains(&i.id)) {
            t.selected += 1;
            if item.is_bonus() {
                t.bonus_total = t.bonus_total.saturating_add(item.amount);
            } else {
                t.deduction_total = t.deduction_total.saturating_add(item.amount);
            }
        }
        t.net = t.bonus_total.saturating_sub(t.deduction_total);
        t
    }
}

/// Sums over the selected items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionTotals {
    pub selected: usize,
    pub bonus_total: i64,
    pub deduction_total: i64,
    pub net: i64,
}

/// Operator selection, by suggestion id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all(items: &[SuggestionItem]) -> Self {
        Self::from_ids(items.iter().map(|i| i.id.clone()))
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip one id; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
            return true;
        }
        false
    }

    /// Drop ids no longer produced by a fresh derivation, keeping the
    /// operator's choices for the ones that still exist.
    pub fn retain_known(&mut self, items: &[SuggestionItem]) {
        let known: BTreeSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        self.ids.retain(|id| known.contains(id.as_str()));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// round(base / divisor), half up; 0 when either side is not positive.
pub fn absence_amount(base_salary: i64, divisor: i64) -> i64 {
    if base_salary <= 0 || divisor <= 0 {
        return 0;
    }
    let (q, r) = (base_salary / divisor, base_salary % divisor);
    if r >= divisor - r { q + 1 } else { q }
}

/// `minutes × rate`, saturating; a negative rate counts as zero.
fn per_minute(minutes: i64, rate: i64) -> i64 {
    minutes.max(0).saturating_mul(rate.max(0))
}

fn item(
    record: &AttendanceRecord,
    source: SuggestionSource,
    minutes: Option<u32>,
    amount: i64,
    reason: String,
) -> SuggestionItem {
    SuggestionItem {
        id: SuggestionItem::make_id(record.date, source),
        kind: source.kind(),
        source,
        date: record.date,
        minutes,
        amount,
        name: format!("{} ({})", source.label(), record.date_str()),
        reason,
    }
}

/// Items of one day, in rule order: early arrival, late departure,
/// lateness, early leave, alpha.
fn derive_day(
    record: &AttendanceRecord,
    base_salary: i64,
    params: &DerivationParams,
) -> Vec<SuggestionItem> {
    let rates = &params.rates;
    let mut out = Vec::new();

    if record.early_arrival_minutes > 0 {
        let m = record.early_arrival_minutes;
        out.push(item(
            record,
            SuggestionSource::EarlyArrival,
            Some(m),
            per_minute(m as i64, rates.early_arrival),
            format!("Checked in {} min before shift start", m),
        ));
    }

    if record.overtime_minutes > 0 {
        let m = record.overtime_minutes;
        out.push(item(
            record,
            SuggestionSource::LateDeparture,
            Some(m),
            per_minute(m as i64, rates.late_departure),
            format!("Checked out {} min after shift end", m),
        ));
    }

    if record.lateness_minutes > 0 {
        let m = record.lateness_minutes;
        out.push(item(
            record,
            SuggestionSource::Lateness,
            Some(m),
            per_minute(m as i64, rates.lateness),
            format!("Checked in {} min late", m),
        ));
    }

    // Only evaluable for an explicit "hadir" with both clock times.
    if record.status == AttendanceStatus::Hadir
        && let Some(worked) = worked_minutes(record.check_in, record.check_out)
        && worked < params.standard_minutes
    {
        let short = params.standard_minutes - worked;
        out.push(item(
            record,
            SuggestionSource::EarlyLeave,
            Some(short as u32),
            per_minute(short, rates.early_leave),
            format!(
                "Worked {} of {}",
                mins2readable(worked, false),
                mins2readable(params.standard_minutes, false)
            ),
        ));
    }

    if record.status == AttendanceStatus::Alpha {
        out.push(item(
            record,
            SuggestionSource::Alpha,
            None,
            absence_amount(base_salary, params.absence_divisor),
            format!(
                "Unexcused absence: 1/{} of base salary {}",
                params.absence_divisor,
                format_amount(base_salary)
            ),
        ));
    }

    out
}

/// Derive the date-ordered candidate list for one employee's month.
///
/// Empty input is not an error: it yields an empty set flagged as
/// "no data". A missing base salary sizes the alpha deduction at zero.
pub fn derive_suggestions(
    records: &[AttendanceRecord],
    base_salary: Option<i64>,
    params: &DerivationParams,
) -> SuggestionSet {
    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let base = base_salary.unwrap_or(0);

    SuggestionSet {
        items: sorted
            .iter()
            .flat_map(|r| derive_day(r, base, params))
            .collect(),
        attendance_rows: sorted.iter().filter(|r| r.has_data()).count(),
    }
}
