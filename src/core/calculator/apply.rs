//! Turns selected suggestions into payroll line items.
//!
//! Merging is strictly additive: existing bonuses and deductions are never
//! replaced or deduplicated, new items go to the end in date order.

use crate::core::calculator::suggestions::Selection;
use crate::errors::{AppError, AppResult};
use crate::models::payroll::{LineItem, PayrollRecord};
use crate::models::suggestion::SuggestionItem;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub bonuses_added: usize,
    pub deductions_added: usize,
    /// Ids of selected items with a zero amount (no line item possible).
    pub skipped: Vec<String>,
}

impl ApplyOutcome {
    pub fn added(&self) -> usize {
        self.bonuses_added + self.deductions_added
    }
}

/// New bonus / deduction lists: the existing ones followed by the selected
/// items, in the order they appear in `items`. Unknown ids are ignored.
pub fn merge_selected(
    items: &[SuggestionItem],
    selection: &Selection,
    bonuses: &[LineItem],
    deductions: &[LineItem],
) -> (Vec<LineItem>, Vec<LineItem>, ApplyOutcome) {
    let mut new_bonuses = bonuses.to_vec();
    let mut new_deductions = deductions.to_vec();
    let mut outcome = ApplyOutcome::default();

    for it in items.iter().filter(|i| selection.contains(&i.id)) {
        let Ok(line) = LineItem::new(&it.name, it.amount) else {
            outcome.skipped.push(it.id.clone());
            continue;
        };

        if it.is_bonus() {
            new_bonuses.push(line);
            outcome.bonuses_added += 1;
        } else {
            new_deductions.push(line);
            outcome.deductions_added += 1;
        }
    }

    (new_bonuses, new_deductions, outcome)
}

/// Merge the selection into `record` and recompute its total.
/// A paid record, or one whose total would overflow, is left untouched.
pub fn apply_to_record(
    record: &mut PayrollRecord,
    items: &[SuggestionItem],
    selection: &Selection,
) -> AppResult<ApplyOutcome> {
    if record.is_paid() {
        return Err(AppError::AlreadyPaid(record.key()));
    }

    let (bonuses, deductions, outcome) =
        merge_selected(items, selection, &record.bonuses, &record.deductions);

    record.replace_items(bonuses, deductions)?;

    Ok(outcome)
}
