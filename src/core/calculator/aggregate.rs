//! Payroll totals, line-item mutations, the pending → paid transition and
//! monthly generation planning.

use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::month::PayrollMonth;
use crate::models::payroll::{LineItem, PayrollRecord, PayrollStatus};
use std::collections::BTreeMap;

/// `base + overtime + Σbonuses − Σdeductions`, or `InvalidAmount` when the
/// result does not fit in an `i64`.
pub fn compute_total(
    base_salary: i64,
    overtime_pay: i64,
    bonuses: &[LineItem],
    deductions: &[LineItem],
) -> AppResult<i64> {
    let overflow = || AppError::InvalidAmount("payroll total is out of range".into());

    let sum = |items: &[LineItem]| {
        items
            .iter()
            .try_fold(0i64, |acc, l| acc.checked_add(l.amount))
            .ok_or_else(overflow)
    };
    let b = sum(bonuses)?;
    let d = sum(deductions)?;

    base_salary
        .checked_add(overtime_pay)
        .and_then(|v| v.checked_add(b))
        .and_then(|v| v.checked_sub(d))
        .ok_or_else(overflow)
}

fn non_negative(what: &str, v: i64) -> AppResult<i64> {
    if v < 0 {
        return Err(AppError::InvalidAmount(format!("{what} cannot be negative: {v}")));
    }
    Ok(v)
}

impl PayrollRecord {
    /// Recompute from scratch; never incremental.
    pub fn recompute_total(&mut self) -> AppResult<()> {
        self.total_amount = compute_total(
            self.base_salary,
            self.overtime_pay,
            &self.bonuses,
            &self.deductions,
        )?;
        Ok(())
    }

    fn ensure_pending(&self) -> AppResult<()> {
        if self.is_paid() {
            return Err(AppError::AlreadyPaid(self.key()));
        }
        Ok(())
    }

    /// Run `f` on a copy and keep the copy only if its total still fits.
    fn mutate<T>(&mut self, f: impl FnOnce(&mut Self) -> AppResult<T>) -> AppResult<T> {
        self.ensure_pending()?;
        let mut next = self.clone();
        let out = f(&mut next)?;
        next.recompute_total()?;
        *self = next;
        Ok(out)
    }

    pub fn set_base_salary(&mut self, amount: i64) -> AppResult<()> {
        self.mutate(|r| {
            r.base_salary = non_negative("base salary", amount)?;
            Ok(())
        })
    }

    pub fn set_overtime_pay(&mut self, amount: i64) -> AppResult<()> {
        self.mutate(|r| {
            r.overtime_pay = non_negative("overtime pay", amount)?;
            Ok(())
        })
    }

    pub fn add_bonus(&mut self, item: LineItem) -> AppResult<()> {
        self.mutate(|r| {
            r.bonuses.push(item);
            Ok(())
        })
    }

    pub fn add_deduction(&mut self, item: LineItem) -> AppResult<()> {
        self.mutate(|r| {
            r.deductions.push(item);
            Ok(())
        })
    }

    /// Remove by 0-based index, keeping the order of the others.
    pub fn remove_bonus(&mut self, index: usize) -> AppResult<LineItem> {
        self.mutate(|r| {
            if index >= r.bonuses.len() {
                return Err(AppError::InvalidIndex(index));
            }
            Ok(r.bonuses.remove(index))
        })
    }

    pub fn remove_deduction(&mut self, index: usize) -> AppResult<LineItem> {
        self.mutate(|r| {
            if index >= r.deductions.len() {
                return Err(AppError::InvalidIndex(index));
            }
            Ok(r.deductions.remove(index))
        })
    }

    /// Replace both line-item lists at once (suggestion merge).
    pub fn replace_items(
        &mut self,
        bonuses: Vec<LineItem>,
        deductions: Vec<LineItem>,
    ) -> AppResult<()> {
        self.mutate(|r| {
            r.bonuses = bonuses;
            r.deductions = deductions;
            Ok(())
        })
    }

    /// pending → paid. Returns `false` (and changes nothing) when the record
    /// is already paid.
    pub fn mark_paid(&mut self, paid_at: &str) -> bool {
        if self.is_paid() {
            return false;
        }
        self.status = PayrollStatus::Paid;
        self.paid_at = Some(paid_at.to_string());
        true
    }

    /// True when the stored total matches the four contributing fields.
    pub fn total_is_consistent(&self) -> bool {
        compute_total(
            self.base_salary,
            self.overtime_pay,
            &self.bonuses,
            &self.deductions,
        )
        .is_ok_and(|total| total == self.total_amount)
    }
}

/// What monthly generation does for one roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationAction {
    /// No record yet for employee+store+month.
    Create(PayrollRecord),
    /// Existing pending record with base salary refreshed from the roster.
    Refresh(PayrollRecord),
    /// Existing paid record, left as is.
    SkipPaid(PayrollRecord),
    /// Employee without an assigned store.
    SkipUnassigned(String),
}

/// Plan the generation of `month` for every roster entry.
///
/// At most one action per employee+store, so running the plan twice never
/// duplicates a record. Overtime pay and line items of existing records are
/// operator input and are kept. Fails when a refreshed total overflows.
pub fn plan_generation(
    month: PayrollMonth,
    roster: &[Employee],
    existing: &[PayrollRecord],
) -> AppResult<Vec<GenerationAction>> {
    let by_key: BTreeMap<(&str, &str), &PayrollRecord> = existing
        .iter()
        .filter(|r| r.month == month)
        .map(|r| ((r.employee_id.as_str(), r.store_id.as_str()), r))
        .collect();

    let mut seen = std::collections::BTreeSet::new();
    let mut plan = Vec::new();

    for emp in roster {
        let Some(store) = emp.store_id.as_deref() else {
            plan.push(GenerationAction::SkipUnassigned(emp.id.clone()));
            continue;
        };

        if !seen.insert((emp.id.as_str(), store)) {
            continue;
        }

        match by_key.get(&(emp.id.as_str(), store)) {
            Some(rec) if rec.is_paid() => plan.push(GenerationAction::SkipPaid((*rec).clone())),
            Some(rec) => {
                let mut refreshed = (*rec).clone();
                refreshed.base_salary = emp.salary_or_zero().max(0);
                refreshed.recompute_total()?;
                plan.push(GenerationAction::Refresh(refreshed));
            }
            None => plan.push(GenerationAction::Create(PayrollRecord::new(
                &emp.id,
                store,
                month,
                emp.salary_or_zero(),
            ))),
        }
    }

    Ok(plan)
}
