use crate::config::Config;
use crate::core::calculator::aggregate::{GenerationAction, plan_generation};
use crate::core::calculator::apply::{ApplyOutcome, apply_to_record};
use crate::core::calculator::grid::month_grid;
use crate::core::calculator::suggestions::{
    DerivationParams, Selection, SuggestionSet, derive_suggestions,
};
use crate::core::logic::Core;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{
    get_payroll, insert_payroll, list_employees, list_payroll_month, load_attendance_range,
    update_payroll,
};
use crate::errors::{AppError, AppResult};
use crate::models::month::PayrollMonth;
use crate::models::payroll::{LineItem, PayrollRecord};
use chrono::Local;
use rusqlite::TransactionBehavior;

/// Counts of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub created: usize,
    pub refreshed: usize,
    pub skipped_paid: usize,
    pub unassigned: Vec<String>,
}

/// Operator changes to one payroll record, applied in field order.
#[derive(Debug, Clone, Default)]
pub struct PayrollEdit {
    pub base_salary: Option<i64>,
    pub overtime_pay: Option<i64>,
    pub add_bonuses: Vec<LineItem>,
    pub add_deductions: Vec<LineItem>,
    pub remove_bonus: Option<usize>,
    pub remove_deduction: Option<usize>,
    pub pay: bool,
}

impl PayrollEdit {
    pub fn is_empty(&self) -> bool {
        self.base_salary.is_none()
            && self.overtime_pay.is_none()
            && self.add_bonuses.is_empty()
            && self.add_deductions.is_empty()
            && self.remove_bonus.is_none()
            && self.remove_deduction.is_none()
            && !self.pay
    }
}

pub struct PayrollLogic;

impl PayrollLogic {
    /// Create or refresh the records of `month` for the whole roster, in a
    /// single transaction.
    pub fn generate(pool: &DbPool, month: PayrollMonth) -> AppResult<GenerationReport> {
        let tx = pool.conn.unchecked_transaction()?;

        let roster = list_employees(&tx)?;
        let existing = list_payroll_month(&tx, month)?;

        let mut report = GenerationReport::default();
        for action in plan_generation(month, &roster, &existing)? {
            match action {
                GenerationAction::Create(mut rec) => {
                    insert_payroll(&tx, &mut rec)?;
                    report.created += 1;
                }
                GenerationAction::Refresh(mut rec) => {
                    update_payroll(&tx, &mut rec)?;
                    report.refreshed += 1;
                }
                GenerationAction::SkipPaid(_) => report.skipped_paid += 1,
                GenerationAction::SkipUnassigned(id) => report.unassigned.push(id),
            }
        }

        tx.commit()?;

        ttlog_soft(
            &pool.conn,
            "payroll_generate",
            &month.to_string(),
            &format!(
                "created={} refreshed={} paid={} unassigned={}",
                report.created,
                report.refreshed,
                report.skipped_paid,
                report.unassigned.len()
            ),
        );

        Ok(report)
    }

    pub fn list(
        pool: &DbPool,
        month: PayrollMonth,
        employee_id: Option<&str>,
        store_id: Option<&str>,
    ) -> AppResult<Vec<PayrollRecord>> {
        let mut out = list_payroll_month(&pool.conn, month)?;
        out.retain(|r| {
            employee_id.is_none_or(|e| r.employee_id == e) && store_id.is_none_or(|s| r.store_id == s)
        });
        Ok(out)
    }

    pub fn load(
        pool: &DbPool,
        employee_id: &str,
        store_id: &str,
        month: PayrollMonth,
    ) -> AppResult<PayrollRecord> {
        get_payroll(&pool.conn, employee_id, store_id, month)?.ok_or_else(|| {
            AppError::NotFound(format!(
                "payroll {}/{}/{} (run `payroll --month {} --generate` first)",
                employee_id, store_id, month, month
            ))
        })
    }

    /// Apply `edit` to a freshly loaded record and write it back under the
    /// version it was loaded with.
    pub fn edit(
        pool: &DbPool,
        employee_id: &str,
        store_id: &str,
        month: PayrollMonth,
        edit: &PayrollEdit,
    ) -> AppResult<PayrollRecord> {
        let mut rec = Self::load(pool, employee_id, store_id, month)?;
        let mut changes = Vec::new();

        if let Some(v) = edit.base_salary {
            rec.set_base_salary(v)?;
            changes.push(format!("base={v}"));
        }
        if let Some(v) = edit.overtime_pay {
            rec.set_overtime_pay(v)?;
            changes.push(format!("overtime_pay={v}"));
        }
        for item in &edit.add_bonuses {
            rec.add_bonus(item.clone())?;
            changes.push(format!("+bonus {}={}", item.name, item.amount));
        }
        for item in &edit.add_deductions {
            rec.add_deduction(item.clone())?;
            changes.push(format!("+deduction {}={}", item.name, item.amount));
        }
        if let Some(idx) = edit.remove_bonus {
            let removed = rec.remove_bonus(idx)?;
            changes.push(format!("-bonus {}", removed.name));
        }
        if let Some(idx) = edit.remove_deduction {
            let removed = rec.remove_deduction(idx)?;
            changes.push(format!("-deduction {}", removed.name));
        }
        if edit.pay && rec.mark_paid(&Local::now().to_rfc3339()) {
            changes.push("paid".to_string());
        }

        if changes.is_empty() {
            return Ok(rec);
        }

        Self::save(pool, &mut rec)?;

        ttlog_soft(
            &pool.conn,
            "payroll_edit",
            &rec.key(),
            &format!("{} → total {}", changes.join(", "), rec.total_amount),
        );

        Ok(rec)
    }

    /// Write under the version `rec` was read with. A concurrent writer
    /// makes this fail with `WriteConflict` and leaves the row untouched.
    pub fn save(pool: &DbPool, rec: &mut PayrollRecord) -> AppResult<()> {
        update_payroll(&pool.conn, rec)
    }

    /// Derive the suggestions of one employee's month.
    pub fn derive(
        pool: &DbPool,
        cfg: &Config,
        employee_id: &str,
        month: PayrollMonth,
    ) -> AppResult<SuggestionSet> {
        let employee = Core::require_employee(&pool.conn, employee_id)?;
        let stored =
            load_attendance_range(&pool.conn, employee_id, month.first_day(), month.last_day())?;
        let rows = month_grid(employee_id, month, &stored)?;

        Ok(derive_suggestions(
            &rows,
            employee.base_salary,
            &DerivationParams::from(cfg),
        ))
    }

    /// Merge the selected suggestions into the employee's record for
    /// `month`. The read, merge and write happen in one immediate
    /// transaction; the write is still version-checked.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        employee_id: &str,
        store_id: Option<&str>,
        month: PayrollMonth,
        selection: &Selection,
    ) -> AppResult<(PayrollRecord, ApplyOutcome)> {
        let employee = Core::require_employee(&pool.conn, employee_id)?;
        let store = Core::store_of(&employee, store_id)?;
        let set = Self::derive(pool, cfg, employee_id, month)?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut rec = get_payroll(&tx, employee_id, &store, month)?.ok_or_else(|| {
            AppError::NotFound(format!(
                "payroll {}/{}/{} (run `payroll --month {} --generate` first)",
                employee_id, store, month, month
            ))
        })?;

        let outcome = apply_to_record(&mut rec, &set.items, selection)?;
        if outcome.added() > 0 {
            update_payroll(&tx, &mut rec)?;
        }
        tx.commit()?;

        if outcome.added() > 0 {
            ttlog_soft(
                &pool.conn,
                "payroll_apply",
                &rec.key(),
                &format!(
                    "{} bonus(es), {} deduction(s) → total {}",
                    outcome.bonuses_added, outcome.deductions_added, rec.total_amount
                ),
            );
        }

        Ok((rec, outcome))
    }
}
