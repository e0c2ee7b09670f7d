use super::month::PayrollMonth;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named bonus or deduction entry. The amount is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: i64,
}

impl LineItem {
    pub fn new(name: &str, amount: i64) -> AppResult<Self> {
        if amount <= 0 {
            return Err(AppError::InvalidAmount(format!(
                "line item '{}' must have a positive amount, got {}",
                name, amount
            )));
        }
        if name.trim().is_empty() {
            return Err(AppError::InvalidAmount(
                "line item name cannot be empty".into(),
            ));
        }
        Ok(Self {
            name: name.trim().to_string(),
            amount,
        })
    }

    /// Parse the CLI form `NAME=AMOUNT`.
    pub fn parse_pair(s: &str) -> AppResult<Self> {
        let (name, amount) = s
            .rsplit_once('=')
            .ok_or_else(|| AppError::InvalidAmount(format!("expected NAME=AMOUNT, got '{s}'")))?;
        let amount: i64 = amount
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidAmount(format!("'{}' is not a number", amount.trim())))?;
        Self::new(name, amount)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    #[default]
    Pending,
    Paid,
}

impl PayrollStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PayrollStatus::Pending => "pending",
            PayrollStatus::Paid => "paid",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PayrollStatus::Pending),
            "paid" => Some(PayrollStatus::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Monthly payroll of one employee at one store.
///
/// `total_amount` is kept equal to
/// `base_salary + overtime_pay + Σbonuses − Σdeductions` by every mutating
/// method in `core::calculator::aggregate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRecord {
    pub id: i64,
    pub employee_id: String,
    pub store_id: String,
    pub month: PayrollMonth,
    pub base_salary: i64,
    pub overtime_pay: i64,
    pub bonuses: Vec<LineItem>,
    pub deductions: Vec<LineItem>,
    pub total_amount: i64,
    pub status: PayrollStatus,
    pub paid_at: Option<String>,
    /// Optimistic-lock counter, bumped on every committed write.
    pub version: i64,
}

impl PayrollRecord {
    /// Fresh pending record, not yet persisted (`id == 0`).
    pub fn new(employee_id: &str, store_id: &str, month: PayrollMonth, base_salary: i64) -> Self {
        let base_salary = base_salary.max(0);
        Self {
            id: 0,
            employee_id: employee_id.to_string(),
            store_id: store_id.to_string(),
            month,
            base_salary,
            overtime_pay: 0,
            bonuses: Vec::new(),
            deductions: Vec::new(),
            total_amount: base_salary,
            status: PayrollStatus::Pending,
            paid_at: None,
            version: 0,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == PayrollStatus::Paid
    }

    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.employee_id, self.store_id, self.month)
    }
}
