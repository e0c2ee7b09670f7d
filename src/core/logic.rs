use crate::config::Config;
use crate::core::calculator::schedule::resolve;
use crate::db::queries::{get_employee, load_store_schedule};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::schedule::ShiftSchedule;
use rusqlite::Connection;

/// Lookups shared by the command-level logic modules.
pub struct Core;

impl Core {
    pub fn require_employee(conn: &Connection, id: &str) -> AppResult<Employee> {
        get_employee(conn, id)?.ok_or_else(|| AppError::NotFound(format!("employee '{}'", id)))
    }

    /// Schedule in force for a store: its own shifts completed by the
    /// configured defaults. No store → defaults.
    pub fn schedule_for_store(
        conn: &Connection,
        store_id: Option<&str>,
        cfg: &Config,
    ) -> AppResult<ShiftSchedule> {
        let custom = match store_id {
            Some(id) => load_store_schedule(conn, id)?,
            None => None,
        };
        Ok(resolve(custom.as_ref(), &cfg.default_shifts))
    }

    pub fn schedule_for_employee(
        conn: &Connection,
        employee: &Employee,
        cfg: &Config,
    ) -> AppResult<ShiftSchedule> {
        Self::schedule_for_store(conn, employee.store_id.as_deref(), cfg)
    }

    /// Store of a payroll operation: the explicit one, else the employee's.
    pub fn store_of(employee: &Employee, explicit: Option<&str>) -> AppResult<String> {
        explicit
            .map(str::to_string)
            .or_else(|| employee.store_id.clone())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "store for employee '{}' (assign one or pass --store)",
                    employee.id
                ))
            })
    }
}
