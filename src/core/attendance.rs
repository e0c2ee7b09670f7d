use crate::config::Config;
use crate::core::calculator::delta::apply_edit;
use crate::core::calculator::grid::build_grid;
use crate::core::logic::Core;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{get_attendance, load_attendance_range, upsert_attendance};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceEdit, AttendanceRecord};
use chrono::NaiveDate;

/// High-level business logic for the `attend` and `grid` commands.
pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Apply `edit` to the row of (employee, date) and save it.
    ///
    /// The stored row is the starting point when present, an empty
    /// placeholder otherwise. Minute fields are re-derived for this row
    /// only, using the schedule of the employee's store.
    pub fn record(
        pool: &DbPool,
        cfg: &Config,
        employee_id: &str,
        date: NaiveDate,
        edit: &AttendanceEdit,
    ) -> AppResult<AttendanceRecord> {
        if edit.is_empty() {
            return Err(AppError::Other(
                "nothing to record: pass at least one of --shift, --in, --out, --status, --notes"
                    .into(),
            ));
        }

        let employee = Core::require_employee(&pool.conn, employee_id)?;
        let schedule = Core::schedule_for_employee(&pool.conn, &employee, cfg)?;

        let mut row = get_attendance(&pool.conn, employee_id, date)?
            .unwrap_or_else(|| AttendanceRecord::placeholder(employee_id, date));
        let created = row.is_placeholder();

        apply_edit(&mut row, edit, &schedule);

        row.id = upsert_attendance(&pool.conn, &row)?;

        ttlog_soft(
            &pool.conn,
            if created { "attend_add" } else { "attend_edit" },
            &format!("{}/{}", employee_id, row.date_str()),
            &format!(
                "shift={} in={} out={} status={} late={} early={} ot={}",
                row.shift,
                row.check_in_str(),
                row.check_out_str(),
                row.status,
                row.lateness_minutes,
                row.early_arrival_minutes,
                row.overtime_minutes
            ),
        );

        Ok(row)
    }

    /// One row per day of `[from, to]`, stored rows where they exist.
    pub fn grid(
        pool: &DbPool,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        Core::require_employee(&pool.conn, employee_id)?;
        let stored = if from <= to {
            load_attendance_range(&pool.conn, employee_id, from, to)?
        } else {
            Vec::new()
        };
        build_grid(employee_id, from, to, &stored)
    }
}
