use crate::config::Config;
use crate::core::calculator::delta::recompute_row;
use crate::core::calculator::schedule::resolve_for_store;
use crate::db::pool::DbPool;
use crate::db::queries::{
    list_employees, load_all_store_schedules, map_attendance_row, update_attendance_minutes,
};
use crate::errors::AppResult;

/// Re-derive the minute columns of every stored row of `employee_id` from
/// the schedule currently in force for the employee's store.
/// Returns the number of rows whose values changed.
pub fn recompute_employee(pool: &DbPool, cfg: &Config, employee_id: &str) -> AppResult<usize> {
    let stores = load_all_store_schedules(&pool.conn)?;
    let employees = list_employees(&pool.conn)?;
    let store = employees
        .iter()
        .find(|e| e.id == employee_id)
        .and_then(|e| e.store_id.as_deref());
    let schedule = resolve_for_store(store, &stores, &cfg.default_shifts);

    let rows = {
        let mut stmt = pool
            .conn
            .prepare("SELECT * FROM attendance WHERE employee_id = ?1 ORDER BY date ASC")?;
        let mapped = stmt.query_map([employee_id], map_attendance_row)?;
        mapped.collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut changed = 0;
    for mut rec in rows {
        let before = (
            rec.lateness_minutes,
            rec.early_arrival_minutes,
            rec.overtime_minutes,
        );
        recompute_row(&mut rec, &schedule);
        let after = (
            rec.lateness_minutes,
            rec.early_arrival_minutes,
            rec.overtime_minutes,
        );

        if before != after {
            update_attendance_minutes(&pool.conn, &rec)?;
            changed += 1;
        }
    }

    Ok(changed)
}

/// Recompute stored minutes for every employee that has attendance rows.
pub fn recompute_all(pool: &DbPool, cfg: &Config) -> AppResult<usize> {
    // Collect ids first; the per-employee pass prepares its own statements.
    let ids: Vec<String> = {
        let mut stmt = pool
            .conn
            .prepare("SELECT DISTINCT employee_id FROM attendance ORDER BY employee_id ASC")?;
        let mapped = stmt.query_map([], |row| row.get::<_, String>(0))?;
        mapped.collect::<rusqlite::Result<Vec<_>>>()?
    };

    let tx = pool.conn.unchecked_transaction()?;
    let mut total = 0;
    for id in ids {
        total += recompute_employee(pool, cfg, &id)?;
    }
    tx.commit()?;

    Ok(total)
}
