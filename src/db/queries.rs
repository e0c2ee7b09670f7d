use crate::core::calculator::schedule::StoreSchedules;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::attendance_status::AttendanceStatus;
use crate::models::employee::Employee;
use crate::models::month::PayrollMonth;
use crate::models::payroll::{LineItem, PayrollRecord, PayrollStatus};
use crate::models::schedule::{ShiftSchedule, ShiftWindow};
use crate::models::shift::ShiftKey;
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, ffi, params};

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_time(raw: Option<String>) -> Result<Option<NaiveTime>> {
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidTime(s))),
    }
}

fn fmt_db_time(t: Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M").to_string())
}

/// Only UNIQUE / PRIMARY KEY collisions; NOT NULL and CHECK failures stay
/// plain database errors.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == ErrorCode::ConstraintViolation
                && matches!(
                    f.extended_code,
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
    )
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

fn map_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        role: row.get("role")?,
        store_id: row.get("store_id")?,
        base_salary: row.get("base_salary")?,
    })
}

pub fn upsert_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (id, name, role, store_id, base_salary, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             role = excluded.role,
             store_id = excluded.store_id,
             base_salary = excluded.base_salary",
        params![
            emp.id,
            emp.name,
            emp.role,
            emp.store_id,
            emp.base_salary,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get_employee(conn: &Connection, id: &str) -> AppResult<Option<Employee>> {
    let emp = conn
        .query_row("SELECT * FROM employees WHERE id = ?1", [id], map_employee)
        .optional()?;
    Ok(emp)
}

pub fn list_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Store shift schedules
// ---------------------------------------------------------------------------

pub fn set_store_shift(
    conn: &Connection,
    store_id: &str,
    shift: ShiftKey,
    window: &ShiftWindow,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO store_shifts (store_id, shift, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(store_id, shift) DO UPDATE SET
             start_time = excluded.start_time,
             end_time = excluded.end_time",
        params![
            store_id,
            shift.to_db_str(),
            window.start.format("%H:%M").to_string(),
            window.end.format("%H:%M").to_string(),
        ],
    )?;
    Ok(())
}

fn map_shift_row(row: &Row) -> Result<(String, ShiftKey, ShiftWindow)> {
    let store: String = row.get("store_id")?;
    let shift_str: String = row.get("shift")?;
    let shift = ShiftKey::from_db_str(&shift_str)
        .ok_or_else(|| conversion_error(1, AppError::InvalidShift(shift_str.clone())))?;

    let start = parse_db_time(row.get("start_time")?)?;
    let end = parse_db_time(row.get("end_time")?)?;
    match (start, end) {
        (Some(start), Some(end)) => Ok((store, shift, ShiftWindow::new(start, end))),
        _ => Err(conversion_error(
            2,
            AppError::InvalidTime(format!("empty boundary for {}/{}", store, shift_str)),
        )),
    }
}

/// Custom schedule of one store; `None` when the store has no own shifts.
pub fn load_store_schedule(conn: &Connection, store_id: &str) -> AppResult<Option<ShiftSchedule>> {
    let mut stmt = conn.prepare("SELECT * FROM store_shifts WHERE store_id = ?1")?;
    let rows = stmt.query_map([store_id], map_shift_row)?;

    let mut schedule = ShiftSchedule::empty();
    for r in rows {
        let (_, shift, window) = r?;
        schedule.set(shift, window);
    }

    Ok((!schedule.is_empty()).then_some(schedule))
}

pub fn load_all_store_schedules(conn: &Connection) -> AppResult<StoreSchedules> {
    let mut stmt = conn.prepare("SELECT * FROM store_shifts ORDER BY store_id, shift")?;
    let rows = stmt.query_map([], map_shift_row)?;

    let mut out = StoreSchedules::new();
    for r in rows {
        let (store, shift, window) = r?;
        out.entry(store)
            .or_insert_with(ShiftSchedule::empty)
            .set(shift, window);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

pub fn map_attendance_row(row: &Row) -> Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let shift_str: String = row.get("shift")?;
    let shift = ShiftKey::from_db_str(&shift_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidShift(shift_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidStatus(status_str.clone())))?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date,
        shift,
        check_in: parse_db_time(row.get("check_in")?)?,
        check_out: parse_db_time(row.get("check_out")?)?,
        lateness_minutes: row.get("lateness_minutes")?,
        early_arrival_minutes: row.get("early_arrival_minutes")?,
        overtime_minutes: row.get("overtime_minutes")?,
        status,
        notes: row.get("notes")?,
    })
}

/// Stored rows of `employee_id` in `[from, to]`, ascending by date.
pub fn load_attendance_range(
    conn: &Connection,
    employee_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE employee_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(
        params![employee_id, from.to_string(), to.to_string()],
        map_attendance_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_attendance(
    conn: &Connection,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM attendance WHERE employee_id = ?1 AND date = ?2",
            params![employee_id, date.to_string()],
            map_attendance_row,
        )
        .optional()?;
    Ok(rec)
}

/// Create or update the row for (employee, date). Returns the row id.
pub fn upsert_attendance(conn: &Connection, rec: &AttendanceRecord) -> AppResult<i64> {
    let id = conn.query_row(
        "INSERT INTO attendance (employee_id, date, shift, check_in, check_out,
                                 lateness_minutes, early_arrival_minutes, overtime_minutes,
                                 status, notes, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(employee_id, date) DO UPDATE SET
             shift = excluded.shift,
             check_in = excluded.check_in,
             check_out = excluded.check_out,
             lateness_minutes = excluded.lateness_minutes,
             early_arrival_minutes = excluded.early_arrival_minutes,
             overtime_minutes = excluded.overtime_minutes,
             status = excluded.status,
             notes = excluded.notes,
             updated_at = excluded.updated_at
         RETURNING id",
        params![
            rec.employee_id,
            rec.date.to_string(),
            rec.shift.to_db_str(),
            fmt_db_time(rec.check_in),
            fmt_db_time(rec.check_out),
            rec.lateness_minutes,
            rec.early_arrival_minutes,
            rec.overtime_minutes,
            rec.status.to_db_str(),
            rec.notes,
            Local::now().to_rfc3339(),
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Overwrite only the minute columns of a stored row.
pub fn update_attendance_minutes(conn: &Connection, rec: &AttendanceRecord) -> AppResult<()> {
    conn.execute(
        "UPDATE attendance
         SET lateness_minutes = ?1, early_arrival_minutes = ?2, overtime_minutes = ?3
         WHERE id = ?4",
        params![
            rec.lateness_minutes,
            rec.early_arrival_minutes,
            rec.overtime_minutes,
            rec.id,
        ],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

fn parse_items(raw: &str) -> Result<Vec<LineItem>> {
    serde_json::from_str(raw).map_err(|e| conversion_error(0, AppError::Json(e)))
}

pub fn map_payroll_row(row: &Row) -> Result<PayrollRecord> {
    let month_str: String = row.get("month")?;
    let month = PayrollMonth::parse(&month_str).map_err(|e| conversion_error(0, e))?;

    let status_str: String = row.get("status")?;
    let status = PayrollStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(0, AppError::Other(format!("Invalid payroll status: {status_str}"))))?;

    let bonuses: String = row.get("bonuses")?;
    let deductions: String = row.get("deductions")?;

    Ok(PayrollRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        store_id: row.get("store_id")?,
        month,
        base_salary: row.get("base_salary")?,
        overtime_pay: row.get("overtime_pay")?,
        bonuses: parse_items(&bonuses)?,
        deductions: parse_items(&deductions)?,
        total_amount: row.get("total_amount")?,
        status,
        paid_at: row.get("paid_at")?,
        version: row.get("version")?,
    })
}

pub fn get_payroll(
    conn: &Connection,
    employee_id: &str,
    store_id: &str,
    month: PayrollMonth,
) -> AppResult<Option<PayrollRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM payroll WHERE employee_id = ?1 AND store_id = ?2 AND month = ?3",
            params![employee_id, store_id, month.to_string()],
            map_payroll_row,
        )
        .optional()?;
    Ok(rec)
}

pub fn list_payroll_month(conn: &Connection, month: PayrollMonth) -> AppResult<Vec<PayrollRecord>> {
    let mut stmt =
        conn.prepare("SELECT * FROM payroll WHERE month = ?1 ORDER BY employee_id, store_id")?;
    let rows = stmt.query_map([month.to_string()], map_payroll_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn conflict(rec: &PayrollRecord) -> AppError {
    AppError::WriteConflict {
        employee_id: rec.employee_id.clone(),
        store_id: rec.store_id.clone(),
        month: rec.month.to_string(),
    }
}

/// Insert a new record. A row already present for employee+store+month is
/// reported as `WriteConflict`; nothing is written.
pub fn insert_payroll(conn: &Connection, rec: &mut PayrollRecord) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let res = conn.query_row(
        "INSERT INTO payroll (employee_id, store_id, month, base_salary, overtime_pay,
                              bonuses, deductions, total_amount, status, paid_at,
                              version, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, ?11, ?11)
         RETURNING id",
        params![
            rec.employee_id,
            rec.store_id,
            rec.month.to_string(),
            rec.base_salary,
            rec.overtime_pay,
            serde_json::to_string(&rec.bonuses)?,
            serde_json::to_string(&rec.deductions)?,
            rec.total_amount,
            rec.status.to_db_str(),
            rec.paid_at,
            now,
        ],
        |row| row.get::<_, i64>(0),
    );

    match res {
        Ok(id) => {
            rec.id = id;
            rec.version = 1;
            Ok(())
        }
        Err(e) if is_unique_violation(&e) => Err(conflict(rec)),
        Err(e) => Err(e.into()),
    }
}

/// Write every mutable field of `rec`, provided the stored version still
/// equals `rec.version`. On success the version is bumped in both places;
/// on mismatch nothing is written and `WriteConflict` is returned.
pub fn update_payroll(conn: &Connection, rec: &mut PayrollRecord) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE payroll
         SET base_salary = ?1, overtime_pay = ?2, bonuses = ?3, deductions = ?4,
             total_amount = ?5, status = ?6, paid_at = ?7,
             version = version + 1, updated_at = ?8
         WHERE id = ?9 AND version = ?10",
        params![
            rec.base_salary,
            rec.overtime_pay,
            serde_json::to_string(&rec.bonuses)?,
            serde_json::to_string(&rec.deductions)?,
            rec.total_amount,
            rec.status.to_db_str(),
            rec.paid_at,
            Local::now().to_rfc3339(),
            rec.id,
            rec.version,
        ],
    )?;

    if changed == 0 {
        return Err(conflict(rec));
    }

    rec.version += 1;
    Ok(())
}
