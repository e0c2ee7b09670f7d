//! Schema migrations. Each migration runs once; applied versions are
//! recorded in the `log` table as `migration_applied` rows.

use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

type MigrationFn = fn(&Connection) -> Result<()>;

/// (version, description, body) in application order.
const MIGRATIONS: &[(&str, &str, MigrationFn)] = &[
    (
        "20250601_0001_base_schema",
        "Created employees, store_shifts and attendance tables",
        create_base_schema,
    ),
    (
        "20250610_0002_payroll",
        "Created payroll table",
        create_payroll_table,
    ),
    (
        "20250702_0003_payroll_version",
        "Added version and paid_at to payroll",
        add_payroll_version,
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_base_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id           TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            role         TEXT NOT NULL DEFAULT '',
            store_id     TEXT,
            base_salary  INTEGER,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS store_shifts (
            store_id    TEXT NOT NULL,
            shift       TEXT NOT NULL CHECK(shift IN ('pagi','siang','malam')),
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            PRIMARY KEY (store_id, shift)
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id            TEXT NOT NULL,
            date                   TEXT NOT NULL,
            shift                  TEXT NOT NULL DEFAULT 'pagi' CHECK(shift IN ('pagi','siang','malam')),
            check_in               TEXT,
            check_out              TEXT,
            lateness_minutes       INTEGER NOT NULL DEFAULT 0,
            early_arrival_minutes  INTEGER NOT NULL DEFAULT 0,
            overtime_minutes       INTEGER NOT NULL DEFAULT 0,
            status                 TEXT NOT NULL DEFAULT ''
                                   CHECK(status IN ('','hadir','cuti','izin','sakit','alpha')),
            notes                  TEXT NOT NULL DEFAULT '',
            updated_at             TEXT NOT NULL,
            UNIQUE (employee_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_employee_date ON attendance(employee_id, date);
        "#,
    )
}

fn create_payroll_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS payroll (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   TEXT NOT NULL,
            store_id      TEXT NOT NULL,
            month         TEXT NOT NULL,
            base_salary   INTEGER NOT NULL DEFAULT 0,
            overtime_pay  INTEGER NOT NULL DEFAULT 0,
            bonuses       TEXT NOT NULL DEFAULT '[]',
            deductions    TEXT NOT NULL DEFAULT '[]',
            total_amount  INTEGER NOT NULL DEFAULT 0,
            status        TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending','paid')),
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            UNIQUE (employee_id, store_id, month)
        );

        CREATE INDEX IF NOT EXISTS idx_payroll_month ON payroll(month);
        "#,
    )
}

fn payroll_has_column(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('payroll')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == name {
            return Ok(true);
        }
    }
    Ok(false)
}

fn add_payroll_version(conn: &Connection) -> Result<()> {
    if !payroll_has_column(conn, "version")? {
        conn.execute(
            "ALTER TABLE payroll ADD COLUMN version INTEGER NOT NULL DEFAULT 1",
            [],
        )?;
    }
    if !payroll_has_column(conn, "paid_at")? {
        conn.execute("ALTER TABLE payroll ADD COLUMN paid_at TEXT", [])?;
    }
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions not yet applied to this database.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for (version, _, _) in MIGRATIONS {
        if !is_applied(conn, version)? {
            out.push(*version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Each migration and its `migration_applied` marker commit together.
/// Called by `db::initialize::init_db`.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, description, body) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        body(&tx)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [*version, *description],
        )?;
        tx.commit()?;

        success(format!("Migration applied: {} → {}", version, description));
        applied += 1;
    }

    Ok(applied)
}
