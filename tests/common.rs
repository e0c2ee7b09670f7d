#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use shiftpay::db::pool::DbPool;
use shiftpay::models::attendance::AttendanceRecord;
use shiftpay::models::attendance_status::AttendanceStatus;
use shiftpay::models::shift::ShiftKey;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sp() -> Command {
    cargo_bin_cmd!("shiftpay")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftpay.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Temp file path for config-file tests, removed if present
pub fn temp_file(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftpay.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

/// `--test init` on a fresh DB, then one employee `E1` on store `S1`
/// with a base salary of 9.000.000.
pub fn init_db_with_employee(db_path: &str) {
    sp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    sp().args([
        "--db", db_path, "employee", "--add", "--id", "E1", "--name", "Sari", "--store", "S1",
        "--salary", "9000000",
    ])
    .assert()
    .success();
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}

/// Stored-looking row (id != 0) with explicit minute fields.
pub fn row(date: &str, status: AttendanceStatus, late: u32, early: u32, ot: u32) -> AttendanceRecord {
    AttendanceRecord {
        id: 1,
        employee_id: "E1".into(),
        date: d(date),
        shift: ShiftKey::Pagi,
        check_in: None,
        check_out: None,
        lateness_minutes: late,
        early_arrival_minutes: early,
        overtime_minutes: ot,
        status,
        notes: String::new(),
    }
}

pub fn memory_pool() -> DbPool {
    DbPool::in_memory().expect("in-memory db")
}
