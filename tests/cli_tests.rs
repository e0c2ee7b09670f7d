use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_employee, setup_test_db, sp};

fn attend(db_path: &str, args: &[&str]) {
    let mut full = vec!["--db", db_path, "attend", "E1"];
    full.extend_from_slice(args);
    sp().args(&full).assert().success();
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    sp().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized").or(contains("initialization completed")));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_employee_add_and_list() {
    let db_path = setup_test_db("cli_employee");
    init_db_with_employee(&db_path);

    sp().args(["--db", &db_path, "employee", "--list"])
        .assert()
        .success()
        .stdout(contains("E1"))
        .stdout(contains("Sari"))
        .stdout(contains("9.000.000"));
}

#[test]
fn test_attend_prints_derived_minutes() {
    let db_path = setup_test_db("cli_attend");
    init_db_with_employee(&db_path);

    sp().args([
        "--db",
        &db_path,
        "attend",
        "E1",
        "2025-06-02",
        "--in",
        "06:45",
        "--out",
        "15:20",
        "--status",
        "hadir",
    ])
    .assert()
    .success()
    .stdout(contains("early 15 min"))
    .stdout(contains("overtime 20 min"));
}

#[test]
fn test_attend_rejects_bad_input() {
    let db_path = setup_test_db("cli_attend_bad");
    init_db_with_employee(&db_path);

    sp().args(["--db", &db_path, "attend", "E1", "2025-06-02", "--in", "7h"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    sp().args(["--db", &db_path, "attend", "E1", "2025-13-02", "--in", "07:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    sp().args(["--db", &db_path, "attend", "E1", "2025-06-02", "--status", "vacation"])
        .assert()
        .failure()
        .stderr(contains("Invalid attendance status"));

    sp().args(["--db", &db_path, "attend", "NOBODY", "2025-06-02", "--in", "07:00"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_grid_shows_every_day_of_the_month() {
    let db_path = setup_test_db("cli_grid");
    init_db_with_employee(&db_path);
    attend(&db_path, &["2025-06-03", "--in", "07:10"]);

    sp().args(["--db", &db_path, "grid", "E1", "--period", "2025-06"])
        .assert()
        .success()
        .stdout(contains("2025-06-01"))
        .stdout(contains("2025-06-30"))
        .stdout(contains("30 day(s), 1 recorded"));

    sp().args([
        "--db",
        &db_path,
        "grid",
        "E1",
        "--period",
        "2025-06-10:2025-06-01",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date range"));
}

#[test]
fn test_schedule_set_and_show() {
    let db_path = setup_test_db("cli_schedule");
    init_db_with_employee(&db_path);

    sp().args([
        "--db", &db_path, "schedule", "--set", "--store", "S1", "--shift", "malam", "--start",
        "22:00", "--end", "06:00",
    ])
    .assert()
    .success()
    .stdout(contains("(+1 day)"));

    sp().args(["--db", &db_path, "schedule", "--show", "--store", "S1"])
        .assert()
        .success()
        .stdout(contains("22:00"))
        .stdout(contains("store"))
        .stdout(contains("07:00"));

    sp().args([
        "--db", &db_path, "schedule", "--set", "--store", "S1", "--shift", "dawn", "--start",
        "04:00", "--end", "08:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid shift"));
}

#[test]
fn test_suggest_month_scenario_and_apply_selection() {
    let db_path = setup_test_db("cli_suggest_apply");
    init_db_with_employee(&db_path);

    attend(&db_path, &["2025-06-03", "--in", "07:10", "--status", "hadir"]);
    attend(&db_path, &["2025-06-11", "--in", "07:05", "--status", "hadir"]);
    attend(&db_path, &["2025-06-20", "--status", "alpha"]);

    sp().args(["--db", &db_path, "suggest", "E1", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(contains("2025-06-03:lateness"))
        .stdout(contains("2025-06-11:lateness"))
        .stdout(contains("2025-06-20:alpha"))
        .stdout(contains("300.000"))
        .stdout(contains("-315.000"));

    sp().args(["--db", &db_path, "payroll", "--month", "2025-06", "--generate"])
        .assert()
        .success()
        .stdout(contains("1 created"));

    sp().args([
        "--db",
        &db_path,
        "suggest",
        "E1",
        "--month",
        "2025-06",
        "--apply",
        "--select",
        "2025-06-03:lateness,2025-06-11:lateness",
    ])
    .assert()
    .success()
    .stdout(contains("0 bonus(es) and 2 deduction(s)"))
    .stdout(contains("8.985.000"));

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--list",
        "--employee",
        "E1",
    ])
    .assert()
    .success()
    .stdout(contains("Lateness deduction (2025-06-03)"))
    .stdout(contains("Lateness deduction (2025-06-11)"))
    .stdout(contains("8.985.000"));
}

#[test]
fn test_suggest_json_output() {
    let db_path = setup_test_db("cli_suggest_json");
    init_db_with_employee(&db_path);
    attend(&db_path, &["2025-06-03", "--in", "07:12"]);

    sp().args(["--db", &db_path, "suggest", "E1", "--month", "2025-06", "--json"])
        .assert()
        .success()
        .stdout(contains("\"id\": \"2025-06-03:lateness\""))
        .stdout(contains("\"amount\": 12000"))
        .stdout(contains("\"month\": \"2025-06\""))
        .stdout(contains("\"no_data\": false"));
}

#[test]
fn test_suggest_without_attendance_reports_no_data() {
    let db_path = setup_test_db("cli_suggest_nodata");
    init_db_with_employee(&db_path);

    sp().args(["--db", &db_path, "suggest", "E1", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(contains("No attendance data"));
}

#[test]
fn test_month_validation() {
    let db_path = setup_test_db("cli_month");
    init_db_with_employee(&db_path);

    sp().args(["--db", &db_path, "payroll", "--month", "June"])
        .assert()
        .failure()
        .stderr(contains("Malformed month"));

    sp().args(["--db", &db_path, "payroll", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("out of supported range"));

    sp().args(["--db", &db_path, "payroll", "--month", "1999-12"])
        .assert()
        .failure()
        .stderr(contains("out of supported range"));
}

#[test]
fn test_payroll_edit_and_pay() {
    let db_path = setup_test_db("cli_payroll_edit");
    init_db_with_employee(&db_path);

    sp().args(["--db", &db_path, "payroll", "--month", "2025-06", "--generate"])
        .assert()
        .success();

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--employee",
        "E1",
        "--overtime-pay",
        "250000",
        "--add-bonus",
        "Target=100000",
        "--add-deduction",
        "Uniform=50000",
    ])
    .assert()
    .success()
    .stdout(contains("total 9.300.000"));

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--employee",
        "E1",
        "--remove-deduction",
        "0",
        "--pay",
    ])
    .assert()
    .success()
    .stdout(contains("total 9.350.000"))
    .stdout(contains("[paid]"));

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--employee",
        "E1",
        "--base",
        "1",
    ])
    .assert()
    .failure()
    .stderr(contains("already paid"));

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--employee",
        "E1",
        "--remove-bonus",
        "5",
    ])
    .assert()
    .failure();
}

#[test]
fn test_payroll_negative_amount_rejected() {
    let db_path = setup_test_db("cli_payroll_negative");
    init_db_with_employee(&db_path);

    sp().args(["--db", &db_path, "payroll", "--month", "2025-06", "--generate"])
        .assert()
        .success();

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--employee",
        "E1",
        "--add-bonus",
        "Oops=-5",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid amount"));
}

#[test]
fn test_db_recompute_and_info() {
    let db_path = setup_test_db("cli_db_recompute");
    init_db_with_employee(&db_path);
    attend(&db_path, &["2025-06-03", "--shift", "pagi", "--in", "07:30"]);

    sp().args([
        "--db", &db_path, "schedule", "--set", "--store", "S1", "--shift", "pagi", "--start",
        "08:00", "--end", "16:00",
    ])
    .assert()
    .success();

    sp().args(["--db", &db_path, "db", "--recompute"])
        .assert()
        .success()
        .stdout(contains("1 row(s) updated"));

    sp().args(["--db", &db_path, "grid", "E1", "--period", "2025-06-03"])
        .assert()
        .success()
        .stdout(contains("1 day(s), 1 recorded"))
        .stdout(contains("late 00h 00m | early 00h 30m"));

    sp().args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Employees:"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_log_print_contains_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_employee(&db_path);
    attend(&db_path, &["2025-06-03", "--in", "07:10"]);

    sp().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("employee_add"))
        .stdout(contains("attend_add"));
}

#[test]
fn test_payroll_total_overflow_rejected() {
    let db_path = setup_test_db("cli_payroll_overflow");
    init_db_with_employee(&db_path);

    sp().args(["--db", &db_path, "payroll", "--month", "2025-06", "--generate"])
        .assert()
        .success();

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--employee",
        "E1",
        "--add-bonus",
        "x=9223372036854775807",
    ])
    .assert()
    .failure()
    .stderr(contains("out of range"));

    sp().args([
        "--db",
        &db_path,
        "payroll",
        "--month",
        "2025-06",
        "--list",
        "--employee",
        "E1",
    ])
    .assert()
    .success()
    .stdout(contains("9.000.000"));
}
