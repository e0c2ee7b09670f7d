mod common;
use common::{d, temp_file};

use shiftpay::config::Config;
use shiftpay::config::migrate::{check_config_file, migrate_config_file};
use shiftpay::core::calculator::suggestions::DerivationParams;
use shiftpay::errors::AppError;
use shiftpay::models::month::PayrollMonth;
use shiftpay::models::schedule::ShiftWindow;
use shiftpay::models::shift::ShiftKey;
use shiftpay::utils::date::{days_inclusive, parse_period};
use std::fs;

#[test]
fn test_missing_config_file_gives_defaults() {
    let path = temp_file("cfg_missing", "conf");
    let cfg = Config::load_from(&path).unwrap();

    assert_eq!(cfg.rates.lateness, 1000);
    assert_eq!(cfg.rates.early_arrival, 1500);
    assert_eq!(cfg.standard_work_hours, 8);
    assert_eq!(cfg.absence_divisor, 30);
    assert_eq!(
        cfg.default_shifts.window(ShiftKey::Malam),
        ShiftWindow::hm((23, 0), (7, 0))
    );
}

#[test]
fn test_partial_config_is_completed_by_serde_defaults() {
    let path = temp_file("cfg_partial", "conf");
    fs::write(
        &path,
        "database: /tmp/x.sqlite\nrates:\n  lateness: 2000\ndefault_shifts:\n  pagi:\n    start: \"08:00\"\n    end: \"16:00\"\n",
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.rates.lateness, 2000);
    assert_eq!(cfg.rates.early_leave, 800);
    assert_eq!(
        cfg.default_shifts.window(ShiftKey::Pagi),
        ShiftWindow::hm((8, 0), (16, 0))
    );

    let params = DerivationParams::from(&cfg);
    assert_eq!(params.standard_minutes, 480);
    assert_eq!(params.rates.lateness, 2000);
}

#[test]
fn test_invalid_config_is_an_error_not_a_panic() {
    let path = temp_file("cfg_invalid", "conf");
    fs::write(&path, "database: [unterminated\n").unwrap();
    assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
}

#[test]
fn test_check_and_migrate_config_file() {
    let path = temp_file("cfg_migrate", "conf");
    fs::write(&path, "database: /tmp/x.sqlite\nrates:\n  lateness: 2000\n").unwrap();

    let missing = check_config_file(&path).unwrap();
    assert!(missing.contains(&"rates.early_arrival".to_string()));
    assert!(missing.contains(&"absence_divisor".to_string()));
    assert!(!missing.contains(&"rates.lateness".to_string()));

    let added = migrate_config_file(&path).unwrap();
    assert_eq!(added, missing);
    assert!(check_config_file(&path).unwrap().is_empty());

    // user value kept
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.rates.lateness, 2000);
    assert_eq!(cfg.database, "/tmp/x.sqlite");

    assert!(migrate_config_file(&path).unwrap().is_empty());
}

#[test]
fn test_month_parsing_errors_are_distinct() {
    assert!(matches!(
        PayrollMonth::parse("2025/06"),
        Err(AppError::InvalidMonth(_))
    ));
    assert!(matches!(
        PayrollMonth::parse("25-06"),
        Err(AppError::InvalidMonth(_))
    ));
    assert!(matches!(
        PayrollMonth::parse("2025-00"),
        Err(AppError::MonthOutOfRange(_))
    ));
    assert!(matches!(
        PayrollMonth::parse("2101-01"),
        Err(AppError::MonthOutOfRange(_))
    ));

    let m = PayrollMonth::parse("2025-6").unwrap();
    assert_eq!(m.to_string(), "2025-06");
    assert_eq!((m.year(), m.month(), m.num_days()), (2025, 6, 30));
    assert_eq!(m.first_day(), d("2025-06-01"));
    assert_eq!(m.last_day(), d("2025-06-30"));
    assert!(m.contains(d("2025-06-15")));
    assert!(!m.contains(d("2025-07-01")));
}

#[test]
fn test_period_parsing() {
    assert_eq!(
        parse_period("2025-02").unwrap(),
        (d("2025-02-01"), d("2025-02-28"))
    );
    assert_eq!(
        parse_period("2025-06-05").unwrap(),
        (d("2025-06-05"), d("2025-06-05"))
    );
    assert_eq!(
        parse_period("2025-06-01:2025-06-10").unwrap(),
        (d("2025-06-01"), d("2025-06-10"))
    );
    assert!(matches!(
        parse_period("2025-06-10:2025-06-01"),
        Err(AppError::InvalidRange { .. })
    ));
    assert_eq!(days_inclusive(d("2024-12-30"), d("2025-01-02")).unwrap().len(), 4);
}

#[test]
fn test_negative_rate_is_rejected() {
    let path = temp_file("cfg_negative_rate", "conf");
    fs::write(&path, "database: x.sqlite\nrates:\n  lateness: -1000\n").unwrap();

    match Config::load_from(&path) {
        Err(AppError::Config(msg)) => assert!(msg.contains("rates.lateness")),
        other => panic!("unexpected {:?}", other.map(|c| c.rates)),
    }
}

#[test]
fn test_non_positive_absence_divisor_is_rejected() {
    let path = temp_file("cfg_zero_divisor", "conf");
    fs::write(&path, "database: x.sqlite\nabsence_divisor: 0\n").unwrap();
    assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
}

#[test]
fn test_month_of_date_is_range_checked() {
    assert_eq!(
        PayrollMonth::of(d("2025-06-15")).unwrap(),
        PayrollMonth::parse("2025-06").unwrap()
    );
    assert!(matches!(
        PayrollMonth::of(d("1999-12-31")),
        Err(AppError::MonthOutOfRange(_))
    ));
}
