mod common;
use common::{d, row, t};

use shiftpay::config::Rates;
use shiftpay::core::calculator::grid::{build_grid, build_grid_with_edits, month_grid};
use shiftpay::core::calculator::suggestions::{
    DerivationParams, Selection, absence_amount, derive_suggestions,
};
use shiftpay::errors::AppError;
use shiftpay::models::attendance_status::AttendanceStatus;
use shiftpay::models::month::PayrollMonth;
use shiftpay::models::suggestion::{SuggestionKind, SuggestionSource};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[test]
fn test_grid_has_one_row_per_day() {
    let stored = vec![row("2025-06-03", AttendanceStatus::Hadir, 5, 0, 0)];
    let grid = build_grid("E1", d("2025-06-01"), d("2025-06-07"), &stored).unwrap();

    assert_eq!(grid.len(), 7);
    for pair in grid.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    assert_eq!(grid[2].lateness_minutes, 5);
    assert!(grid[0].is_placeholder());
    assert_eq!(grid[0].status, AttendanceStatus::Unset);
}

#[test]
fn test_grid_ignores_rows_of_other_employees_and_outside_range() {
    let mut other = row("2025-06-02", AttendanceStatus::Alpha, 0, 0, 0);
    other.employee_id = "E2".into();
    let outside = row("2025-07-01", AttendanceStatus::Hadir, 0, 0, 0);

    let grid = build_grid("E1", d("2025-06-01"), d("2025-06-30"), &[other, outside]).unwrap();
    assert_eq!(grid.len(), 30);
    assert!(grid.iter().all(|r| r.is_placeholder()));
}

#[test]
fn test_grid_single_day_and_inverted_range() {
    let g = build_grid("E1", d("2025-06-05"), d("2025-06-05"), &[]).unwrap();
    assert_eq!(g.len(), 1);

    let err = build_grid("E1", d("2025-06-05"), d("2025-06-01"), &[]).unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
}

#[test]
fn test_grid_local_edits_win_over_stored_rows() {
    let stored = vec![row("2025-06-02", AttendanceStatus::Hadir, 10, 0, 0)];
    let edits = vec![row("2025-06-02", AttendanceStatus::Sakit, 0, 0, 0)];

    let g = build_grid_with_edits("E1", d("2025-06-01"), d("2025-06-03"), &stored, &edits).unwrap();
    assert_eq!(g[1].status, AttendanceStatus::Sakit);
    assert_eq!(g[1].lateness_minutes, 0);
}

#[test]
fn test_month_grid_length_follows_calendar() {
    let feb = PayrollMonth::parse("2024-02").unwrap();
    assert_eq!(month_grid("E1", feb, &[]).unwrap().len(), 29);
    let jun = PayrollMonth::parse("2025-06").unwrap();
    assert_eq!(month_grid("E1", jun, &[]).unwrap().len(), 30);
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

#[test]
fn test_absence_amount_rounds_half_up() {
    assert_eq!(absence_amount(9_000_000, 30), 300_000);
    assert_eq!(absence_amount(100, 30), 3); // 3.33
    assert_eq!(absence_amount(45, 30), 2); // 1.5
    assert_eq!(absence_amount(0, 30), 0);
}

#[test]
fn test_lateness_amount_uses_rate() {
    let rows = vec![row("2025-06-02", AttendanceStatus::Hadir, 12, 0, 0)];
    let set = derive_suggestions(&rows, Some(9_000_000), &DerivationParams::default());

    assert_eq!(set.items.len(), 1);
    let it = &set.items[0];
    assert_eq!(it.source, SuggestionSource::Lateness);
    assert_eq!(it.kind, SuggestionKind::Deduction);
    assert_eq!(it.amount, 12_000);
    assert_eq!(it.minutes, Some(12));
    assert_eq!(it.id, "2025-06-02:lateness");
}

#[test]
fn test_month_scenario_two_lateness_one_alpha() {
    let month = PayrollMonth::parse("2025-06").unwrap();
    let stored = vec![
        row("2025-06-20", AttendanceStatus::Alpha, 0, 0, 0),
        row("2025-06-03", AttendanceStatus::Hadir, 10, 0, 0),
        row("2025-06-11", AttendanceStatus::Hadir, 5, 0, 0),
    ];
    let grid = month_grid("E1", month, &stored).unwrap();

    let set = derive_suggestions(&grid, Some(9_000_000), &DerivationParams::default());
    let amounts: Vec<i64> = set.items.iter().map(|i| i.amount).collect();
    assert_eq!(amounts, vec![10_000, 5_000, 300_000]);
    assert_eq!(set.attendance_rows, 3);

    let totals = set.totals(&set.default_selection());
    assert_eq!(totals.selected, 3);
    assert_eq!(totals.deduction_total, 315_000);
    assert_eq!(totals.bonus_total, 0);
    assert_eq!(totals.net, -315_000);
}

#[test]
fn test_derivation_is_deterministic() {
    let rows = vec![
        row("2025-06-05", AttendanceStatus::Hadir, 0, 20, 30),
        row("2025-06-01", AttendanceStatus::Alpha, 0, 0, 0),
        row("2025-06-03", AttendanceStatus::Hadir, 7, 0, 0),
    ];
    let params = DerivationParams::default();

    let a = derive_suggestions(&rows, Some(3_000_000), &params);
    let mut reversed = rows.clone();
    reversed.reverse();
    let b = derive_suggestions(&reversed, Some(3_000_000), &params);

    assert_eq!(a, b);
    let ids: Vec<&str> = a.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "2025-06-01:alpha",
            "2025-06-03:lateness",
            "2025-06-05:early_arrival",
            "2025-06-05:late_departure",
        ]
    );
}

#[test]
fn test_bonus_rules_and_custom_rates() {
    let params = DerivationParams {
        rates: Rates {
            early_arrival: 2000,
            late_departure: 1000,
            lateness: 500,
            early_leave: 100,
        },
        ..DerivationParams::default()
    };
    let rows = vec![row("2025-06-02", AttendanceStatus::Hadir, 0, 15, 20)];
    let set = derive_suggestions(&rows, None, &params);

    assert_eq!(set.items.len(), 2);
    assert!(set.items.iter().all(|i| i.is_bonus()));
    assert_eq!(set.items[0].amount, 30_000);
    assert_eq!(set.items[1].amount, 20_000);
}

#[test]
fn test_early_leave_only_for_hadir_with_both_times() {
    let params = DerivationParams::default();

    let mut short_day = row("2025-06-02", AttendanceStatus::Hadir, 0, 0, 0);
    short_day.check_in = Some(t("07:00"));
    short_day.check_out = Some(t("13:00"));

    let set = derive_suggestions(&[short_day.clone()], None, &params);
    assert_eq!(set.items.len(), 1);
    assert_eq!(set.items[0].source, SuggestionSource::EarlyLeave);
    assert_eq!(set.items[0].minutes, Some(120));
    assert_eq!(set.items[0].amount, 120 * 800);

    // missing check-out: not evaluable
    let mut open_day = short_day.clone();
    open_day.check_out = None;
    assert!(derive_suggestions(&[open_day], None, &params).is_empty());

    // half-day leave recorded as izin: no early leave
    let mut izin = short_day;
    izin.status = AttendanceStatus::Izin;
    assert!(derive_suggestions(&[izin], None, &params).is_empty());
}

#[test]
fn test_alpha_without_salary_is_zero_amount() {
    let rows = vec![row("2025-06-02", AttendanceStatus::Alpha, 0, 0, 0)];
    let set = derive_suggestions(&rows, None, &DerivationParams::default());
    assert_eq!(set.items.len(), 1);
    assert_eq!(set.items[0].amount, 0);
}

#[test]
fn test_no_data_is_distinct_from_no_anomalies() {
    let month = PayrollMonth::parse("2025-06").unwrap();
    let params = DerivationParams::default();

    let empty = derive_suggestions(&month_grid("E1", month, &[]).unwrap(), None, &params);
    assert!(empty.is_no_data());
    assert!(empty.is_empty());

    let clean = vec![row("2025-06-02", AttendanceStatus::Hadir, 0, 0, 0)];
    let set = derive_suggestions(&month_grid("E1", month, &clean).unwrap(), None, &params);
    assert!(!set.is_no_data());
    assert!(set.is_empty());
}

#[test]
fn test_selection_toggle_and_retain() {
    let rows = vec![
        row("2025-06-03", AttendanceStatus::Hadir, 10, 0, 0),
        row("2025-06-11", AttendanceStatus::Hadir, 5, 0, 0),
    ];
    let set = derive_suggestions(&rows, None, &DerivationParams::default());
    let mut sel = set.default_selection();
    assert_eq!(sel.len(), 2);

    assert!(!sel.toggle("2025-06-03:lateness"));
    assert_eq!(set.totals(&sel).deduction_total, 5_000);
    assert!(sel.toggle("2025-06-03:lateness"));

    let mut stale = Selection::from_ids(["2025-06-11:lateness", "2025-05-01:alpha"]);
    stale.retain_known(&set.items);
    assert_eq!(stale.ids().collect::<Vec<_>>(), vec!["2025-06-11:lateness"]);

    assert_eq!(set.totals(&Selection::none()).selected, 0);
}

#[test]
fn test_amounts_stay_non_negative_and_bounded() {
    let params = DerivationParams {
        rates: Rates {
            lateness: -1000,
            early_arrival: i64::MAX,
            ..Rates::default()
        },
        ..DerivationParams::default()
    };
    let rows = vec![row("2025-06-03", AttendanceStatus::Hadir, 12, 5, 0)];
    let set = derive_suggestions(&rows, None, &params);

    assert!(set.items.iter().all(|i| i.amount >= 0));
    let early = set
        .items
        .iter()
        .find(|i| i.source == SuggestionSource::EarlyArrival)
        .unwrap();
    assert_eq!(early.amount, i64::MAX);

    let totals = set.totals(&set.default_selection());
    assert_eq!(totals.bonus_total, i64::MAX);
    assert_eq!(totals.deduction_total, 0);
}

#[test]
fn test_absence_amount_rounds_half_up_without_overflow() {
    assert_eq!(absence_amount(15, 30), 1);
    assert_eq!(absence_amount(14, 30), 0);
    assert_eq!(absence_amount(i64::MAX, 1), i64::MAX);
    assert_eq!(absence_amount(i64::MAX, 30), i64::MAX / 30);
}
