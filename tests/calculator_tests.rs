mod common;
use common::{d, t};

use shiftpay::core::calculator::delta::{
    apply_edit, compute_minutes, detect_shift, early_arrival, lateness, overtime, worked_minutes,
};
use shiftpay::core::calculator::schedule::{StoreSchedules, resolve, resolve_for_store};
use shiftpay::models::attendance::{AttendanceEdit, AttendanceRecord};
use shiftpay::models::attendance_status::AttendanceStatus;
use shiftpay::models::schedule::{ShiftSchedule, ShiftWindow};
use shiftpay::models::shift::ShiftKey;

#[test]
fn test_check_in_on_shift_start_is_neither_late_nor_early() {
    let s = ShiftSchedule::builtin();
    assert_eq!(lateness(Some(t("07:00")), ShiftKey::Pagi, &s), 0);
    assert_eq!(early_arrival(Some(t("07:00")), ShiftKey::Pagi, &s), 0);
}

#[test]
fn test_early_and_late_check_in() {
    let s = ShiftSchedule::builtin();

    assert_eq!(early_arrival(Some(t("06:45")), ShiftKey::Pagi, &s), 15);
    assert_eq!(lateness(Some(t("06:45")), ShiftKey::Pagi, &s), 0);

    assert_eq!(lateness(Some(t("07:12")), ShiftKey::Pagi, &s), 12);
    assert_eq!(early_arrival(Some(t("07:12")), ShiftKey::Pagi, &s), 0);

    assert_eq!(lateness(Some(t("15:30")), ShiftKey::Siang, &s), 30);
}

#[test]
fn test_missing_times_yield_zero() {
    let s = ShiftSchedule::builtin();
    let m = compute_minutes(None, None, ShiftKey::Malam, &s);
    assert_eq!((m.lateness, m.early_arrival, m.overtime), (0, 0, 0));
}

#[test]
fn test_overtime_after_shift_end() {
    let s = ShiftSchedule::builtin();
    assert_eq!(overtime(Some(t("15:20")), ShiftKey::Pagi, &s), 20);
    assert_eq!(overtime(Some(t("14:50")), ShiftKey::Pagi, &s), 0);
}

#[test]
fn test_overtime_is_monotonic() {
    let s = ShiftSchedule::builtin();
    let base = overtime(Some(t("15:05")), ShiftKey::Pagi, &s);
    for k in 1..=60u32 {
        let later = t("15:05") + chrono::Duration::minutes(k as i64);
        assert_eq!(overtime(Some(later), ShiftKey::Pagi, &s), base + k);
    }
}

#[test]
fn test_night_shift_crossing_midnight() {
    let s = ShiftSchedule::builtin(); // malam 23:00 → 07:00

    // after midnight counts as late, not as 22h early
    assert_eq!(lateness(Some(t("00:30")), ShiftKey::Malam, &s), 90);
    assert_eq!(early_arrival(Some(t("00:30")), ShiftKey::Malam, &s), 0);

    assert_eq!(early_arrival(Some(t("22:40")), ShiftKey::Malam, &s), 20);

    // check-out on the next morning
    assert_eq!(overtime(Some(t("07:45")), ShiftKey::Malam, &s), 45);
    assert_eq!(overtime(Some(t("06:30")), ShiftKey::Malam, &s), 0);
}

#[test]
fn test_worked_minutes_wraps_over_midnight() {
    assert_eq!(worked_minutes(Some(t("07:00")), Some(t("15:00"))), Some(480));
    assert_eq!(worked_minutes(Some(t("23:00")), Some(t("07:00"))), Some(480));
    assert_eq!(worked_minutes(Some(t("07:00")), None), None);
}

#[test]
fn test_detect_shift_buckets() {
    assert_eq!(detect_shift(t("06:00")), ShiftKey::Pagi);
    assert_eq!(detect_shift(t("13:59")), ShiftKey::Pagi);
    assert_eq!(detect_shift(t("14:00")), ShiftKey::Siang);
    assert_eq!(detect_shift(t("21:59")), ShiftKey::Siang);
    assert_eq!(detect_shift(t("22:00")), ShiftKey::Malam);
    assert_eq!(detect_shift(t("05:59")), ShiftKey::Malam);
}

#[test]
fn test_apply_edit_rederives_minutes() {
    let s = ShiftSchedule::builtin();
    let mut rec = AttendanceRecord::placeholder("E1", d("2025-06-02"));

    apply_edit(
        &mut rec,
        &AttendanceEdit {
            check_in: Some(Some(t("06:45"))),
            check_out: Some(Some(t("15:20"))),
            status: Some(AttendanceStatus::Hadir),
            ..Default::default()
        },
        &s,
    );

    assert_eq!(rec.shift, ShiftKey::Pagi);
    assert_eq!(rec.early_arrival_minutes, 15);
    assert_eq!(rec.lateness_minutes, 0);
    assert_eq!(rec.overtime_minutes, 20);
    assert_eq!(rec.status, AttendanceStatus::Hadir);
}

#[test]
fn test_apply_edit_detects_shift_for_new_row_only() {
    let s = ShiftSchedule::builtin();

    let mut fresh = AttendanceRecord::placeholder("E1", d("2025-06-02"));
    apply_edit(
        &mut fresh,
        &AttendanceEdit {
            check_in: Some(Some(t("15:10"))),
            ..Default::default()
        },
        &s,
    );
    assert_eq!(fresh.shift, ShiftKey::Siang);
    assert_eq!(fresh.lateness_minutes, 10);

    // a stored row keeps its shift
    let mut stored = AttendanceRecord::placeholder("E1", d("2025-06-03"));
    stored.id = 7;
    apply_edit(
        &mut stored,
        &AttendanceEdit {
            check_in: Some(Some(t("15:10"))),
            ..Default::default()
        },
        &s,
    );
    assert_eq!(stored.shift, ShiftKey::Pagi);
    assert_eq!(stored.lateness_minutes, 8 * 60 + 10);
}

#[test]
fn test_apply_edit_notes_only_keeps_minutes() {
    let s = ShiftSchedule::builtin();
    let mut rec = AttendanceRecord::placeholder("E1", d("2025-06-02"));
    rec.id = 3;
    rec.lateness_minutes = 42; // stale on purpose

    apply_edit(
        &mut rec,
        &AttendanceEdit {
            notes: Some("traffic".into()),
            ..Default::default()
        },
        &s,
    );

    assert_eq!(rec.lateness_minutes, 42);
    assert_eq!(rec.notes, "traffic");
}

#[test]
fn test_apply_edit_clearing_check_in_zeroes_lateness() {
    let s = ShiftSchedule::builtin();
    let mut rec = AttendanceRecord::placeholder("E1", d("2025-06-02"));
    apply_edit(
        &mut rec,
        &AttendanceEdit {
            check_in: Some(Some(t("07:30"))),
            ..Default::default()
        },
        &s,
    );
    assert_eq!(rec.lateness_minutes, 30);

    apply_edit(
        &mut rec,
        &AttendanceEdit {
            check_in: Some(None),
            ..Default::default()
        },
        &s,
    );
    assert_eq!(rec.check_in, None);
    assert_eq!(rec.lateness_minutes, 0);
}

#[test]
fn test_resolve_uses_default_without_custom() {
    let default = ShiftSchedule::builtin();
    assert_eq!(default.iter().count(), 3);
    assert_eq!(resolve(None, &default), default);
    assert_eq!(resolve(Some(&ShiftSchedule::empty()), &default), default);
}

#[test]
fn test_resolve_completes_partial_custom_schedule() {
    let default = ShiftSchedule::builtin();
    let mut custom = ShiftSchedule::empty();
    custom.set(ShiftKey::Pagi, ShiftWindow::hm((8, 0), (16, 0)));

    let r = resolve(Some(&custom), &default);
    assert_eq!(r.window(ShiftKey::Pagi), ShiftWindow::hm((8, 0), (16, 0)));
    assert_eq!(r.window(ShiftKey::Siang), default.window(ShiftKey::Siang));

    // same check-in, different store schedule → different lateness
    assert_eq!(lateness(Some(t("07:30")), ShiftKey::Pagi, &default), 30);
    assert_eq!(lateness(Some(t("07:30")), ShiftKey::Pagi, &r), 0);
    assert_eq!(early_arrival(Some(t("07:30")), ShiftKey::Pagi, &r), 30);
}

#[test]
fn test_resolve_for_unknown_store_falls_back() {
    let default = ShiftSchedule::builtin();
    let mut stores = StoreSchedules::new();
    let mut custom = ShiftSchedule::empty();
    custom.set(ShiftKey::Malam, ShiftWindow::hm((22, 0), (6, 0)));
    stores.insert("S1".into(), custom);

    assert_eq!(resolve_for_store(Some("S9"), &stores, &default), default);
    assert_eq!(resolve_for_store(None, &stores, &default), default);
    assert_eq!(
        resolve_for_store(Some("S1"), &stores, &default).window(ShiftKey::Malam),
        ShiftWindow::hm((22, 0), (6, 0))
    );
}

#[test]
fn test_day_shift_check_out_after_midnight_is_not_overtime() {
    let s = ShiftSchedule::builtin(); // siang 15:00 → 23:00
    assert_eq!(overtime(Some(t("23:40")), ShiftKey::Siang, &s), 40);
    assert_eq!(overtime(Some(t("00:15")), ShiftKey::Siang, &s), 0);
    assert_eq!(worked_minutes(Some(t("15:00")), Some(t("00:15"))), Some(555));
}
