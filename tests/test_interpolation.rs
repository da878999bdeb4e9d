use chrono::{NaiveDate, NaiveTime};

use moon_phase::approximate::approximate_phase;
use moon_phase::interpolation::*;
use moon_phase::types::{MoonPhase, PhaseEvent};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn event(year: i32, month: u32, day: u32, phase: MoonPhase) -> PhaseEvent {
    PhaseEvent {
        date: date(year, month, day),
        phase,
        time_of_day: None,
    }
}

// ── Built-in table ──

#[test]
fn test_builtin_table_contents() {
    let table = EventTable::builtin();
    assert_eq!(table.len(), 9);
    assert!(!table.is_empty());

    let first = table.first().unwrap();
    assert_eq!(first.date, date(2025, 8, 23));
    assert_eq!(first.phase, MoonPhase::NewMoon);
    assert_eq!(first.time_of_day, NaiveTime::from_hms_opt(6, 6, 0));

    let last = table.last().unwrap();
    assert_eq!(last.date, date(2025, 10, 21));
    assert_eq!(last.phase, MoonPhase::NewMoon);
    assert_eq!(last.time_of_day, NaiveTime::from_hms_opt(12, 25, 0));
}

#[test]
fn test_builtin_table_strictly_increasing() {
    let events = EventTable::builtin().events();
    for pair in events.windows(2) {
        assert!(pair[0].date < pair[1].date, "{} !< {}", pair[0].date, pair[1].date);
    }
}

#[test]
fn test_builtin_table_validates() {
    let rebuilt = EventTable::new(EventTable::builtin().events().to_vec()).unwrap();
    assert_eq!(&rebuilt, EventTable::builtin());
    assert_eq!(&EventTable::default(), EventTable::builtin());
}

// ── Table validation ──

#[test]
fn test_empty_table_rejected() {
    let err = EventTable::new(Vec::new()).unwrap_err();
    assert_eq!(err.kind(), "malformed_event_table");
}

#[test]
fn test_unordered_table_rejected() {
    let err = EventTable::new(vec![
        event(2025, 9, 14, MoonPhase::LastQuarter),
        event(2025, 9, 7, MoonPhase::FullMoon),
    ])
    .unwrap_err();
    assert_eq!(err.kind(), "malformed_event_table");
    assert!(err.to_string().contains("2025-09-07"), "{}", err);
}

#[test]
fn test_duplicate_date_rejected() {
    let result = EventTable::new(vec![
        event(2025, 9, 7, MoonPhase::FullMoon),
        event(2025, 9, 7, MoonPhase::WaningGibbous),
    ]);
    assert!(result.is_err());
}

// ── Bracketing ──

#[test]
fn test_bracketing_between_events() {
    let (prev, next) = EventTable::builtin().bracketing_events(date(2025, 9, 11));
    assert_eq!(prev.unwrap().date, date(2025, 9, 7));
    assert_eq!(next.unwrap().date, date(2025, 9, 14));
}

#[test]
fn test_bracketing_on_event_date() {
    let (prev, next) = EventTable::builtin().bracketing_events(date(2025, 9, 7));
    assert_eq!(prev.unwrap().phase, MoonPhase::FullMoon);
    assert_eq!(next.unwrap().phase, MoonPhase::LastQuarter);
}

#[test]
fn test_bracketing_outside_table() {
    let table = EventTable::builtin();

    let (prev, next) = table.bracketing_events(date(2025, 8, 1));
    assert!(prev.is_none());
    assert_eq!(next.unwrap().date, date(2025, 8, 23));

    let (prev, next) = table.bracketing_events(date(2025, 10, 21));
    assert_eq!(prev.unwrap().date, date(2025, 10, 21));
    assert!(next.is_none());

    assert!(!table.covers(date(2025, 8, 22)));
    assert!(table.covers(date(2025, 8, 23)));
    assert!(table.covers(date(2025, 10, 20)));
    assert!(!table.covers(date(2025, 10, 21)));
}

// ── Progress ──

#[test]
fn test_progress_between_events() {
    let prev = event(2025, 9, 7, MoonPhase::FullMoon);
    let next = event(2025, 9, 14, MoonPhase::LastQuarter);
    assert_approx!(progress_between(&prev, &next, date(2025, 9, 7)), 0.0, 1e-12);
    assert_approx!(progress_between(&prev, &next, date(2025, 9, 11)), 4.0 / 7.0, 1e-12);
    assert_approx!(progress_between(&prev, &next, date(2025, 9, 13)), 6.0 / 7.0, 1e-12);
}

// ── Phase selection ──

#[test]
fn test_interpolated_phase_holds_prev_early() {
    assert_eq!(
        interpolated_phase(MoonPhase::NewMoon, MoonPhase::FirstQuarter, 0.2),
        MoonPhase::NewMoon
    );
}

#[test]
fn test_interpolated_phase_steps_through_middle() {
    assert_eq!(
        interpolated_phase(MoonPhase::NewMoon, MoonPhase::FirstQuarter, 0.5),
        MoonPhase::WaxingCrescent
    );
    assert_eq!(
        interpolated_phase(MoonPhase::NewMoon, MoonPhase::FullMoon, 0.74),
        MoonPhase::WaxingGibbous
    );
    assert_eq!(
        interpolated_phase(MoonPhase::FullMoon, MoonPhase::LastQuarter, 0.3),
        MoonPhase::FullMoon
    );
}

#[test]
fn test_interpolated_phase_holds_next_late() {
    assert_eq!(
        interpolated_phase(MoonPhase::FullMoon, MoonPhase::LastQuarter, 0.75),
        MoonPhase::LastQuarter
    );
}

#[test]
fn test_interpolated_phase_wrap_switches_at_half() {
    assert_eq!(
        interpolated_phase(MoonPhase::LastQuarter, MoonPhase::NewMoon, 0.49),
        MoonPhase::LastQuarter
    );
    assert_eq!(
        interpolated_phase(MoonPhase::LastQuarter, MoonPhase::NewMoon, 0.5),
        MoonPhase::NewMoon
    );
    assert_eq!(
        interpolated_phase(MoonPhase::WaningCrescent, MoonPhase::NewMoon, 0.9),
        MoonPhase::NewMoon
    );
}

#[test]
fn test_interpolated_phase_same_phase() {
    for p in [0.0, 0.3, 0.5, 0.9] {
        assert_eq!(
            interpolated_phase(MoonPhase::FullMoon, MoonPhase::FullMoon, p),
            MoonPhase::FullMoon
        );
    }
}

// ── Illumination ──

#[test]
fn test_interpolated_illumination_endpoints() {
    assert_approx!(interpolated_illumination(MoonPhase::NewMoon, 0.0), 0.0, 1e-12);
    assert_approx!(interpolated_illumination(MoonPhase::FirstQuarter, 0.0), 40.0, 1e-12);
    assert_approx!(interpolated_illumination(MoonPhase::FullMoon, 0.0), 95.0, 1e-12);
    assert_approx!(interpolated_illumination(MoonPhase::FullMoon, 1.0), 100.0, 1e-12);
    assert_approx!(interpolated_illumination(MoonPhase::LastQuarter, 0.0), 60.0, 1e-12);
    assert_approx!(interpolated_illumination(MoonPhase::WaningCrescent, 1.0), 10.0, 1e-12);
}

// ── interpolate_phase ──

#[test]
fn test_full_moon_event_date() {
    let est = interpolate_phase(date(2025, 9, 7), EventTable::builtin());
    assert_eq!(est.phase, MoonPhase::FullMoon);
    assert!((95..=100).contains(&est.illumination));
}

#[test]
fn test_between_full_and_last_quarter() {
    let est = interpolate_phase(date(2025, 9, 11), EventTable::builtin());
    assert_eq!(est.phase, MoonPhase::WaningGibbous);
    assert_eq!(est.illumination, 75);
}

#[test]
fn test_event_dates_return_event_phase() {
    let table = EventTable::builtin();
    let events = table.events();
    for e in &events[..events.len() - 1] {
        let est = interpolate_phase(e.date, table);
        assert_eq!(est.phase, e.phase, "{}", e.date);
        let expected = interpolated_illumination(e.phase, 0.0).round() as u8;
        assert_eq!(est.illumination, expected, "{}", e.date);
    }
}

#[test]
fn test_waxing_crescent_transition() {
    let table = EventTable::builtin();

    let est = interpolate_phase(date(2025, 8, 26), table);
    assert_eq!(est.phase, MoonPhase::NewMoon);

    let est = interpolate_phase(date(2025, 8, 28), table);
    assert_eq!(est.phase, MoonPhase::WaxingCrescent);
    assert_eq!(est.illumination, 29);

    let est = interpolate_phase(date(2025, 8, 30), table);
    assert_eq!(est.phase, MoonPhase::FirstQuarter);
    assert_eq!(est.illumination, 58);
}

#[test]
fn test_wrap_to_new_moon_stays_in_cycle() {
    let table = EventTable::builtin();
    let mut d = date(2025, 9, 14);
    while d < date(2025, 9, 21) {
        let est = interpolate_phase(d, table);
        assert!(
            matches!(est.phase, MoonPhase::LastQuarter | MoonPhase::NewMoon),
            "{} -> {}",
            d,
            est.phase
        );
        d = d.succ_opt().unwrap();
    }
    assert_eq!(interpolate_phase(date(2025, 9, 17), table).phase, MoonPhase::LastQuarter);
    assert_eq!(interpolate_phase(date(2025, 9, 18), table).phase, MoonPhase::NewMoon);
}

#[test]
fn test_waning_crescent_anchor_wraps() {
    let table = EventTable::new(vec![
        event(2026, 1, 10, MoonPhase::WaningCrescent),
        event(2026, 1, 14, MoonPhase::NewMoon),
    ])
    .unwrap();
    assert_eq!(interpolate_phase(date(2026, 1, 11), &table).phase, MoonPhase::WaningCrescent);
    assert_eq!(interpolate_phase(date(2026, 1, 12), &table).phase, MoonPhase::NewMoon);
    assert_eq!(interpolate_phase(date(2026, 1, 12), &table).illumination, 5);
}

#[test]
fn test_outside_table_uses_approximation() {
    let table = EventTable::builtin();
    for d in [date(2024, 12, 31), date(2025, 10, 21), date(2030, 6, 1)] {
        assert_eq!(interpolate_phase(d, table), approximate_phase(d), "{}", d);
    }
}

#[test]
fn test_valid_ranges_across_years() {
    let table = EventTable::builtin();
    let mut d = date(2024, 1, 1);
    while d < date(2031, 1, 1) {
        let est = interpolate_phase(d, table);
        assert!(est.illumination <= 100, "{}: {}", d, est.illumination);
        assert!(MoonPhase::ALL.contains(&est.phase));
        d = d.succ_opt().unwrap();
    }
}
