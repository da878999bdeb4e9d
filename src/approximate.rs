use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::types::{MoonPhase, PhaseEstimate};

pub const LUNAR_CYCLE_DAYS: f64 = 29.53058867;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// 2025-08-23 06:06 UTC, new moon per lunaf.com
pub const REFERENCE_NEW_MOON_TIMESTAMP: i64 = 1_755_929_160;

pub fn reference_new_moon() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(REFERENCE_NEW_MOON_TIMESTAMP)
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

/// Negative before the reference epoch.
pub fn days_since_new_moon(date: NaiveDate) -> f64 {
    days_between(reference_new_moon(), start_of_day(date))
}

/// Fraction of the way through the synodic month, always in `[0, 1)`.
pub fn cycle_position(date: NaiveDate) -> f64 {
    normalize_cycle_position(days_since_new_moon(date) / LUNAR_CYCLE_DAYS)
}

pub fn normalize_cycle_position(cycles: f64) -> f64 {
    let position = cycles.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if position >= 1.0 {
        0.0
    } else {
        position
    }
}

pub fn phase_for_cycle_position(position: f64) -> MoonPhase {
    match position {
        p if p < 0.0625 => MoonPhase::NewMoon,
        p if p < 0.1875 => MoonPhase::WaxingCrescent,
        p if p < 0.3125 => MoonPhase::FirstQuarter,
        p if p < 0.4375 => MoonPhase::WaxingGibbous,
        p if p < 0.5625 => MoonPhase::FullMoon,
        p if p < 0.6875 => MoonPhase::WaningGibbous,
        p if p < 0.8125 => MoonPhase::LastQuarter,
        p if p < 0.9375 => MoonPhase::WaningCrescent,
        _ => MoonPhase::NewMoon,
    }
}

/// Piecewise-linear illumination, unclamped. Peaks near the 0.5 position.
pub fn illumination_for_cycle_position(position: f64) -> f64 {
    match position {
        p if p < 0.0625 => p * 16.0,
        p if p < 0.1875 => 15.0 + (p - 0.0625) * 280.0,
        p if p < 0.3125 => 40.0 + (p - 0.1875) * 80.0,
        p if p < 0.4375 => 65.0 + (p - 0.3125) * 280.0,
        p if p < 0.5625 => 95.0 + (p - 0.4375) * 40.0,
        p if p < 0.6875 => 95.0 - (p - 0.5625) * 280.0,
        p if p < 0.8125 => 60.0 - (p - 0.6875) * 80.0,
        p if p < 0.9375 => 35.0 - (p - 0.8125) * 280.0,
        p => 5.0 - (p - 0.9375) * 80.0,
    }
}

pub fn approximate_phase(date: NaiveDate) -> PhaseEstimate {
    let position = cycle_position(date);
    PhaseEstimate::new(
        phase_for_cycle_position(position),
        illumination_for_cycle_position(position),
    )
}
