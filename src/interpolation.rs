use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::approximate;
use crate::error::MoonError;
use crate::types::{MoonPhase, PhaseEstimate, PhaseEvent};

#[rustfmt::skip]
const BUILTIN_EVENTS: [(i32, u32, u32, MoonPhase, u32, u32); 9] = [
    (2025, 8, 23, MoonPhase::NewMoon, 6, 6),
    (2025, 8, 31, MoonPhase::FirstQuarter, 6, 25),
    (2025, 9, 7, MoonPhase::FullMoon, 18, 9),
    (2025, 9, 14, MoonPhase::LastQuarter, 10, 33),
    (2025, 9, 21, MoonPhase::NewMoon, 19, 54),
    (2025, 9, 29, MoonPhase::FirstQuarter, 13, 54),
    (2025, 10, 7, MoonPhase::FullMoon, 3, 47),
    (2025, 10, 13, MoonPhase::LastQuarter, 18, 13),
    (2025, 10, 21, MoonPhase::NewMoon, 12, 25),
];

static BUILTIN_TABLE: LazyLock<EventTable> = LazyLock::new(|| EventTable {
    events: BUILTIN_EVENTS
        .iter()
        .filter_map(|&(year, month, day, phase, hour, minute)| {
            Some(PhaseEvent {
                date: NaiveDate::from_ymd_opt(year, month, day)?,
                phase,
                time_of_day: NaiveTime::from_hms_opt(hour, minute, 0),
            })
        })
        .collect(),
});

/// Reference phase events, sorted by strictly increasing date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTable {
    events: Vec<PhaseEvent>,
}

impl EventTable {
    pub fn new(events: Vec<PhaseEvent>) -> Result<Self, MoonError> {
        if events.is_empty() {
            return Err(MoonError::malformed("table has no events"));
        }
        if let Some(pair) = events.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(MoonError::malformed(format!(
                "events out of order: {} ({}) is not after {} ({})",
                pair[1].date, pair[1].phase, pair[0].date, pair[0].phase
            )));
        }
        Ok(Self { events })
    }

    /// Curated 2025 events from lunaf.com.
    pub fn builtin() -> &'static EventTable {
        &BUILTIN_TABLE
    }

    pub fn events(&self) -> &[PhaseEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&PhaseEvent> {
        self.events.first()
    }

    pub fn last(&self) -> Option<&PhaseEvent> {
        self.events.last()
    }

    /// Latest event on or before `date`, and earliest event after it.
    pub fn bracketing_events(&self, date: NaiveDate) -> (Option<&PhaseEvent>, Option<&PhaseEvent>) {
        let split = self.events.partition_point(|e| e.date <= date);
        let prev = split.checked_sub(1).map(|i| &self.events[i]);
        (prev, self.events.get(split))
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        matches!(self.bracketing_events(date), (Some(_), Some(_)))
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

pub fn progress_between(prev: &PhaseEvent, next: &PhaseEvent, date: NaiveDate) -> f64 {
    let elapsed = (date - prev.date).num_days() as f64;
    let span = (next.date - prev.date).num_days() as f64;
    if span <= 0.0 {
        return 0.0;
    }
    elapsed / span
}

pub fn interpolated_phase(prev: MoonPhase, next: MoonPhase, progress: f64) -> MoonPhase {
    let (prev_index, next_index) = (prev.index(), next.index());

    if next_index < prev_index {
        // straddles the wrap back to New Moon
        return if progress < 0.5 { prev } else { next };
    }

    if progress < 0.25 {
        prev
    } else if progress < 0.75 {
        let steps = ((next_index - prev_index) as f64 * (progress - 0.25) * 2.0).floor();
        MoonPhase::from_index(prev_index + steps.max(0.0) as usize)
    } else {
        next
    }
}

/// Illumination anchored to the interpolated phase, unclamped.
pub fn interpolated_illumination(phase: MoonPhase, progress: f64) -> f64 {
    match phase {
        MoonPhase::NewMoon => progress * 10.0,
        MoonPhase::WaxingCrescent => 10.0 + progress * 30.0,
        MoonPhase::FirstQuarter => 40.0 + progress * 20.0,
        MoonPhase::WaxingGibbous => 60.0 + progress * 35.0,
        MoonPhase::FullMoon => 95.0 + progress * 5.0,
        MoonPhase::WaningGibbous => 95.0 - progress * 35.0,
        MoonPhase::LastQuarter => 60.0 - progress * 20.0,
        MoonPhase::WaningCrescent => 40.0 - progress * 30.0,
    }
}

/// Falls back to [`approximate::approximate_phase`] outside the table's coverage.
pub fn interpolate_phase(date: NaiveDate, table: &EventTable) -> PhaseEstimate {
    let (prev, next) = match table.bracketing_events(date) {
        (Some(prev), Some(next)) => (prev, next),
        _ => {
            debug!(%date, "date outside event table, using approximate phase");
            return approximate::approximate_phase(date);
        }
    };

    let progress = progress_between(prev, next, date);
    let phase = interpolated_phase(prev.phase, next.phase, progress);
    PhaseEstimate::new(phase, interpolated_illumination(phase, progress))
}
