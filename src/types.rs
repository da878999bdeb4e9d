use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

use crate::assets::AssetCatalog;
use crate::error::MoonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// All phases in cyclic order, starting at New Moon.
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps past Waning Crescent back to New Moon.
    pub fn from_index(index: usize) -> MoonPhase {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoonPhase {
    type Err = MoonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.eq_ignore_ascii_case("Third Quarter") {
            return Ok(MoonPhase::LastQuarter);
        }
        MoonPhase::ALL
            .iter()
            .copied()
            .find(|phase| phase.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| MoonError::UnknownPhase {
                name: s.to_string(),
            })
    }
}

impl Serialize for MoonPhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEvent {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub time_of_day: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEstimate {
    pub phase: MoonPhase,
    pub illumination: u8,
}

impl PhaseEstimate {
    /// Rounds and clamps `illumination` into 0..=100.
    pub fn new(phase: MoonPhase, illumination: f64) -> Self {
        Self {
            phase,
            illumination: clamp_illumination(illumination),
        }
    }
}

pub(crate) fn clamp_illumination(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseObservation {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub illumination: u8,
    #[serde(rename = "phaseName")]
    pub phase_name: String,
    pub image: String,
}

impl PhaseObservation {
    pub fn from_estimate(date: NaiveDate, estimate: PhaseEstimate, assets: &AssetCatalog) -> Self {
        Self {
            date,
            phase: estimate.phase,
            illumination: estimate.illumination.min(100),
            phase_name: estimate.phase.name().to_string(),
            image: assets.image_for(estimate.phase).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastResult {
    pub today: PhaseObservation,
    pub forecast: Vec<PhaseObservation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunafConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for LunafConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lunaf.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderConfig {
    pub use_live_observation: bool,
    pub lunaf: LunafConfig,
    pub assets: AssetCatalog,
}
