pub mod approximate;
pub mod assets;
pub mod error;
pub mod interpolation;
pub mod live;
pub mod provider;
pub mod types;

pub use approximate::{
    approximate_phase, cycle_position, days_since_new_moon, illumination_for_cycle_position,
    normalize_cycle_position, phase_for_cycle_position, reference_new_moon, start_of_day,
    LUNAR_CYCLE_DAYS, REFERENCE_NEW_MOON_TIMESTAMP,
};

pub use assets::AssetCatalog;

pub use error::MoonError;

pub use interpolation::{
    interpolate_phase, interpolated_illumination, interpolated_phase, progress_between, EventTable,
};

pub use live::{
    lunar_calendar_url, parse_lunaf_html, LiveObservation, LiveObservationSource, LunafSource,
    NoLiveSource,
};

pub use provider::{get_phase_data, PhaseDataProvider, FORECAST_DAYS};

pub use types::{
    ForecastResult, LunafConfig, MoonPhase, PhaseEstimate, PhaseEvent, PhaseObservation,
    ProviderConfig,
};
