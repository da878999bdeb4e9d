use chrono::{Days, NaiveDate, Utc};
use tracing::debug;

use crate::assets::AssetCatalog;
use crate::error::MoonError;
use crate::interpolation::{interpolate_phase, EventTable};
use crate::live::{LiveObservationSource, LunafSource};
use crate::types::{ForecastResult, PhaseEstimate, PhaseObservation, ProviderConfig};

pub const FORECAST_DAYS: u64 = 7;

/// Assembles today's observation and the forecast that follows it.
pub struct PhaseDataProvider<S> {
    source: S,
    table: EventTable,
    assets: AssetCatalog,
    use_live_observation: bool,
}

impl<S: LiveObservationSource> PhaseDataProvider<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: EventTable::default(),
            assets: AssetCatalog::default(),
            use_live_observation: false,
        }
    }

    pub fn with_event_table(mut self, table: EventTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_assets(mut self, assets: AssetCatalog) -> Self {
        self.assets = assets;
        self
    }

    /// Default for [`get_phase_data_today`](Self::get_phase_data_today).
    pub fn with_live_observation(mut self, enabled: bool) -> Self {
        self.use_live_observation = enabled;
        self
    }

    pub fn event_table(&self) -> &EventTable {
        &self.table
    }

    pub fn estimate(&self, date: NaiveDate) -> PhaseEstimate {
        interpolate_phase(date, &self.table)
    }

    pub fn forecast_dates(&self, reference_date: NaiveDate) -> Result<Vec<NaiveDate>, MoonError> {
        (1..=FORECAST_DAYS)
            .map(|offset| {
                reference_date
                    .checked_add_days(Days::new(offset))
                    .ok_or(MoonError::DateOutOfRange {
                        date: reference_date,
                        offset_days: offset,
                    })
            })
            .collect()
    }

    /// At most one live fetch per call; the forecast is always computed.
    pub async fn get_phase_data(
        &self,
        reference_date: NaiveDate,
        use_live_observation: bool,
    ) -> Result<ForecastResult, MoonError> {
        let forecast_dates = self.forecast_dates(reference_date)?;

        let live = if use_live_observation {
            self.source.fetch_observation(reference_date).await
        } else {
            None
        };

        let today_estimate = match live {
            Some(observation) => {
                debug!(
                    source = self.source.name(),
                    date = %reference_date,
                    phase = %observation.phase,
                    illumination = observation.illumination,
                    "using live observation for today"
                );
                PhaseEstimate::new(observation.phase, f64::from(observation.illumination))
            }
            None => {
                if use_live_observation {
                    debug!(
                        source = self.source.name(),
                        date = %reference_date,
                        "no live observation, computing today's phase"
                    );
                }
                self.estimate(reference_date)
            }
        };

        let today = PhaseObservation::from_estimate(reference_date, today_estimate, &self.assets);
        let forecast = forecast_dates
            .into_iter()
            .map(|date| PhaseObservation::from_estimate(date, self.estimate(date), &self.assets))
            .collect();

        Ok(ForecastResult { today, forecast })
    }

    pub async fn get_phase_data_today(&self) -> Result<ForecastResult, MoonError> {
        self.get_phase_data(Utc::now().date_naive(), self.use_live_observation)
            .await
    }
}

impl PhaseDataProvider<LunafSource> {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, MoonError> {
        Ok(Self::new(LunafSource::new(&config.lunaf)?)
            .with_assets(config.assets.clone())
            .with_live_observation(config.use_live_observation))
    }
}

/// One-shot request against lunaf.com with the built-in event table.
pub async fn get_phase_data(
    reference_date: NaiveDate,
    use_live_observation: bool,
    config: &ProviderConfig,
) -> Result<ForecastResult, MoonError> {
    PhaseDataProvider::from_config(config)?
        .get_phase_data(reference_date, use_live_observation)
        .await
}
