//! Best-effort live observations scraped from a third-party lunar calendar.
//!
//! The scrape is fragile by nature: any network failure, non-success status
//! or change in page markup yields `None` and the caller falls back to the
//! computed estimate.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::warn;

use crate::error::MoonError;
use crate::types::{clamp_illumination, LunafConfig, MoonPhase};

static PHASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h2[^>]*>\s*([^<]+)\s+in\s+").expect("valid regex"));
static ILLUMINATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)The illuminated surface of the moon is (\d+)%").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveObservation {
    pub phase: MoonPhase,
    pub illumination: u8,
}

/// A source of observed phase data for a single date.
#[async_trait]
pub trait LiveObservationSource: Send + Sync {
    /// Returns `None` when no usable observation is available.
    async fn fetch_observation(&self, date: NaiveDate) -> Option<LiveObservation>;

    /// Name used in logging.
    fn name(&self) -> &str {
        "LiveObservationSource"
    }
}

/// Never produces an observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLiveSource;

#[async_trait]
impl LiveObservationSource for NoLiveSource {
    async fn fetch_observation(&self, _date: NaiveDate) -> Option<LiveObservation> {
        None
    }

    fn name(&self) -> &str {
        "NoLiveSource"
    }
}

/// Scrapes the daily lunar calendar page on lunaf.com.
#[derive(Debug, Clone)]
pub struct LunafSource {
    client: reqwest::Client,
    base_url: String,
}

impl LunafSource {
    pub fn new(config: &LunafConfig) -> Result<Self, MoonError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, date: NaiveDate) -> String {
        lunar_calendar_url(&self.base_url, date)
    }
}

pub fn lunar_calendar_url(base_url: &str, date: NaiveDate) -> String {
    format!(
        "{}/lunar-calendar/{:04}/{:02}/{:02}/",
        base_url.trim_end_matches('/'),
        date.year(),
        date.month(),
        date.day()
    )
}

#[async_trait]
impl LiveObservationSource for LunafSource {
    async fn fetch_observation(&self, date: NaiveDate) -> Option<LiveObservation> {
        let url = self.url_for(date);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "live moon data request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "live moon data request returned non-success status");
            return None;
        }

        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                warn!(%url, error = %e, "failed to read live moon data body");
                return None;
            }
        };

        let observation = parse_lunaf_html(&html);
        if observation.is_none() {
            warn!(%url, "live moon data page did not contain a recognizable phase and illumination");
        }
        observation
    }

    fn name(&self) -> &str {
        "LunafSource"
    }
}

/// Both the phase heading and the illumination sentence must be present.
pub fn parse_lunaf_html(html: &str) -> Option<LiveObservation> {
    let phase_text = PHASE_PATTERN.captures(html)?.get(1)?.as_str().trim();
    let illumination_text = ILLUMINATION_PATTERN.captures(html)?.get(1)?.as_str();

    let phase = phase_text.parse::<MoonPhase>().ok()?;
    let illumination = illumination_text.parse::<f64>().ok()?;

    Some(LiveObservation {
        phase,
        illumination: clamp_illumination(illumination),
    })
}
