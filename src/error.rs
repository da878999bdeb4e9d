use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoonError {
    #[error("malformed phase event table: {reason}")]
    MalformedEventTable { reason: String },
    #[error("date out of range: {date} + {offset_days} days")]
    DateOutOfRange { date: NaiveDate, offset_days: u64 },
    #[error("unknown moon phase name: {name:?}")]
    UnknownPhase { name: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl MoonError {
    pub fn kind(&self) -> &'static str {
        match self {
            MoonError::MalformedEventTable { .. } => "malformed_event_table",
            MoonError::DateOutOfRange { .. } => "date_out_of_range",
            MoonError::UnknownPhase { .. } => "unknown_phase",
            MoonError::HttpClient(_) => "http_client",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        MoonError::MalformedEventTable {
            reason: reason.into(),
        }
    }
}
