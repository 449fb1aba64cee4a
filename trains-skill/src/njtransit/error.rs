//! NJ Transit client error types.

use crate::domain::StationCode;

/// Errors from fetching or decoding a station schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Credentials were rejected
    #[error("unauthorized: check NJT_USERNAME and NJT_APIKEY")]
    Unauthorized,

    /// Response body was not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Embedded JSON payload did not match the expected shape
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Response parsed but carried no usable data
    #[error("unexpected payload: {0}")]
    Payload(String),

    /// Reading a local schedule file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No schedule is available for the station
    #[error("no schedule for station {0}")]
    UnknownStation(StationCode),

    /// No stop list is available for the train
    #[error("no stop list for train {0}")]
    UnknownTrain(String),
}
