//! Station directory error types.

use crate::njtransit::ScheduleError;

/// Errors that can occur when loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Fetching the station list failed
    #[error("failed to fetch station list: {0}")]
    Fetch(#[from] ScheduleError),

    /// The station list had no usable entries
    #[error("station list is empty")]
    Empty,

    #[error("station cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("station cache encoding error: {0}")]
    CacheFormat(#[from] serde_json::Error),
}
