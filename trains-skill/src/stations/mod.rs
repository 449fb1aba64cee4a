//! Station directory: code ↔ name lookup for the NJ Transit network.
//!
//! The station list is fetched from the train data service at startup and
//! kept on disk so that restarts do not need the API.

mod cache;
mod error;
mod names;

pub use cache::{CachedStation, StationCache, StationCacheConfig};
pub use error::StationError;
pub use names::{StationDirectory, StationNames};

use tracing::{info, warn};

use crate::njtransit::NjtSource;

/// Load the station directory, preferring a fresh disk cache.
///
/// On a cache miss the list is fetched from `source` and written back to
/// the cache. A failed cache write is logged and otherwise ignored.
pub async fn load_stations(
    source: &NjtSource,
    cache: Option<&StationCache>,
) -> Result<StationNames, StationError> {
    if let Some(stations) = cache.and_then(StationCache::load) {
        let names = StationNames::from_pairs(stations);
        if !names.is_empty() {
            info!(count = names.len(), "loaded stations from cache");
            return Ok(names);
        }
    }

    let stations = source.fetch_station_list().await?;
    let names = StationNames::from_pairs(stations);
    if names.is_empty() {
        return Err(StationError::Empty);
    }
    info!(count = names.len(), "fetched station list");

    if let Some(cache) = cache
        && let Err(e) = cache.save(&names.to_pairs())
    {
        warn!(path = %cache.path().display(), error = %e, "failed to write station cache");
    }

    Ok(names)
}
