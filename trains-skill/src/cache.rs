//! Caching layer for station schedules.
//!
//! Each request fetches two station schedules, and back-to-back requests
//! (a rider asking twice, or several riders sharing a home station) hit the
//! same stations. Schedules are cached per station code for a short TTL so
//! those requests share one upstream call while staying near real time.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{StationCode, Train};
use crate::njtransit::ScheduleError;
use crate::planner::ScheduleProvider;

/// Cached schedule entry.
type ScheduleEntry = Arc<Vec<Train>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 500,
        }
    }
}

/// Schedule provider with caching.
///
/// Wraps any [`ScheduleProvider`] and caches successful responses keyed by
/// station code. Failures are passed through and never cached.
pub struct CachedScheduleProvider<P> {
    inner: P,
    schedules: MokaCache<StationCode, ScheduleEntry>,
}

impl<P: ScheduleProvider + Sync> CachedScheduleProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let schedules = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, schedules }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.schedules.invalidate_all();
    }
}

impl<P: ScheduleProvider + Sync> ScheduleProvider for CachedScheduleProvider<P> {
    async fn fetch_departures(&self, station: &StationCode) -> Result<Vec<Train>, ScheduleError> {
        if let Some(cached) = self.schedules.get(station).await {
            trace!(%station, "schedule cache hit");
            return Ok(cached.as_ref().clone());
        }

        let trains = self.inner.fetch_departures(station).await?;
        self.schedules
            .insert(*station, Arc::new(trains.clone()))
            .await;

        Ok(trains)
    }
}
