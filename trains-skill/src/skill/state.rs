//! Application state for the skill endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::home::HomeStationStore;
use crate::planner::{Engine, ScheduleProvider};
use crate::stations::StationNames;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(std::net::SocketAddrV4::new(std::net::Ipv4Addr::LOCALHOST, 3000));

/// Server settings.
#[derive(Debug, Clone)]
pub struct SkillConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// JSON file for home stations; in memory only when unset
    pub home_store_path: Option<PathBuf>,
    /// JSON file caching the station list
    pub station_cache_path: Option<PathBuf>,
}

impl SkillConfig {
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_home_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.home_store_path = Some(path.into());
        self
    }

    pub fn with_station_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.station_cache_path = Some(path.into());
        self
    }
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            home_store_path: None,
            station_cache_path: None,
        }
    }
}

/// Shared application state.
///
/// Holds the route engine (which owns the station directory) and the home
/// station store.
pub struct AppState<P> {
    pub engine: Arc<Engine<P, StationNames>>,
    pub homes: Arc<HomeStationStore>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            homes: Arc::clone(&self.homes),
        }
    }
}

impl<P: ScheduleProvider + Sync> AppState<P> {
    /// Create a new app state.
    pub fn new(engine: Engine<P, StationNames>, homes: HomeStationStore) -> Self {
        Self {
            engine: Arc::new(engine),
            homes: Arc::new(homes),
        }
    }

    /// Station directory the engine resolves codes against.
    pub fn stations(&self) -> &StationNames {
        self.engine.directory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SkillConfig::default();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert!(config.home_store_path.is_none());
        assert!(config.station_cache_path.is_none());
    }

    #[test]
    fn config_builder() {
        let config = SkillConfig::default()
            .with_bind_addr("0.0.0.0:8080".parse().unwrap())
            .with_home_store_path("/var/lib/skill/homes.json")
            .with_station_cache_path("/var/cache/skill/stations.json");

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.home_store_path.as_deref(),
            Some(std::path::Path::new("/var/lib/skill/homes.json"))
        );
        assert!(config.station_cache_path.is_some());
    }
}
