//! Station list kept on disk between restarts.
//!
//! The file is JSON: the time it was written plus every `(code, name)`
//! pair. It is stale once older than the configured TTL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::StationCode;

use super::error::StationError;

/// The station list changes rarely; refetch once a day.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One station as written to the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedStation {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    /// Seconds since the Unix epoch.
    written_at: i64,
    stations: Vec<CachedStation>,
}

/// Where the cache lives and how long it stays fresh.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl StationCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Disk cache for the station list.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// The cached list, if present, readable and fresh as of now.
    pub fn load(&self) -> Option<Vec<(StationCode, String)>> {
        self.load_at(Utc::now())
    }

    fn load_at(&self, now: DateTime<Utc>) -> Option<Vec<(StationCode, String)>> {
        let path = &self.config.path;
        let contents = std::fs::read_to_string(path).ok()?;
        let file: CacheFile = match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "unreadable station cache");
                return None;
            }
        };

        let written = DateTime::from_timestamp(file.written_at, 0)?;
        let ttl = chrono::Duration::from_std(self.config.ttl).ok()?;
        if now - written >= ttl {
            debug!(path = %path.display(), %written, "station cache is stale");
            return None;
        }

        // A code that no longer parses means the entry was edited by hand.
        let stations = file
            .stations
            .into_iter()
            .filter_map(|s| Some((StationCode::parse(&s.code).ok()?, s.name)))
            .collect();
        Some(stations)
    }

    /// Write `stations` to the cache file, creating its directory.
    pub fn save(&self, stations: &[(StationCode, String)]) -> Result<(), StationError> {
        let file = CacheFile {
            written_at: Utc::now().timestamp(),
            stations: stations
                .iter()
                .map(|(code, name)| CachedStation {
                    code: code.to_string(),
                    name: name.clone(),
                })
                .collect(),
        };

        if let Some(dir) = self.config.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.config.path, serde_json::to_vec_pretty(&file)?)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
