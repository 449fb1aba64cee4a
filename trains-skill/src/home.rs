//! Per-user home stations.
//!
//! The voice skill remembers one home station per user id. Entries live in
//! memory and, when a path is configured, in a JSON file rewritten on every
//! change.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::{debug, info};

/// Errors from the home station store.
#[derive(Debug, thiserror::Error)]
pub enum HomeStoreError {
    /// Reading or writing the store file failed
    #[error("home store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid JSON
    #[error("home store file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// User id → full station name.
#[derive(Debug, Default)]
pub struct HomeStationStore {
    homes: RwLock<HashMap<String, String>>,
    path: Option<PathBuf>,
}

impl HomeStationStore {
    /// A store that forgets everything on restart.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`, loading existing entries.
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, HomeStoreError> {
        let path = path.into();

        let homes = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        info!(path = %path.display(), users = homes.len(), "opened home store");

        Ok(Self {
            homes: RwLock::new(homes),
            path: Some(path),
        })
    }

    /// Home station of `user_id`, if one was set.
    pub async fn get(&self, user_id: &str) -> Option<String> {
        self.homes.read().await.get(user_id).cloned()
    }

    /// Set the home station of `user_id`.
    ///
    /// Callers pass a validated full station name.
    pub async fn set(&self, user_id: &str, station: &str) -> Result<(), HomeStoreError> {
        let mut homes = self.homes.write().await;

        // The map only changes once the file holds the new entry. Written
        // under the lock so concurrent sets cannot reorder on disk.
        if let Some(path) = &self.path {
            let mut updated = homes.clone();
            updated.insert(user_id.to_string(), station.to_string());
            persist(path, &updated).await?;
            *homes = updated;
        } else {
            homes.insert(user_id.to_string(), station.to_string());
        }

        debug!(user_id, station, "home station set");
        Ok(())
    }
}

async fn persist(path: &Path, homes: &HashMap<String, String>) -> Result<(), HomeStoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(homes)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn in_memory_set_and_get() {
        let store = HomeStationStore::in_memory();

        assert_eq!(store.get("user").await, None);
        store.set("user", "Chatham").await.unwrap();
        assert_eq!(store.get("user").await.as_deref(), Some("Chatham"));

        store.set("user", "Summit").await.unwrap();
        assert_eq!(store.get("user").await.as_deref(), Some("Summit"));
        assert_eq!(store.get("someone else").await, None);
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("homes.json");

        let store = HomeStationStore::open(&path).await.unwrap();
        store.set("user", "Chatham").await.unwrap();
        drop(store);

        let reopened = HomeStationStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("user").await.as_deref(), Some("Chatham"));
    }

    #[tokio::test]
    async fn failed_write_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let store = HomeStationStore::open(blocker.join("homes.json"))
            .await
            .unwrap();
        // A plain file where the store's directory should be.
        std::fs::write(&blocker, "").unwrap();

        let err = store.set("user", "Chatham").await.unwrap_err();

        assert!(matches!(err, HomeStoreError::Io(_)));
        assert_eq!(store.get("user").await, None);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_home() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::create_dir(&blocker).unwrap();
        let store = HomeStationStore::open(blocker.join("homes.json"))
            .await
            .unwrap();
        store.set("user", "Summit").await.unwrap();
        std::fs::remove_dir_all(&blocker).unwrap();
        std::fs::write(&blocker, "").unwrap();

        assert!(store.set("user", "Chatham").await.is_err());

        assert_eq!(store.get("user").await.as_deref(), Some("Summit"));
    }

    #[tokio::test]
    async fn missing_file_is_empty_store() {
        let dir = tempdir().unwrap();

        let store = HomeStationStore::open(dir.path().join("homes.json"))
            .await
            .unwrap();

        assert_eq!(store.get("user").await, None);
    }

    #[tokio::test]
    async fn corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("homes.json");
        std::fs::write(&path, "not json").unwrap();

        let err = HomeStationStore::open(&path).await.unwrap_err();

        assert!(matches!(err, HomeStoreError::Json(_)));
    }
}
