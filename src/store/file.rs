//! JSON file backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{Store, StoreError};
use crate::models::{timestamp, Datastore};

/// Stores the datastore as a pretty-printed JSON file.
///
/// Saves overwrite the file in place. There is no temp-file rename and no
/// lock, so a crash mid-write can leave a truncated file; the next load then
/// falls back to the seed document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the store, making sure the file's parent directory exists.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    tracing::warn!("Could not create data directory {:?}: {}", parent, e);
                }
            }
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load(&self) -> Datastore {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No data file at {:?}, using seed data", self.path);
                return Datastore::seeded(timestamp::now());
            }
            Err(e) => {
                tracing::error!("Error reading data file {:?}: {}", self.path, e);
                return Datastore::seeded(timestamp::now());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(datastore) => datastore,
            Err(e) => {
                tracing::error!("Error parsing data file {:?}: {}", self.path, e);
                Datastore::seeded(timestamp::now())
            }
        }
    }

    async fn save(&self, datastore: &Datastore) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(datastore)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
