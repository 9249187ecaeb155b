//! In-process backend.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Store, StoreError};
use crate::models::{timestamp, Datastore};

/// Keeps the document in memory. Each load hands out an independent copy, so
/// the read-modify-write behaviour matches the file backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<Datastore>>,
}

impl MemoryStore {
    /// An empty store that loads the seed document until first saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `datastore`.
    #[cfg(test)]
    pub fn with_datastore(datastore: Datastore) -> Self {
        Self {
            document: Mutex::new(Some(datastore)),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> Datastore {
        let document = self.document.lock().unwrap_or_else(|e| e.into_inner());
        document
            .clone()
            .unwrap_or_else(|| Datastore::seeded(timestamp::now()))
    }

    async fn save(&self, datastore: &Datastore) -> Result<(), StoreError> {
        let mut document = self.document.lock().unwrap_or_else(|e| e.into_inner());
        *document = Some(datastore.clone());
        Ok(())
    }
}
