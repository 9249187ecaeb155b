//! Storage for the revision board.
//!
//! The whole board lives in one [`Datastore`] document. A [`Store`] loads and
//! saves that document wholesale; nothing is cached between requests, so every
//! operation pays a full read and every mutation a full write.
//!
//! There is no locking around a load→mutate→save cycle. Two overlapping
//! mutations can both start from the same snapshot, and whichever saves last
//! wins (a lost update).

mod file;
mod memory;
mod repository;

pub use file::*;
pub use memory::*;
pub use repository::*;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::models::Datastore;

/// Whole-document storage backend.
#[async_trait]
pub trait Store: Send + Sync {
    /// Load the current document. Backends recover from unreadable state by
    /// returning [`Datastore::seeded`] instead of failing.
    async fn load(&self) -> Datastore;

    /// Replace the stored document.
    async fn save(&self, datastore: &Datastore) -> Result<(), StoreError>;
}

/// Errors raised while saving the datastore.
#[derive(Debug)]
pub enum StoreError {
    /// Writing the backing file failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document could not be encoded
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "failed to write '{}': {}", path.display(), source)
            }
            StoreError::Serialize(err) => write!(f, "failed to encode datastore: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err)
    }
}
