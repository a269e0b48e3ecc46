//! Device-local storage: a small key-value store, the player → team binding
//! map kept in it, and the media blob store.
//!
//! [`LocalStorage`] bundles them. It is opened once at startup from a
//! [`StorageConfig`] and handed to the services that need it.

mod bindings;
mod kv;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::blob::{BlobError, BlobStore, FsBlobStore, InMemoryBlobStore};
use crate::config::StorageConfig;

pub use bindings::{TeamBindings, PLAYER_TEAM_BINDINGS};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore};

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("local store I/O failed on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("local store data is corrupt: {0}")]
    Corrupt(String),
    #[error("local store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error(transparent)]
    Blob(#[from] BlobError),
}

/// Byte values under string keys, persisted on the device.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LocalStoreError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), LocalStoreError>;

    /// Returns true if the key existed.
    fn remove(&self, key: &str) -> Result<bool, LocalStoreError>;
}

/// The device-local storage service. Cloning shares the underlying stores.
#[derive(Clone)]
pub struct LocalStorage {
    blobs: Arc<dyn BlobStore>,
    bindings: TeamBindings,
}

impl LocalStorage {
    pub fn new(blobs: Arc<dyn BlobStore>, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            blobs,
            bindings: TeamBindings::new(kv),
        }
    }

    /// Open file-backed storage, creating directories as needed.
    pub fn open(config: &StorageConfig) -> Result<Self, LocalStoreError> {
        let blobs = FsBlobStore::open(&config.media_dir)?;
        let kv = FileKeyValueStore::open(&config.bindings_file)?;
        info!(
            media_dir = %blobs.root().display(),
            bindings_file = %config.bindings_file.display(),
            "local storage opened"
        );
        Ok(Self::new(Arc::new(blobs), Arc::new(kv)))
    }

    /// Memory-only storage for tests and previews.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryBlobStore::new()),
            Arc::new(InMemoryKeyValueStore::new()),
        )
    }

    pub fn blobs(&self) -> &dyn BlobStore {
        self.blobs.as_ref()
    }

    pub fn bindings(&self) -> &TeamBindings {
        &self.bindings
    }
}
