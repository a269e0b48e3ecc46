//! InMemoryBlobStore - HashMap-backed blob store for testing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{validate_key, BlobError, BlobStore};

const MEM_SCHEME: &str = "mem://";

/// In-memory blob store. Locators are `mem://<key>`. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key_of(locator: &str) -> Result<&str, BlobError> {
        locator
            .strip_prefix(MEM_SCHEME)
            .ok_or_else(|| BlobError::UnsupportedLocator(locator.to_string()))
    }
}

impl BlobStore for InMemoryBlobStore {
    fn write(&self, key: &str, bytes: &[u8]) -> Result<String, BlobError> {
        validate_key(key)?;
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| BlobError::Storage("lock poisoned".into()))?;
        blobs.insert(key.to_string(), bytes.to_vec());
        Ok(format!("{}{}", MEM_SCHEME, key))
    }

    fn read(&self, locator: &str) -> Result<Vec<u8>, BlobError> {
        let key = Self::key_of(locator)?;
        let blobs = self
            .blobs
            .read()
            .map_err(|_| BlobError::Storage("lock poisoned".into()))?;
        blobs
            .get(key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(locator.to_string()))
    }

    fn delete(&self, locator: &str) -> Result<bool, BlobError> {
        let key = Self::key_of(locator)?;
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| BlobError::Storage("lock poisoned".into()))?;
        Ok(blobs.remove(key).is_some())
    }
}
