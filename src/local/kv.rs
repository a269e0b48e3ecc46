use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use super::{KeyValueStore, LocalStoreError};

/// Key-value store kept as one JSON object on disk, values base64-encoded.
///
/// The whole file is rewritten (via a temp file and rename) on every change.
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LocalStoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| LocalStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| LocalStoreError::Corrupt(format!("{}: {}", path.display(), e)))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(LocalStoreError::Io { path, source }),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), LocalStoreError> {
        let bytes =
            serde_json::to_vec_pretty(entries).map_err(|e| LocalStoreError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|source| LocalStoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), keys = entries.len(), "local store persisted");
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LocalStoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| LocalStoreError::LockPoisoned("get"))?;
        entries
            .get(key)
            .map(|encoded| {
                STANDARD
                    .decode(encoded)
                    .map_err(|e| LocalStoreError::Corrupt(format!("{}: {}", key, e)))
            })
            .transpose()
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), LocalStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| LocalStoreError::LockPoisoned("set"))?;
        let previous = entries.insert(key.to_string(), STANDARD.encode(value));
        if let Err(err) = self.persist(&entries) {
            // Keep memory in line with disk.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, LocalStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| LocalStoreError::LockPoisoned("remove"))?;
        let Some(old) = entries.remove(key) else {
            return Ok(false);
        };
        if let Err(err) = self.persist(&entries) {
            entries.insert(key.to_string(), old);
            return Err(err);
        }
        Ok(true)
    }
}

/// Memory-only key-value store. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LocalStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LocalStoreError::LockPoisoned("get"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), LocalStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LocalStoreError::LockPoisoned("set"))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, LocalStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LocalStoreError::LockPoisoned("remove"))?;
        Ok(entries.remove(key).is_some())
    }
}
