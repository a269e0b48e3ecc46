use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

const DEFAULT_DATA_DIR: &str = "ballapp-data";

/// Where device-local state lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory for everything below.
    pub data_dir: PathBuf,
    /// Root of the blob store (avatars and logos).
    pub media_dir: PathBuf,
    /// JSON file backing the local key-value store.
    pub bindings_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl StorageConfig {
    /// Layout rooted at `data_dir`: `media/` and `local.json`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            media_dir: data_dir.join("media"),
            bindings_file: data_dir.join("local.json"),
            data_dir,
        }
    }

    /// Defaults overridden by `BALLAPP_DATA_DIR`, `BALLAPP_MEDIA_DIR` and
    /// `BALLAPP_BINDINGS_FILE`. Empty variables are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = match var("BALLAPP_DATA_DIR") {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        };
        if let Some(dir) = var("BALLAPP_MEDIA_DIR") {
            config.media_dir = PathBuf::from(dir);
        }
        if let Some(file) = var("BALLAPP_BINDINGS_FILE") {
            config.bindings_file = PathBuf::from(file);
        }

        info!(
            data_dir = %config.data_dir.display(),
            media_dir = %config.media_dir.display(),
            bindings_file = %config.bindings_file.display(),
            "storage configuration loaded"
        );
        config
    }
}
