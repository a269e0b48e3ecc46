//! FsBlobStore - blobs as files under a device directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use super::{validate_key, BlobError, BlobStore};

const FILE_SCHEME: &str = "file://";

/// Blob store writing one file per key under a root directory.
///
/// Locators are `file://` URLs with absolute paths. Remote locators are not
/// fetched and read back as [`BlobError::UnsupportedLocator`].
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, BlobError> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|source| BlobError::Write {
            key: root.display().to_string(),
            source,
        })?;
        let root = fs::canonicalize(root).map_err(|source| BlobError::Write {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path behind a `file://` locator, only if it names a file under root.
    fn path_of(&self, locator: &str) -> Result<PathBuf, BlobError> {
        let unsupported = || BlobError::UnsupportedLocator(locator.to_string());
        let path = Path::new(locator.strip_prefix(FILE_SCHEME).ok_or_else(unsupported)?);

        let inside = path.strip_prefix(&self.root).is_ok_and(|relative| {
            let mut parts = relative.components().peekable();
            parts.peek().is_some() && parts.all(|part| matches!(part, Component::Normal(_)))
        });
        if !inside {
            warn!(locator, root = %self.root.display(), "locator outside blob root refused");
            return Err(unsupported());
        }
        Ok(path.to_path_buf())
    }
}

impl BlobStore for FsBlobStore {
    fn write(&self, key: &str, bytes: &[u8]) -> Result<String, BlobError> {
        validate_key(key)?;
        let path = self.root.join(key);

        let written = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&path, bytes));
        if let Err(source) = written {
            warn!(key, error = %source, "blob write failed");
            return Err(BlobError::Write {
                key: key.to_string(),
                source,
            });
        }

        debug!(key, len = bytes.len(), "blob written");
        Ok(format!("{}{}", FILE_SCHEME, path.display()))
    }

    fn read(&self, locator: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.path_of(locator)?;
        fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => BlobError::NotFound(locator.to_string()),
            _ => BlobError::Read {
                locator: locator.to_string(),
                source,
            },
        })
    }

    fn delete(&self, locator: &str) -> Result<bool, BlobError> {
        let path = self.path_of(locator)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(BlobError::Storage(format!(
                "failed to delete {}: {}",
                locator, source
            ))),
        }
    }
}
