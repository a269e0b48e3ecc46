//! Blob storage for media (player avatars, team logos).
//!
//! Callers choose the key; the store hands back a locator string that reads
//! the bytes back and is what documents keep (`avatarURL`, `logo`).

mod fs;
mod in_memory;

use std::io;

use chrono::Utc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("invalid blob key: {0}")]
    InvalidKey(String),
    #[error("unsupported blob locator: {0}")]
    UnsupportedLocator(String),
    #[error("blob not found: {0}")]
    NotFound(String),
    #[error("failed to write blob {key}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read blob {locator}")]
    Read {
        locator: String,
        #[source]
        source: io::Error,
    },
    #[error("blob storage error: {0}")]
    Storage(String),
}

/// Abstract byte storage addressed by caller-chosen keys.
pub trait BlobStore: Send + Sync {
    /// Write bytes under `key`, replacing any previous blob, and return its locator.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<String, BlobError>;

    /// Read the bytes behind a locator returned by `write`.
    fn read(&self, locator: &str) -> Result<Vec<u8>, BlobError>;

    /// Delete the blob behind a locator. Returns true if it existed.
    fn delete(&self, locator: &str) -> Result<bool, BlobError>;
}

/// Key for a player's avatar image, unique per upload.
pub fn avatar_key(player_id: &str) -> String {
    format!(
        "avatars/player_{}_{}.jpg",
        key_segment(player_id),
        Utc::now().timestamp_millis()
    )
}

/// Key for a team's logo image, unique per upload.
pub fn logo_key(team_id: &str) -> String {
    format!(
        "logos/team_{}_{}.jpg",
        key_segment(team_id),
        Utc::now().timestamp_millis()
    )
}

fn key_segment(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Keys are relative, `/`-separated, and never step outside the store.
pub(crate) fn validate_key(key: &str) -> Result<(), BlobError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(BlobError::InvalidKey(key.to_string()));
    }
    Ok(())
}

pub use fs::FsBlobStore;
pub use in_memory::InMemoryBlobStore;
