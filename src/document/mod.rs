//! Documents - collection-scoped records persisted in a document store.
//!
//! A document is a serde type with a store-assigned id and a creation time.
//! The store offers create (assign id), read by id, full overwrite, field-level
//! update, delete, and a recency-ordered listing per collection. Writes are
//! last-write-wins; there is no optimistic concurrency.
//!
//! ## Example
//!
//! ```ignore
//! use ballapp::{Document, DocumentsExt, InMemoryDocumentStore, Timestamp};
//!
//! #[derive(Serialize, Deserialize, Clone, Document)]
//! #[document(collection = "teams")]
//! struct Team {
//!     id: Option<String>,
//!     name: String,
//!     created_at: Timestamp,
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! let id = store.documents::<Team>().create(&team)?;
//! let loaded = store.documents::<Team>().get(&id)?;
//! ```

mod in_memory;
mod repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::Timestamp;

/// Trait for types that can be stored in a [`DocumentStore`].
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type (e.g. "matches", "teams").
    const COLLECTION: &'static str;

    /// The store-assigned identifier, `None` until the document is created.
    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// Creation time, used to order collection listings.
    fn created_at(&self) -> Timestamp;
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
    /// A full overwrite was requested for a document that was never created.
    #[error("document in {collection} has no id")]
    MissingId { collection: String },
    /// Field updates must be a JSON object applied to a JSON object.
    #[error("invalid field update on {collection}:{id}: {reason}")]
    InvalidUpdate {
        collection: String,
        id: String,
        reason: String,
    },
    #[error("document serialization error: {0}")]
    Serde(String),
    #[error("document storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Serde(err.to_string())
    }
}

/// Fresh document identifier.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Sorts documents newest first by `created_at`.
pub(crate) fn sort_newest_first<D: Document>(documents: &mut [D]) {
    documents.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

pub use in_memory::InMemoryDocumentStore;
pub use repository::{DocumentRepository, DocumentsExt};
pub use store::{DocumentStore, FieldUpdate};
