//! DocumentStore - Abstract collection-scoped storage for documents.

use serde_json::{Map, Value};

use super::{Document, DocumentError};

/// A set of top-level fields to merge into a stored document.
pub type FieldUpdate = Map<String, Value>;

/// Abstract CRUD storage for documents.
///
/// Methods are generic over the document type, which selects the collection.
pub trait DocumentStore: Send + Sync {
    /// Store a new document. Assigns a fresh id when the document has none
    /// and returns the id it was stored under.
    fn create<D: Document>(&self, document: &D) -> Result<String, DocumentError>;

    /// Get a document by ID. Returns None if not found.
    fn get<D: Document>(&self, id: &str) -> Result<Option<D>, DocumentError>;

    /// Overwrite a document by its id (insert when absent). Last write wins.
    fn set<D: Document>(&self, document: &D) -> Result<(), DocumentError>;

    /// Merge the given top-level fields into an existing document.
    fn update_fields<D: Document>(&self, id: &str, fields: FieldUpdate)
        -> Result<(), DocumentError>;

    /// Delete a document by ID. Returns true if it existed.
    fn delete<D: Document>(&self, id: &str) -> Result<bool, DocumentError>;

    /// All documents of the collection, newest `created_at` first.
    fn list_recent<D: Document>(&self) -> Result<Vec<D>, DocumentError>;

    /// Documents of the collection matching a predicate, newest first.
    fn find<D: Document>(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<D>, DocumentError>;
}
