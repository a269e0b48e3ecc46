//! DocumentRepository - Typed accessor for one collection of a document store.

use std::marker::PhantomData;

use super::{Document, DocumentError, DocumentStore, FieldUpdate};

/// Typed repository wrapper for accessing documents of a specific type.
pub struct DocumentRepository<'a, S, D> {
    store: &'a S,
    _marker: PhantomData<D>,
}

impl<'a, S: DocumentStore, D: Document> DocumentRepository<'a, S, D> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Store a new document, returning its id.
    pub fn create(&self, document: &D) -> Result<String, DocumentError> {
        self.store.create(document)
    }

    pub fn get(&self, id: &str) -> Result<Option<D>, DocumentError> {
        self.store.get(id)
    }

    /// Overwrite when the document has an id, otherwise create it.
    /// Returns the id either way.
    pub fn save(&self, document: &D) -> Result<String, DocumentError> {
        match document.id() {
            Some(id) => {
                self.store.set(document)?;
                Ok(id.to_string())
            }
            None => self.store.create(document),
        }
    }

    pub fn set(&self, document: &D) -> Result<(), DocumentError> {
        self.store.set(document)
    }

    pub fn update_fields(&self, id: &str, fields: FieldUpdate) -> Result<(), DocumentError> {
        self.store.update_fields::<D>(id, fields)
    }

    /// Delete a document by ID. Returns true if it existed.
    pub fn delete(&self, id: &str) -> Result<bool, DocumentError> {
        self.store.delete::<D>(id)
    }

    pub fn list_recent(&self) -> Result<Vec<D>, DocumentError> {
        self.store.list_recent()
    }

    pub fn find(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<D>, DocumentError> {
        self.store.find(predicate)
    }
}

/// Extension trait for typed document access on any DocumentStore.
pub trait DocumentsExt: DocumentStore + Sized {
    /// Get a typed repository for one collection.
    fn documents<D: Document>(&self) -> DocumentRepository<'_, Self, D> {
        DocumentRepository::new(self)
    }
}

impl<S: DocumentStore> DocumentsExt for S {}
