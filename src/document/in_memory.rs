//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::warn;

use super::{
    new_document_id, sort_newest_first, Document, DocumentError, DocumentStore, FieldUpdate,
};

/// In-memory document store backed by a HashMap of JSON bytes.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    /// Store raw bytes under a collection and id, bypassing serialization.
    /// Lets callers seed documents written by other clients.
    pub fn put_raw(&self, collection: &str, id: &str, bytes: Vec<u8>) -> Result<(), DocumentError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;
        storage.insert(Self::make_key(collection, id), bytes);
        Ok(())
    }

    fn decode_collection<D: Document>(&self) -> Result<Vec<D>, DocumentError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;

        let prefix = format!("{}:", D::COLLECTION);
        let mut results = Vec::new();

        for (key, bytes) in storage.iter() {
            let Some(id) = key.strip_prefix(&prefix) else {
                continue;
            };
            match serde_json::from_slice::<D>(bytes) {
                Ok(mut document) => {
                    if document.id().is_none() {
                        document.set_id(id.to_string());
                    }
                    results.push(document);
                }
                Err(err) => warn!(key = %key, error = %err, "skipping undecodable document"),
            }
        }

        Ok(results)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn create<D: Document>(&self, document: &D) -> Result<String, DocumentError> {
        let id = document
            .id()
            .map(str::to_string)
            .unwrap_or_else(new_document_id);

        let mut stored = document.clone();
        stored.set_id(id.clone());
        let bytes = serde_json::to_vec(&stored)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;
        storage.insert(Self::make_key(D::COLLECTION, &id), bytes);

        Ok(id)
    }

    fn get<D: Document>(&self, id: &str) -> Result<Option<D>, DocumentError> {
        let key = Self::make_key(D::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;

        match storage.get(&key) {
            Some(bytes) => {
                let mut document: D = serde_json::from_slice(bytes)?;
                if document.id().is_none() {
                    document.set_id(id.to_string());
                }
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    fn set<D: Document>(&self, document: &D) -> Result<(), DocumentError> {
        let id = document.id().ok_or_else(|| DocumentError::MissingId {
            collection: D::COLLECTION.to_string(),
        })?;
        let key = Self::make_key(D::COLLECTION, id);
        let bytes = serde_json::to_vec(document)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;
        storage.insert(key, bytes);

        Ok(())
    }

    fn update_fields<D: Document>(
        &self,
        id: &str,
        fields: FieldUpdate,
    ) -> Result<(), DocumentError> {
        let key = Self::make_key(D::COLLECTION, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;

        let bytes = storage.get(&key).ok_or_else(|| DocumentError::NotFound {
            collection: D::COLLECTION.to_string(),
            id: id.to_string(),
        })?;

        let mut value: Value = serde_json::from_slice(bytes)?;
        let Some(object) = value.as_object_mut() else {
            return Err(DocumentError::InvalidUpdate {
                collection: D::COLLECTION.to_string(),
                id: id.to_string(),
                reason: "stored document is not an object".into(),
            });
        };
        object.extend(fields);

        // The merged document must still decode as D.
        serde_json::from_value::<D>(value.clone()).map_err(|err| DocumentError::InvalidUpdate {
            collection: D::COLLECTION.to_string(),
            id: id.to_string(),
            reason: err.to_string(),
        })?;

        storage.insert(key, serde_json::to_vec(&value)?);
        Ok(())
    }

    fn delete<D: Document>(&self, id: &str) -> Result<bool, DocumentError> {
        let key = Self::make_key(D::COLLECTION, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;

        Ok(storage.remove(&key).is_some())
    }

    fn list_recent<D: Document>(&self) -> Result<Vec<D>, DocumentError> {
        let mut documents = self.decode_collection::<D>()?;
        sort_newest_first(&mut documents);
        Ok(documents)
    }

    fn find<D: Document>(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<D>, DocumentError> {
        let mut documents: Vec<D> = self
            .decode_collection::<D>()?
            .into_iter()
            .filter(|document| predicate(document))
            .collect();
        sort_newest_first(&mut documents);
        Ok(documents)
    }
}
