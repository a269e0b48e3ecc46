use thiserror::Error;

use crate::blob::BlobError;
use crate::document::DocumentError;
use crate::local::LocalStoreError;
use crate::validator::Rejection;

/// Error type for service operations.
///
/// Rejections are inline guidance and never reach the store; the other
/// variants are failures to show the user. None of them is retried.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing match, profile or team.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    /// The validator refused the change.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// The document store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] DocumentError),
    /// Saving or loading media on the device failed.
    #[error("media storage failure: {0}")]
    Media(#[from] BlobError),
    /// The device key-value store failed.
    #[error("local store failure: {0}")]
    Local(#[from] LocalStoreError),
}

impl ServiceError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// True for validation rejections, shown inline rather than as an alert.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ServiceError::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ServiceError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}
