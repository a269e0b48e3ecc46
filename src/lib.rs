// Lets `#[derive(Document)]` refer to `::ballapp` from inside this crate.
extern crate self as ballapp;

pub mod blob;
mod config;
pub mod controls;
pub mod document;
pub mod domain;
mod error;
pub mod local;
mod notify;
pub mod service;
pub mod validator;

pub use blob::{BlobError, BlobStore, FsBlobStore, InMemoryBlobStore};
pub use config::StorageConfig;
pub use controls::MatchControls;
pub use document::{
    Document, DocumentError, DocumentRepository, DocumentStore, DocumentsExt, FieldUpdate,
    InMemoryDocumentStore,
};
pub use domain::{
    EventType, Match, MatchEvent, MatchStatus, Player, PlayerProfile, PlayerStats, Score,
    ScoreSnapshot, Side, Team, TeamStats,
};
pub use error::ServiceError;
pub use local::{KeyValueStore, LocalStorage, LocalStoreError, TeamBindings};
pub use notify::{ChangeFeed, Topic};
pub use service::{MatchService, ProfileService, Services, TeamService};
pub use validator::Rejection;

// Derive macro for `Document`; lives in the macro namespace next to the trait.
pub use ballapp_macros::Document;

/// Point in time used for creation and event timestamps.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
