//! Services over the document store and device-local storage.
//!
//! Each service is generic over the [`DocumentStore`] and receives its
//! collaborators at construction. Successful mutations are announced on the
//! shared [`ChangeFeed`] with the id of the changed document.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ballapp::{InMemoryDocumentStore, LocalStorage, Services, Side, Player};
//!
//! let services = Services::new(InMemoryDocumentStore::new(), LocalStorage::in_memory());
//! let game = services.matches.create_match("Eagles", "Hawks")?;
//! let id = game.id().unwrap();
//! services.matches.add_player(id, Player::new("Ann", "Setter"), Side::A)?;
//! ```

mod matches;
mod profiles;
mod teams;

pub use matches::MatchService;
pub use profiles::ProfileService;
pub use teams::TeamService;

use crate::document::DocumentStore;
use crate::local::LocalStorage;
use crate::notify::ChangeFeed;

/// All services wired to one store, one local storage and one change feed.
pub struct Services<S> {
    pub matches: MatchService<S>,
    pub profiles: ProfileService<S>,
    pub teams: TeamService<S>,
    pub feed: ChangeFeed,
}

impl<S: DocumentStore + Clone> Services<S> {
    pub fn new(store: S, local: LocalStorage) -> Self {
        let feed = ChangeFeed::new();
        Self {
            matches: MatchService::new(store.clone(), feed.clone()),
            profiles: ProfileService::new(store.clone(), local.clone(), feed.clone()),
            teams: TeamService::new(store, local, feed.clone()),
            feed,
        }
    }
}
