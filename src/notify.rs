//! In-process change notifications.
//!
//! Services announce every successful mutation with the affected document id.
//! Listeners (screens) react by re-reading from the store; the payload never
//! carries state of its own.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use event_emitter_rs::EventEmitter;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    MatchCreated,
    MatchUpdated,
    MatchDeleted,
    ProfileSaved,
    ProfileDeleted,
    TeamSaved,
    TeamDeleted,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::MatchCreated => "match.created",
            Topic::MatchUpdated => "match.updated",
            Topic::MatchDeleted => "match.deleted",
            Topic::ProfileSaved => "profile.saved",
            Topic::ProfileDeleted => "profile.deleted",
            Topic::TeamSaved => "team.saved",
            Topic::TeamDeleted => "team.deleted",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fan-out of change notifications. Clones share listeners.
///
/// Listeners run on their own threads (as the emitter dispatches them), so
/// they must not assume ordering relative to the caller.
#[derive(Clone)]
pub struct ChangeFeed {
    emitter: Arc<Mutex<EventEmitter>>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    /// Register a listener receiving the changed document id. Returns a
    /// listener id for [`ChangeFeed::remove`].
    pub fn on<F>(&self, topic: Topic, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self.emitter.lock().unwrap_or_else(PoisonError::into_inner);
        emitter.on(topic.as_str(), listener)
    }

    /// Returns true if the listener was registered.
    pub fn remove(&self, listener_id: &str) -> bool {
        let mut emitter = self.emitter.lock().unwrap_or_else(PoisonError::into_inner);
        emitter.remove_listener(listener_id).is_some()
    }

    pub fn emit(&self, topic: Topic, id: &str) {
        trace!(topic = %topic, id, "change emitted");
        let mut emitter = self.emitter.lock().unwrap_or_else(PoisonError::into_inner);
        emitter.emit(topic.as_str(), id.to_string());
    }
}
