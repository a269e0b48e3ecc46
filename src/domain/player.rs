use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A roster entry: a snapshot of a player copied into one side of a match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub position: String,
}

impl Player {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            position: position.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Players compare by id when both carry one, otherwise by name and position.
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name && self.position == other.position,
        }
    }
}

impl Eq for Player {}

/// Hashes name and position only. Entries sharing an id are snapshots of the
/// same profile and carry the same name and position.
impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.position.hash(state);
    }
}
