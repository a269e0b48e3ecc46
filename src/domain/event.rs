use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Kind of match action.
///
/// `Spike` and `Block` form the hit class. Logs written with the earlier
/// forehand/backhand taxonomy decode onto them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Serve,
    #[serde(alias = "forehand")]
    Spike,
    #[serde(alias = "backhand")]
    Block,
    ScorePoint,
    Error,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Serve,
        EventType::Spike,
        EventType::Block,
        EventType::ScorePoint,
        EventType::Error,
    ];

    pub fn is_hit(self) -> bool {
        matches!(self, EventType::Spike | EventType::Block)
    }

    pub fn label(self) -> &'static str {
        match self {
            EventType::Serve => "Serve",
            EventType::Spike => "Spike",
            EventType::Block => "Block",
            EventType::ScorePoint => "Score",
            EventType::Error => "Error",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One timestamped action recorded against a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub player_id: String,
    pub player_name: String,
    /// Name of the team the action is attributed to.
    pub team_id: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub description: String,
}

impl MatchEvent {
    /// New event stamped with the current time.
    pub fn new(
        kind: EventType,
        player_id: impl Into<String>,
        player_name: impl Into<String>,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            kind,
            player_id: player_id.into(),
            player_name: player_name.into(),
            team_id: team_id.into(),
            timestamp: Utc::now(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Events compare by id when both carry one, otherwise by kind, player, team and time.
impl PartialEq for MatchEvent {
    fn eq(&self, other: &Self) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.kind == other.kind
                    && self.player_id == other.player_id
                    && self.team_id == other.team_id
                    && self.timestamp == other.timestamp
            }
        }
    }
}

impl Eq for MatchEvent {}

/// Hashes the fields both equality branches share for one recorded action.
impl Hash for MatchEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.player_id.hash(state);
        self.team_id.hash(state);
    }
}
