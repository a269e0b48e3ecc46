use ballapp_macros::Document;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Player;
use crate::Timestamp;

/// Cumulative per-player counters. Stored as entered; not derived from match logs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub serve_count: u32,
    #[serde(alias = "forehandCount")]
    pub spike_count: u32,
    #[serde(alias = "backhandCount")]
    pub block_count: u32,
    pub score_count: u32,
    pub error_count: u32,
}

impl PlayerStats {
    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.total_matches)
    }
}

pub(crate) fn win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(wins) / f64::from(total)
}

/// A persistent player record, independent of any single match.
#[derive(Clone, Debug, Serialize, Deserialize, Document)]
#[document(collection = "playerProfiles")]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(rename = "avatarURL", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub stats: PlayerStats,
    pub created_at: Timestamp,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            position: position.into(),
            age: None,
            nationality: None,
            avatar_url: None,
            bio: None,
            stats: PlayerStats::default(),
            created_at: Utc::now(),
        }
    }

    /// Profile seeded from a roster entry, keeping its id.
    pub fn from_player(player: &Player) -> Self {
        let mut profile = Self::new(player.name.clone(), player.position.clone());
        profile.id = player.id.clone();
        profile
    }

    /// Roster entry snapshotting this profile.
    pub fn to_player(&self) -> Player {
        Player {
            id: self.id.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
        }
    }
}
