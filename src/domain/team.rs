use ballapp_macros::Document;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::profile::win_rate;
use crate::Timestamp;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamStats {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_points: u32,
}

impl TeamStats {
    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.total_matches)
    }
}

/// A persistent team record with its membership and match history.
#[derive(Clone, Debug, Serialize, Deserialize, Document)]
#[document(collection = "teams")]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Blob locator of the team logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach: Option<String>,
    #[serde(default)]
    pub player_ids: Vec<String>,
    #[serde(default)]
    pub match_ids: Vec<String>,
    #[serde(default)]
    pub stats: TeamStats,
    pub created_at: Timestamp,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            logo: None,
            description: None,
            founded_date: None,
            coach: None,
            player_ids: Vec::new(),
            match_ids: Vec::new(),
            stats: TeamStats::default(),
            created_at: Utc::now(),
        }
    }
}
