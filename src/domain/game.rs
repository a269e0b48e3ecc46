use std::fmt::{self, Write as _};

use ballapp_macros::Document;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{EventType, MatchEvent, Player};
use crate::Timestamp;

/// Lifecycle of a match. Moves forward only: Created → InProgress → Finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStatus {
    #[default]
    Created,
    InProgress,
    Finished,
}

impl MatchStatus {
    pub fn label(self) -> &'static str {
        match self {
            MatchStatus::Created => "Not Started",
            MatchStatus::InProgress => "In Progress",
            MatchStatus::Finished => "Completed",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One side of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub team_a: u32,
    pub team_b: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub(crate) fn increment(&mut self, side: Side) {
        match side {
            Side::A => self.team_a = self.team_a.saturating_add(1),
            Side::B => self.team_b = self.team_b.saturating_add(1),
        }
    }
}

/// Running score after a score event, used to chart a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreSnapshot {
    pub timestamp: Timestamp,
    pub team_a: u32,
    pub team_b: u32,
}

/// One recorded contest between two named teams.
///
/// Rosters, score, log and status change only through the validator
/// (see [`crate::validator`]), which keeps the score equal to the number of
/// accepted score events per team and the status monotonic.
#[derive(Clone, Debug, Serialize, Deserialize, Document)]
#[document(collection = "matches")]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    pub(crate) team_a: String,
    pub(crate) team_b: String,
    #[serde(default)]
    pub(crate) players_a: Vec<Player>,
    #[serde(default)]
    pub(crate) players_b: Vec<Player>,
    #[serde(default)]
    pub(crate) score: Score,
    #[serde(default)]
    pub(crate) events: Vec<MatchEvent>,
    #[serde(default)]
    pub(crate) status: MatchStatus,
    pub(crate) created_at: Timestamp,
}

impl Match {
    /// A fresh, unsaved match: no players, 0–0, status Created.
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self {
            id: None,
            team_a: team_a.into(),
            team_b: team_b.into(),
            players_a: Vec::new(),
            players_b: Vec::new(),
            score: Score::default(),
            events: Vec::new(),
            status: MatchStatus::Created,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn team_a(&self) -> &str {
        &self.team_a
    }

    pub fn team_b(&self) -> &str {
        &self.team_b
    }

    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Which side a team name belongs to. Team A wins if both names are equal.
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if team_id == self.team_a {
            Some(Side::A)
        } else if team_id == self.team_b {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn players_a(&self) -> &[Player] {
        &self.players_a
    }

    pub fn players_b(&self) -> &[Player] {
        &self.players_b
    }

    pub fn roster(&self, side: Side) -> &[Player] {
        match side {
            Side::A => &self.players_a,
            Side::B => &self.players_b,
        }
    }

    pub(crate) fn roster_mut(&mut self, side: Side) -> &mut Vec<Player> {
        match side {
            Side::A => &mut self.players_a,
            Side::B => &mut self.players_b,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// The action log in append order.
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn events_newest_first(&self) -> Vec<&MatchEvent> {
        let mut events: Vec<&MatchEvent> = self.events.iter().collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events
    }

    /// Running score starting at 0–0 on creation, one entry per score event by time.
    pub fn score_progression(&self) -> Vec<ScoreSnapshot> {
        let mut scoring: Vec<&MatchEvent> = self
            .events
            .iter()
            .filter(|e| e.kind == EventType::ScorePoint)
            .collect();
        scoring.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let mut running = Score::default();
        let mut points = Vec::with_capacity(scoring.len() + 1);
        points.push(ScoreSnapshot {
            timestamp: self.created_at,
            team_a: 0,
            team_b: 0,
        });

        for event in scoring {
            if let Some(side) = self.side_of(&event.team_id) {
                running.increment(side);
            }
            points.push(ScoreSnapshot {
                timestamp: event.timestamp,
                team_a: running.team_a,
                team_b: running.team_b,
            });
        }

        points
    }

    /// Plain-text summary suitable for sharing.
    pub fn share_summary(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "Match Details: {} vs {}", self.team_a, self.team_b);
        let _ = writeln!(text, "Date: {}", self.created_at.format("%Y-%m-%d %H:%M"));
        let _ = writeln!(text, "Status: {}", self.status);
        let _ = writeln!(text, "Score: {} - {}", self.score.team_a, self.score.team_b);
        text.push_str("\nTeams:\n");

        for side in [Side::A, Side::B] {
            let _ = write!(text, "\n{}:\n", self.team_name(side));
            let roster = self.roster(side);
            if roster.is_empty() {
                text.push_str("No players\n");
            }
            for (index, player) in roster.iter().enumerate() {
                let _ = writeln!(text, "{}. {} ({})", index + 1, player.name, player.position);
            }
        }

        text.push_str("\nMatch Records:\n");
        if self.events.is_empty() {
            text.push_str("No records yet\n");
        }
        for event in self.events_newest_first() {
            let _ = writeln!(
                text,
                "{} - {} ({}): {}",
                event.timestamp.format("%H:%M:%S"),
                event.player_name,
                event.team_id,
                event.kind
            );
        }

        text
    }
}
