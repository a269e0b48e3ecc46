//! Screen state derived from a match.
//!
//! Nothing here is stored: every flag is recomputed from the match through
//! the validator, so the controls cannot drift from what the service accepts.

use crate::domain::{EventType, Match, MatchStatus};
use crate::validator::{self, Rejection};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchControls {
    pub can_start: bool,
    pub can_finish: bool,
    pub can_edit_rosters: bool,
    /// Recording is open at all: in progress with players on both sides.
    pub can_record_events: bool,
    blocked: Vec<(EventType, Rejection)>,
}

impl MatchControls {
    pub fn derive(game: &Match) -> Self {
        let blocked = EventType::ALL
            .iter()
            .filter_map(|kind| {
                validator::check_event(game, *kind)
                    .err()
                    .map(|rejection| (*kind, rejection))
            })
            .collect();

        Self {
            can_start: validator::check_transition(game, MatchStatus::InProgress).is_ok(),
            can_finish: validator::check_transition(game, MatchStatus::Finished).is_ok(),
            can_edit_rosters: validator::check_roster_edit(game).is_ok(),
            can_record_events: game.status() == MatchStatus::InProgress
                && !game.players_a().is_empty()
                && !game.players_b().is_empty(),
            blocked,
        }
    }

    /// Whether an action of `kind` would be accepted right now.
    pub fn allows(&self, kind: EventType) -> bool {
        self.can_record_events && !self.blocked.iter().any(|(k, _)| *k == kind)
    }

    /// Inline guidance for a disabled action.
    pub fn guidance(&self, kind: EventType) -> Option<String> {
        self.blocked
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, rejection)| rejection.to_string())
    }

    /// Actions that would be accepted right now, in display order.
    pub fn available_actions(&self) -> Vec<EventType> {
        EventType::ALL
            .into_iter()
            .filter(|kind| self.allows(*kind))
            .collect()
    }
}
