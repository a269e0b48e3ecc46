//! Match event validator.
//!
//! The one place that decides whether a match may change: which actions may
//! be appended to the log, how the score follows from them, and which status
//! transitions and roster edits are legal. Both the service mutation path and
//! the derived UI controls call into this module.
//!
//! Sequencing rules:
//! - a hit (spike or block) is legal once any serve exists in the log;
//! - a score is legal when the log holds at most one event, or when the last
//!   event is a hit;
//! - serves and errors are always legal while the match is in progress.

use thiserror::Error;

use crate::domain::{EventType, Match, MatchEvent, MatchStatus, Player, Side};

/// Players each side needs before a match can start.
pub const MIN_ROSTER: usize = 2;

/// Why a change to a match was refused. The match is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("There must be a serve action before recording a hit")]
    HitWithoutServe,
    #[error("A score can only be recorded after a hit action")]
    ScoreWithoutHit,
    #[error("Actions can only be recorded while the match is in progress (currently {status})")]
    NotInProgress { status: MatchStatus },
    #[error("Each team needs at least 2 players to start the match ({team_a} and {team_b} now)")]
    RosterTooSmall { team_a: usize, team_b: usize },
    #[error("A match cannot go from {from} to {to}")]
    IllegalTransition { from: MatchStatus, to: MatchStatus },
    #[error("Players can only be changed before the match starts (currently {status})")]
    RosterLocked { status: MatchStatus },
    #[error("No player {player_id} on this side")]
    UnknownPlayer { player_id: String },
}

/// True once any serve exists in the log.
pub fn can_record_hit(events: &[MatchEvent]) -> bool {
    events.iter().any(|e| e.kind == EventType::Serve)
}

/// True for logs of at most one event, otherwise only right after a hit.
pub fn can_record_score(events: &[MatchEvent]) -> bool {
    if events.len() <= 1 {
        return true;
    }
    events.last().is_some_and(|e| e.kind.is_hit())
}

/// Checks whether an event of `kind` may be appended to the match now.
pub fn check_event(game: &Match, kind: EventType) -> Result<(), Rejection> {
    if game.status != MatchStatus::InProgress {
        return Err(Rejection::NotInProgress {
            status: game.status,
        });
    }

    if kind.is_hit() && !can_record_hit(&game.events) {
        return Err(Rejection::HitWithoutServe);
    }

    if kind == EventType::ScorePoint && !can_record_score(&game.events) {
        return Err(Rejection::ScoreWithoutHit);
    }

    Ok(())
}

/// Checks a status change. Only Created → InProgress (with full rosters) and
/// InProgress → Finished are legal.
pub fn check_transition(game: &Match, to: MatchStatus) -> Result<(), Rejection> {
    match (game.status, to) {
        (MatchStatus::Created, MatchStatus::InProgress) => {
            let (team_a, team_b) = (game.players_a.len(), game.players_b.len());
            if team_a < MIN_ROSTER || team_b < MIN_ROSTER {
                return Err(Rejection::RosterTooSmall { team_a, team_b });
            }
            Ok(())
        }
        (MatchStatus::InProgress, MatchStatus::Finished) => Ok(()),
        (from, to) => Err(Rejection::IllegalTransition { from, to }),
    }
}

/// Rosters are editable only before the match starts.
pub fn check_roster_edit(game: &Match) -> Result<(), Rejection> {
    if game.status != MatchStatus::Created {
        return Err(Rejection::RosterLocked {
            status: game.status,
        });
    }
    Ok(())
}

impl Match {
    /// Appends an event after validating it, assigning an id when absent.
    /// A score event increments the team whose name equals `event.team_id`;
    /// an unmatched team id is recorded without touching either counter.
    ///
    /// Returns the id of the appended event.
    pub fn append_event(&mut self, mut event: MatchEvent) -> Result<String, Rejection> {
        check_event(self, event.kind)?;

        let id = event
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();

        if event.kind == EventType::ScorePoint {
            if let Some(side) = self.side_of(&event.team_id) {
                self.score.increment(side);
            }
        }
        self.events.push(event);

        Ok(id)
    }

    pub fn transition(&mut self, to: MatchStatus) -> Result<(), Rejection> {
        check_transition(self, to)?;
        self.status = to;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), Rejection> {
        self.transition(MatchStatus::InProgress)
    }

    pub fn finish(&mut self) -> Result<(), Rejection> {
        self.transition(MatchStatus::Finished)
    }

    /// Adds a player to one roster under a freshly generated id, replacing any
    /// id it carried. Returns the stored entry.
    pub fn add_player(&mut self, mut player: Player, side: Side) -> Result<Player, Rejection> {
        check_roster_edit(self)?;
        player.id = Some(uuid::Uuid::new_v4().to_string());
        self.roster_mut(side).push(player.clone());
        Ok(player)
    }

    pub fn remove_player(&mut self, player_id: &str, side: Side) -> Result<Player, Rejection> {
        check_roster_edit(self)?;
        let roster = self.roster_mut(side);
        let index = roster
            .iter()
            .position(|p| p.id.as_deref() == Some(player_id))
            .ok_or_else(|| Rejection::UnknownPlayer {
                player_id: player_id.to_string(),
            })?;
        Ok(roster.remove(index))
    }
}
