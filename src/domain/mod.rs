//! Domain model: matches with rosters and an action log, plus persistent
//! player profiles and teams.

mod event;
mod game;
mod player;
mod profile;
mod team;

pub use event::{EventType, MatchEvent};
pub use game::{Match, MatchStatus, Score, ScoreSnapshot, Side};
pub use player::Player;
pub use profile::{PlayerProfile, PlayerStats};
pub use team::{Team, TeamStats};
