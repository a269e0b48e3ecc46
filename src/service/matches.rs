use tracing::{debug, info};

use crate::controls::MatchControls;
use crate::document::{DocumentError, DocumentStore, DocumentsExt, FieldUpdate};
use crate::domain::{Match, MatchEvent, MatchStatus, Player, Side};
use crate::error::ServiceError;
use crate::notify::{ChangeFeed, Topic};

/// Matches: creation, rosters, the validated action log and status.
///
/// Every mutation loads the current match, applies the change through the
/// validator and writes the whole document back. A rejected change returns
/// before anything is written.
pub struct MatchService<S> {
    store: S,
    feed: ChangeFeed,
}

impl<S: DocumentStore> MatchService<S> {
    pub fn new(store: S, feed: ChangeFeed) -> Self {
        Self { store, feed }
    }

    /// An unsaved match between two teams: no players, 0–0, status Created.
    pub fn new_match(&self, team_a: impl Into<String>, team_b: impl Into<String>) -> Match {
        Match::new(team_a, team_b)
    }

    /// Create and store a new match, returning it with its assigned id.
    pub fn create_match(
        &self,
        team_a: impl Into<String>,
        team_b: impl Into<String>,
    ) -> Result<Match, ServiceError> {
        let mut game = self.new_match(team_a, team_b);
        let id = self.store.documents::<Match>().create(&game)?;
        game.id = Some(id.clone());
        info!(match_id = %id, team_a = game.team_a(), team_b = game.team_b(), "match created");
        self.feed.emit(Topic::MatchCreated, &id);
        Ok(game)
    }

    /// Store a match, creating it when it has no id. Returns the id.
    pub fn save_match(&self, game: &Match) -> Result<String, ServiceError> {
        let created = game.id().is_none();
        let id = self.store.documents::<Match>().save(game)?;
        if created {
            info!(match_id = %id, "match created");
            self.feed.emit(Topic::MatchCreated, &id);
        } else {
            info!(match_id = %id, "match saved");
            self.feed.emit(Topic::MatchUpdated, &id);
        }
        Ok(id)
    }

    pub fn get_match(&self, id: &str) -> Result<Match, ServiceError> {
        let game = self
            .store
            .documents::<Match>()
            .get(id)?
            .ok_or_else(|| ServiceError::not_found("match", id))?;
        debug!(
            match_id = id,
            players_a = game.players_a().len(),
            players_b = game.players_b().len(),
            events = game.events().len(),
            "match loaded"
        );
        Ok(game)
    }

    /// All matches, newest first.
    pub fn list_matches(&self) -> Result<Vec<Match>, ServiceError> {
        let matches = self.store.documents::<Match>().list_recent()?;
        debug!(count = matches.len(), "matches listed");
        Ok(matches)
    }

    /// Move a match to `status` if the transition is legal. Only the status
    /// field is written.
    pub fn update_status(&self, id: &str, status: MatchStatus) -> Result<Match, ServiceError> {
        let mut game = self.get_match(id)?;
        let from = game.status();
        game.transition(status)?;

        let mut fields = FieldUpdate::new();
        fields.insert(
            "status".to_string(),
            serde_json::to_value(status).map_err(DocumentError::from)?,
        );
        self.store.documents::<Match>().update_fields(id, fields)?;

        info!(match_id = id, from = %from, to = %status, "match status changed");
        self.feed.emit(Topic::MatchUpdated, id);
        Ok(game)
    }

    pub fn start_match(&self, id: &str) -> Result<Match, ServiceError> {
        self.update_status(id, MatchStatus::InProgress)
    }

    pub fn finish_match(&self, id: &str) -> Result<Match, ServiceError> {
        self.update_status(id, MatchStatus::Finished)
    }

    /// Returns true if the match existed.
    pub fn delete_match(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.store.documents::<Match>().delete(id)?;
        if deleted {
            info!(match_id = id, "match deleted");
            self.feed.emit(Topic::MatchDeleted, id);
        }
        Ok(deleted)
    }

    /// Add a player to one side's roster. The player always gets a fresh id,
    /// whatever id it carried; the stored entry is returned.
    pub fn add_player(&self, match_id: &str, player: Player, side: Side) -> Result<Player, ServiceError> {
        let mut game = self.get_match(match_id)?;
        let player = game.add_player(player, side)?;
        self.store.documents::<Match>().set(&game)?;

        info!(
            match_id,
            player_id = player.id.as_deref().unwrap_or_default(),
            name = %player.name,
            side = ?side,
            "player added"
        );
        self.feed.emit(Topic::MatchUpdated, match_id);
        Ok(player)
    }

    pub fn remove_player(
        &self,
        match_id: &str,
        player_id: &str,
        side: Side,
    ) -> Result<Player, ServiceError> {
        let mut game = self.get_match(match_id)?;
        let player = game.remove_player(player_id, side)?;
        self.store.documents::<Match>().set(&game)?;

        info!(match_id, player_id, side = ?side, "player removed");
        self.feed.emit(Topic::MatchUpdated, match_id);
        Ok(player)
    }

    /// Validate and append an event, then persist the match. Returns the
    /// updated match; the event id is on its last event.
    pub fn record_event(&self, match_id: &str, event: MatchEvent) -> Result<Match, ServiceError> {
        let mut game = self.get_match(match_id)?;
        let kind = event.kind;
        let event_id = game.append_event(event)?;
        self.store.documents::<Match>().set(&game)?;

        let score = game.score();
        info!(
            match_id,
            event_id = %event_id,
            kind = %kind,
            team_a = score.team_a,
            team_b = score.team_b,
            "event recorded"
        );
        self.feed.emit(Topic::MatchUpdated, match_id);
        Ok(game)
    }

    /// Controls for the match as currently stored.
    pub fn controls(&self, match_id: &str) -> Result<MatchControls, ServiceError> {
        Ok(MatchControls::derive(&self.get_match(match_id)?))
    }
}
