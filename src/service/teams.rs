use tracing::{debug, info, warn};

use crate::blob::logo_key;
use crate::document::{DocumentStore, DocumentsExt};
use crate::domain::{Match, PlayerProfile, Team};
use crate::error::ServiceError;
use crate::local::LocalStorage;
use crate::notify::{ChangeFeed, Topic};

/// Teams, their logos and their membership.
///
/// Membership lives in two places: the team document's `player_ids` and the
/// device-local player → team bindings. Reads take the union of both, and
/// writes merge the bindings back into the document so neither side loses ids.
pub struct TeamService<S> {
    store: S,
    local: LocalStorage,
    feed: ChangeFeed,
}

impl<S: DocumentStore> TeamService<S> {
    pub fn new(store: S, local: LocalStorage, feed: ChangeFeed) -> Self {
        Self { store, local, feed }
    }

    /// All teams, newest first.
    pub fn list_teams(&self) -> Result<Vec<Team>, ServiceError> {
        let teams = self.store.documents::<Team>().list_recent()?;
        debug!(count = teams.len(), "teams listed");
        Ok(teams)
    }

    pub fn get_team(&self, id: &str) -> Result<Option<Team>, ServiceError> {
        Ok(self.store.documents::<Team>().get(id)?)
    }

    /// Store a team, creating it when it has no id. Returns the id.
    pub fn save_team(&self, team: &Team) -> Result<String, ServiceError> {
        let id = self.store.documents::<Team>().save(team)?;
        info!(team_id = %id, name = %team.name, players = team.player_ids.len(), "team saved");
        self.feed.emit(Topic::TeamSaved, &id);
        Ok(id)
    }

    /// Returns true if the team existed. Local bindings are left alone.
    pub fn delete_team(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.store.documents::<Team>().delete(id)?;
        if deleted {
            info!(team_id = id, "team deleted");
            self.feed.emit(Topic::TeamDeleted, id);
        }
        Ok(deleted)
    }

    /// Store a new logo for a team and return its locator. The team's `logo`
    /// is updated when the team exists.
    pub fn update_logo(&self, team_id: &str, image: &[u8]) -> Result<String, ServiceError> {
        let locator = self
            .local
            .blobs()
            .write(&logo_key(team_id), image)
            .inspect_err(|err| warn!(team_id, error = %err, "logo write failed"))?;
        debug!(team_id, locator = %locator, bytes = image.len(), "logo written");

        if let Some(mut team) = self.get_team(team_id)? {
            team.logo = Some(locator.clone());
            self.save_team(&team)?;
        }
        Ok(locator)
    }

    pub fn load_logo(&self, locator: &str) -> Result<Vec<u8>, ServiceError> {
        Ok(self.local.blobs().read(locator)?)
    }

    /// Bind a player to a team on the device, then fold the team's bindings
    /// into its stored `player_ids`. A missing team keeps only the binding.
    pub fn add_player_to_team(&self, team_id: &str, player_id: &str) -> Result<(), ServiceError> {
        let bindings = self.local.bindings();
        if let Some(previous) = bindings.team_of(player_id)? {
            if previous != team_id {
                debug!(player_id, from = %previous, to = team_id, "player moves team");
            }
        }
        bindings.bind(player_id, team_id)?;

        if let Some(mut team) = self.get_team(team_id)? {
            let bound = bindings.players_of(team_id)?;
            merge_ids(&mut team.player_ids, bound);
            self.save_team(&team)?;
        }
        info!(team_id, player_id, "player added to team");
        Ok(())
    }

    /// Drop a player from a team, locally and in the stored document. Ids
    /// still bound to the team locally are kept in `player_ids`.
    pub fn remove_player_from_team(
        &self,
        team_id: &str,
        player_id: &str,
    ) -> Result<(), ServiceError> {
        let bindings = self.local.bindings();
        bindings.unbind(player_id, team_id)?;

        if let Some(mut team) = self.get_team(team_id)? {
            team.player_ids.retain(|id| id != player_id);
            let remaining = bindings.players_of(team_id)?;
            merge_ids(&mut team.player_ids, remaining);
            self.save_team(&team)?;
        }
        info!(team_id, player_id, "player removed from team");
        Ok(())
    }

    /// Profiles of everyone on the team, by local binding or stored id,
    /// sorted by name. Ids without a profile are skipped.
    pub fn team_players(&self, team_id: &str) -> Result<Vec<PlayerProfile>, ServiceError> {
        let mut ids = self.local.bindings().players_of(team_id)?;
        if let Some(team) = self.get_team(team_id)? {
            merge_ids(&mut ids, team.player_ids);
        }

        let profiles = self.store.documents::<PlayerProfile>();
        let mut players = Vec::with_capacity(ids.len());
        for id in &ids {
            match profiles.get(id)? {
                Some(profile) => players.push(profile),
                None => debug!(team_id, player_id = %id, "no profile for team member"),
            }
        }
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    /// Profiles not yet on the team whose name contains `search`
    /// (case-insensitive; empty matches everyone), newest first.
    pub fn candidate_players(
        &self,
        team_id: &str,
        search: &str,
    ) -> Result<Vec<PlayerProfile>, ServiceError> {
        let members: Vec<Option<String>> = self
            .team_players(team_id)?
            .into_iter()
            .map(|profile| profile.id)
            .collect();
        let search = search.trim().to_lowercase();

        let candidates = self.store.documents::<PlayerProfile>().find(&|profile| {
            !members.contains(&profile.id)
                && (search.is_empty() || profile.name.to_lowercase().contains(&search))
        })?;
        debug!(team_id, count = candidates.len(), "candidate players listed");
        Ok(candidates)
    }

    /// Matches listed in the team's `match_ids`, in list order. Matches that
    /// are missing or unreadable are logged and skipped; a missing team has
    /// no matches.
    pub fn team_matches(&self, team_id: &str) -> Result<Vec<Match>, ServiceError> {
        let Some(team) = self.get_team(team_id)? else {
            return Ok(Vec::new());
        };

        let repo = self.store.documents::<Match>();
        let mut matches = Vec::with_capacity(team.match_ids.len());
        for match_id in &team.match_ids {
            match repo.get(match_id) {
                Ok(Some(game)) => matches.push(game),
                Ok(None) => warn!(team_id, match_id = %match_id, "team match missing, skipped"),
                Err(err) => {
                    warn!(team_id, match_id = %match_id, error = %err, "team match unreadable, skipped")
                }
            }
        }
        Ok(matches)
    }

    /// Record that a team took part in a match. Adding the same match twice
    /// is a no-op.
    pub fn add_match_to_team(&self, team_id: &str, match_id: &str) -> Result<Team, ServiceError> {
        let mut team = self
            .get_team(team_id)?
            .ok_or_else(|| ServiceError::not_found("team", team_id))?;
        if team.match_ids.iter().any(|id| id == match_id) {
            return Ok(team);
        }

        team.match_ids.push(match_id.to_string());
        self.save_team(&team)?;
        info!(team_id, match_id, "match added to team");
        Ok(team)
    }
}

/// Append the ids from `extra` not already in `ids`, keeping existing order.
fn merge_ids(ids: &mut Vec<String>, extra: impl IntoIterator<Item = String>) {
    for id in extra {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
}
