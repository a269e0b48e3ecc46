use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{KeyValueStore, LocalStoreError};

/// Key under which the binding map is stored.
pub const PLAYER_TEAM_BINDINGS: &str = "playerTeamBindings";

type BindingMap = BTreeMap<String, String>;

/// Player id → team id map kept on the device, alongside the team
/// documents' own `playerIds` arrays. A player is bound to at most one team.
#[derive(Clone)]
pub struct TeamBindings {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles on the map.
    write_lock: Arc<Mutex<()>>,
}

impl TeamBindings {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Bind a player to a team, replacing any previous binding.
    pub fn bind(&self, player_id: &str, team_id: &str) -> Result<(), LocalStoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LocalStoreError::LockPoisoned("bind"))?;
        let mut map = self.load()?;
        map.insert(player_id.to_string(), team_id.to_string());
        self.save(&map)?;
        debug!(player_id, team_id, "player bound to team");
        Ok(())
    }

    /// Drop the binding only if the player is bound to `team_id`.
    /// Returns true if a binding was removed.
    pub fn unbind(&self, player_id: &str, team_id: &str) -> Result<bool, LocalStoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LocalStoreError::LockPoisoned("unbind"))?;
        let mut map = self.load()?;
        if map.get(player_id).map(String::as_str) != Some(team_id) {
            return Ok(false);
        }
        map.remove(player_id);
        self.save(&map)?;
        debug!(player_id, team_id, "player unbound from team");
        Ok(true)
    }

    /// Player ids bound to a team, sorted.
    pub fn players_of(&self, team_id: &str) -> Result<Vec<String>, LocalStoreError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|(_, team)| team == team_id)
            .map(|(player, _)| player)
            .collect())
    }

    pub fn team_of(&self, player_id: &str) -> Result<Option<String>, LocalStoreError> {
        Ok(self.load()?.remove(player_id))
    }

    fn load(&self) -> Result<BindingMap, LocalStoreError> {
        match self.store.get(PLAYER_TEAM_BINDINGS)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| LocalStoreError::Corrupt(format!("{}: {}", PLAYER_TEAM_BINDINGS, e))),
            None => Ok(BindingMap::new()),
        }
    }

    fn save(&self, map: &BindingMap) -> Result<(), LocalStoreError> {
        let bytes =
            serde_json::to_vec(map).map_err(|e| LocalStoreError::Corrupt(e.to_string()))?;
        self.store.set(PLAYER_TEAM_BINDINGS, &bytes)
    }
}
