use tracing::{debug, info, warn};

use crate::blob::avatar_key;
use crate::document::{DocumentStore, DocumentsExt};
use crate::domain::{Player, PlayerProfile};
use crate::error::ServiceError;
use crate::local::LocalStorage;
use crate::notify::{ChangeFeed, Topic};

/// Player profiles and their avatars.
pub struct ProfileService<S> {
    store: S,
    local: LocalStorage,
    feed: ChangeFeed,
}

impl<S: DocumentStore> ProfileService<S> {
    pub fn new(store: S, local: LocalStorage, feed: ChangeFeed) -> Self {
        Self { store, local, feed }
    }

    /// All profiles, newest first.
    pub fn list_profiles(&self) -> Result<Vec<PlayerProfile>, ServiceError> {
        let profiles = self.store.documents::<PlayerProfile>().list_recent()?;
        debug!(count = profiles.len(), "profiles listed");
        Ok(profiles)
    }

    pub fn get_profile(&self, id: &str) -> Result<Option<PlayerProfile>, ServiceError> {
        Ok(self.store.documents::<PlayerProfile>().get(id)?)
    }

    /// Store a profile, creating it when it has no id. Returns the id.
    pub fn save_profile(&self, profile: &PlayerProfile) -> Result<String, ServiceError> {
        let id = self.store.documents::<PlayerProfile>().save(profile)?;
        info!(profile_id = %id, name = %profile.name, "profile saved");
        self.feed.emit(Topic::ProfileSaved, &id);
        Ok(id)
    }

    /// Returns true if the profile existed.
    pub fn delete_profile(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.store.documents::<PlayerProfile>().delete(id)?;
        if deleted {
            info!(profile_id = id, "profile deleted");
            self.feed.emit(Topic::ProfileDeleted, id);
        }
        Ok(deleted)
    }

    /// Store a new avatar image for a player and return its locator.
    ///
    /// The profile's `avatar_url` is pointed at the new image when the
    /// profile exists; the image is kept either way.
    pub fn update_avatar(&self, player_id: &str, image: &[u8]) -> Result<String, ServiceError> {
        let locator = self
            .local
            .blobs()
            .write(&avatar_key(player_id), image)
            .inspect_err(|err| warn!(player_id, error = %err, "avatar write failed"))?;
        debug!(player_id, locator = %locator, bytes = image.len(), "avatar written");

        if let Some(mut profile) = self.get_profile(player_id)? {
            profile.avatar_url = Some(locator.clone());
            self.save_profile(&profile)?;
        }
        Ok(locator)
    }

    pub fn load_avatar(&self, locator: &str) -> Result<Vec<u8>, ServiceError> {
        Ok(self.local.blobs().read(locator)?)
    }

    /// A new, unsaved profile seeded from a roster entry (same id, name and
    /// position).
    pub fn profile_from_player(&self, player: &Player) -> PlayerProfile {
        PlayerProfile::from_player(player)
    }
}
