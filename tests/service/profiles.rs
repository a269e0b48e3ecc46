//! Profiles and avatars through `ProfileService`.

use ballapp::{BlobError, Player, PlayerProfile, ServiceError};

use crate::support::services;

#[test]
fn save_creates_then_overwrites() {
    let services = services();
    let mut profile = PlayerProfile::new("Ann", "Setter");
    profile.age = Some(24);

    let id = services.profiles.save_profile(&profile).unwrap();
    let mut stored = services.profiles.get_profile(&id).unwrap().unwrap();
    assert_eq!(stored.id.as_deref(), Some(id.as_str()));
    assert_eq!(stored.age, Some(24));

    stored.bio = Some("Captain".into());
    assert_eq!(services.profiles.save_profile(&stored).unwrap(), id);
    assert_eq!(services.profiles.list_profiles().unwrap().len(), 1);
    assert_eq!(
        services
            .profiles
            .get_profile(&id)
            .unwrap()
            .unwrap()
            .bio
            .as_deref(),
        Some("Captain")
    );
}

#[test]
fn delete_profile() {
    let services = services();
    let id = services
        .profiles
        .save_profile(&PlayerProfile::new("Ann", "Setter"))
        .unwrap();

    assert!(services.profiles.delete_profile(&id).unwrap());
    assert!(services.profiles.get_profile(&id).unwrap().is_none());
    assert!(!services.profiles.delete_profile(&id).unwrap());
}

#[test]
fn avatar_upload_updates_existing_profile() {
    let services = services();
    let id = services
        .profiles
        .save_profile(&PlayerProfile::new("Ann", "Setter"))
        .unwrap();

    let image = vec![0xFF, 0xD8, 0xFF, 0xE0];
    let locator = services.profiles.update_avatar(&id, &image).unwrap();

    let profile = services.profiles.get_profile(&id).unwrap().unwrap();
    assert_eq!(profile.avatar_url.as_deref(), Some(locator.as_str()));
    assert_eq!(services.profiles.load_avatar(&locator).unwrap(), image);
}

#[test]
fn avatar_upload_without_profile_keeps_image() {
    let services = services();
    let locator = services.profiles.update_avatar("p-unknown", b"jpeg").unwrap();

    assert!(services.profiles.get_profile("p-unknown").unwrap().is_none());
    assert_eq!(services.profiles.load_avatar(&locator).unwrap(), b"jpeg");
}

#[test]
fn unreadable_avatar_is_a_local_failure() {
    let services = services();
    let err = services.profiles.load_avatar("mem://avatars/none.jpg").unwrap_err();
    assert!(matches!(err, ServiceError::Media(BlobError::NotFound(_))));
    assert!(!err.is_rejection());
}

#[test]
fn profile_from_player_keeps_identity() {
    let services = services();
    let player = Player::new("Cal", "Libero").with_id("p-7");
    let profile = services.profiles.profile_from_player(&player);

    assert_eq!(profile.id.as_deref(), Some("p-7"));
    assert_eq!(profile.name, "Cal");
    assert_eq!(profile.position, "Libero");
    assert_eq!(profile.stats.total_matches, 0);
    assert_eq!(profile.to_player(), player);
}
