//! Match lifecycle and action log through `MatchService`.

use ballapp::{EventType, MatchEvent, MatchStatus, Player, Rejection, ServiceError, Side};
use chrono::{Duration, Utc};

use crate::support::{event, ready_match, services, started_match, TEAM_A, TEAM_B};

// ============================================================================
// Creation and listing
// ============================================================================

#[test]
fn create_match_starts_empty() {
    let services = services();
    let game = services.matches.create_match(TEAM_A, TEAM_B).unwrap();
    let id = game.id().unwrap();

    let stored = services.matches.get_match(id).unwrap();
    assert_eq!(stored.team_a(), TEAM_A);
    assert_eq!(stored.team_b(), TEAM_B);
    assert_eq!(stored.status(), MatchStatus::Created);
    assert_eq!(stored.score().team_a, 0);
    assert_eq!(stored.score().team_b, 0);
    assert!(stored.players_a().is_empty());
    assert!(stored.events().is_empty());
}

#[test]
fn new_match_is_not_stored_until_saved() {
    let services = services();
    let game = services.matches.new_match(TEAM_A, TEAM_B);
    assert!(game.id().is_none());
    assert!(services.matches.list_matches().unwrap().is_empty());

    let id = services.matches.save_match(&game).unwrap();
    assert_eq!(services.matches.get_match(&id).unwrap().id(), Some(id.as_str()));
}

#[test]
fn list_matches_newest_first() {
    let services = services();
    let now = Utc::now();
    let older = services
        .matches
        .new_match("Old", "Timers")
        .with_created_at(now - Duration::hours(2));
    let newer = services.matches.new_match("New", "Comers").with_created_at(now);
    services.matches.save_match(&older).unwrap();
    services.matches.save_match(&newer).unwrap();

    let listed = services.matches.list_matches().unwrap();
    let names: Vec<&str> = listed.iter().map(|m| m.team_a()).collect();
    assert_eq!(names, vec!["New", "Old"]);
}

#[test]
fn missing_match_is_not_found() {
    let services = services();
    let err = services.matches.get_match("nope").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "match", .. }));
    assert!(!err.is_rejection());
}

#[test]
fn delete_match() {
    let services = services();
    let id = ready_match(&services);
    assert!(services.matches.delete_match(&id).unwrap());
    assert!(!services.matches.delete_match(&id).unwrap());
    assert!(services.matches.get_match(&id).is_err());
}

// ============================================================================
// Rosters
// ============================================================================

#[test]
fn add_player_assigns_fresh_id() {
    let services = services();
    let game = services.matches.create_match(TEAM_A, TEAM_B).unwrap();
    let id = game.id().unwrap();

    let given = Player::new("Ann", "Setter").with_id("profile-1");
    let added = services.matches.add_player(id, given, Side::A).unwrap();
    assert!(added.id.is_some());
    assert_ne!(added.id.as_deref(), Some("profile-1"));

    let stored = services.matches.get_match(id).unwrap();
    assert_eq!(stored.players_a(), &[added]);
}

#[test]
fn remove_player_from_roster() {
    let services = services();
    let id = ready_match(&services);
    let game = services.matches.get_match(&id).unwrap();
    let cal = game.players_b()[0].id.clone().unwrap();

    let removed = services.matches.remove_player(&id, &cal, Side::B).unwrap();
    assert_eq!(removed.name, "Cal");

    let stored = services.matches.get_match(&id).unwrap();
    assert_eq!(stored.players_b().len(), 1);
}

#[test]
fn remove_unknown_player_is_rejected() {
    let services = services();
    let id = ready_match(&services);
    let err = services
        .matches
        .remove_player(&id, "ghost", Side::A)
        .unwrap_err();
    assert!(matches!(
        err.rejection(),
        Some(Rejection::UnknownPlayer { .. })
    ));
}

#[test]
fn rosters_locked_once_started() {
    let services = services();
    let id = started_match(&services);

    let err = services
        .matches
        .add_player(&id, Player::new("Eve", "Libero"), Side::A)
        .unwrap_err();
    assert!(matches!(
        err.rejection(),
        Some(Rejection::RosterLocked {
            status: MatchStatus::InProgress
        })
    ));
    assert_eq!(services.matches.get_match(&id).unwrap().players_a().len(), 2);
}

// ============================================================================
// Status
// ============================================================================

#[test]
fn start_needs_two_players_per_side() {
    let services = services();
    let game = services.matches.create_match(TEAM_A, TEAM_B).unwrap();
    let id = game.id().unwrap();
    services
        .matches
        .add_player(id, Player::new("Ann", "Setter"), Side::A)
        .unwrap();
    services
        .matches
        .add_player(id, Player::new("Cal", "Outside"), Side::B)
        .unwrap();
    services
        .matches
        .add_player(id, Player::new("Dan", "Middle"), Side::B)
        .unwrap();

    let err = services.matches.start_match(id).unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&Rejection::RosterTooSmall {
            team_a: 1,
            team_b: 2
        })
    );
    assert_eq!(
        services.matches.get_match(id).unwrap().status(),
        MatchStatus::Created
    );
}

#[test]
fn status_moves_forward_only() {
    let services = services();
    let id = ready_match(&services);

    let err = services.matches.finish_match(&id).unwrap_err();
    assert!(err.is_rejection());

    let started = services.matches.start_match(&id).unwrap();
    assert_eq!(started.status(), MatchStatus::InProgress);
    assert_eq!(
        services.matches.get_match(&id).unwrap().status(),
        MatchStatus::InProgress
    );

    services.matches.finish_match(&id).unwrap();
    let err = services
        .matches
        .update_status(&id, MatchStatus::InProgress)
        .unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&Rejection::IllegalTransition {
            from: MatchStatus::Finished,
            to: MatchStatus::InProgress
        })
    );
    assert_eq!(
        services.matches.get_match(&id).unwrap().status(),
        MatchStatus::Finished
    );
}

// ============================================================================
// Action log
// ============================================================================

#[test]
fn serve_hit_score_counts_for_team() {
    let services = services();
    let id = started_match(&services);
    let game = services.matches.get_match(&id).unwrap();

    assert!(!services.matches.controls(&id).unwrap().allows(EventType::Spike));

    services
        .matches
        .record_event(&id, event(&game, EventType::Serve, Side::A))
        .unwrap();
    assert!(services.matches.controls(&id).unwrap().allows(EventType::Spike));

    services
        .matches
        .record_event(&id, event(&game, EventType::Spike, Side::A))
        .unwrap();
    assert!(services
        .matches
        .controls(&id)
        .unwrap()
        .allows(EventType::ScorePoint));

    let updated = services
        .matches
        .record_event(&id, event(&game, EventType::ScorePoint, Side::A))
        .unwrap();
    assert_eq!(updated.score().get(Side::A), 1);
    assert_eq!(updated.score().get(Side::B), 0);

    let stored = services.matches.get_match(&id).unwrap();
    assert_eq!(stored.events().len(), 3);
    assert!(stored.events().iter().all(|e| e.id.is_some()));
    assert_eq!(stored.score().team_a, 1);
}

#[test]
fn hit_on_empty_log_is_rejected_without_writing() {
    let services = services();
    let id = started_match(&services);
    let game = services.matches.get_match(&id).unwrap();

    let err = services
        .matches
        .record_event(&id, event(&game, EventType::Block, Side::B))
        .unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(
        err.to_string(),
        "There must be a serve action before recording a hit"
    );
    assert!(services.matches.get_match(&id).unwrap().events().is_empty());
}

#[test]
fn score_after_score_is_rejected() {
    let services = services();
    let id = started_match(&services);
    let game = services.matches.get_match(&id).unwrap();

    for kind in [EventType::Serve, EventType::Spike, EventType::ScorePoint] {
        services
            .matches
            .record_event(&id, event(&game, kind, Side::B))
            .unwrap();
    }

    let err = services
        .matches
        .record_event(&id, event(&game, EventType::ScorePoint, Side::B))
        .unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::ScoreWithoutHit));

    let stored = services.matches.get_match(&id).unwrap();
    assert_eq!(stored.events().len(), 3);
    assert_eq!(stored.score().team_b, 1);
}

#[test]
fn score_for_unknown_team_changes_no_counter() {
    let services = services();
    let id = started_match(&services);
    let game = services.matches.get_match(&id).unwrap();

    services
        .matches
        .record_event(&id, event(&game, EventType::Serve, Side::A))
        .unwrap();
    services
        .matches
        .record_event(&id, event(&game, EventType::Spike, Side::A))
        .unwrap();
    let stray = MatchEvent::new(EventType::ScorePoint, "p-x", "Stray", "Falcons");
    let updated = services.matches.record_event(&id, stray).unwrap();

    assert_eq!(updated.events().len(), 3);
    for side in [Side::A, Side::B] {
        assert_eq!(updated.score().get(side), 0);
    }
}

#[test]
fn events_only_while_in_progress() {
    let services = services();
    let id = ready_match(&services);
    let game = services.matches.get_match(&id).unwrap();

    let err = services
        .matches
        .record_event(&id, event(&game, EventType::Serve, Side::A))
        .unwrap_err();
    assert_eq!(
        err.rejection(),
        Some(&Rejection::NotInProgress {
            status: MatchStatus::Created
        })
    );

    services.matches.start_match(&id).unwrap();
    services.matches.finish_match(&id).unwrap();
    let err = services
        .matches
        .record_event(&id, event(&game, EventType::Serve, Side::A))
        .unwrap_err();
    assert!(err.is_rejection());
    assert!(services.matches.get_match(&id).unwrap().events().is_empty());
}

#[test]
fn record_event_on_missing_match() {
    let services = services();
    let err = services
        .matches
        .record_event(
            "nope",
            MatchEvent::new(EventType::Serve, "p-1", "Ann", TEAM_A),
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn controls_follow_stored_match() {
    let services = services();
    let id = ready_match(&services);

    let controls = services.matches.controls(&id).unwrap();
    assert!(controls.can_start);
    assert!(controls.can_edit_rosters);
    assert!(!controls.can_finish);
    assert!(controls.available_actions().is_empty());

    services.matches.start_match(&id).unwrap();
    let controls = services.matches.controls(&id).unwrap();
    assert!(controls.can_finish);
    assert!(!controls.can_edit_rosters);
    assert_eq!(
        controls.available_actions(),
        vec![EventType::Serve, EventType::ScorePoint, EventType::Error]
    );
    assert_eq!(
        controls.guidance(EventType::Spike).as_deref(),
        Some("There must be a serve action before recording a hit")
    );
}
