//! Teams, logos and membership through `TeamService`.

use ballapp::{PlayerProfile, ServiceError, Team};

use crate::support::{ready_match, services};

fn profile(services: &ballapp::Services<ballapp::InMemoryDocumentStore>, name: &str) -> String {
    services
        .profiles
        .save_profile(&PlayerProfile::new(name, "Outside"))
        .unwrap()
}

#[test]
fn save_list_delete_team() {
    let services = services();
    let mut team = Team::new("Eagles");
    team.coach = Some("Moss".into());

    let id = services.teams.save_team(&team).unwrap();
    let listed = services.teams.list_teams().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].coach.as_deref(), Some("Moss"));

    assert!(services.teams.delete_team(&id).unwrap());
    assert!(services.teams.get_team(&id).unwrap().is_none());
}

#[test]
fn logo_upload_updates_team() {
    let services = services();
    let id = services.teams.save_team(&Team::new("Eagles")).unwrap();

    let locator = services.teams.update_logo(&id, b"png").unwrap();
    assert!(locator.contains("logos/team_"));

    let team = services.teams.get_team(&id).unwrap().unwrap();
    assert_eq!(team.logo.as_deref(), Some(locator.as_str()));
    assert_eq!(services.teams.load_logo(&locator).unwrap(), b"png");
}

#[test]
fn membership_merges_local_and_stored_ids() {
    let services = services();
    let ann = profile(&services, "Ann");
    let bea = profile(&services, "Bea");

    // Written by another client: Bea is on the team only in the document.
    let mut team = Team::new("Eagles");
    team.player_ids = vec![bea.clone()];
    let team_id = services.teams.save_team(&team).unwrap();

    services.teams.add_player_to_team(&team_id, &ann).unwrap();

    let stored = services.teams.get_team(&team_id).unwrap().unwrap();
    assert_eq!(stored.player_ids, vec![bea.clone(), ann.clone()]);

    let names: Vec<String> = services
        .teams
        .team_players(&team_id)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Ann", "Bea"]);
}

#[test]
fn adding_twice_keeps_one_entry() {
    let services = services();
    let ann = profile(&services, "Ann");
    let team_id = services.teams.save_team(&Team::new("Eagles")).unwrap();

    services.teams.add_player_to_team(&team_id, &ann).unwrap();
    services.teams.add_player_to_team(&team_id, &ann).unwrap();

    let stored = services.teams.get_team(&team_id).unwrap().unwrap();
    assert_eq!(stored.player_ids, vec![ann]);
}

#[test]
fn remove_player_keeps_other_bindings() {
    let services = services();
    let ann = profile(&services, "Ann");
    let bea = profile(&services, "Bea");
    let team_id = services.teams.save_team(&Team::new("Eagles")).unwrap();
    services.teams.add_player_to_team(&team_id, &ann).unwrap();
    services.teams.add_player_to_team(&team_id, &bea).unwrap();

    services.teams.remove_player_from_team(&team_id, &ann).unwrap();

    let stored = services.teams.get_team(&team_id).unwrap().unwrap();
    assert_eq!(stored.player_ids, vec![bea.clone()]);
    let players = services.teams.team_players(&team_id).unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].id.as_deref(), Some(bea.as_str()));
}

#[test]
fn team_players_skips_ids_without_profile() {
    let services = services();
    let ann = profile(&services, "Ann");
    let team_id = services.teams.save_team(&Team::new("Eagles")).unwrap();
    services.teams.add_player_to_team(&team_id, &ann).unwrap();
    services.teams.add_player_to_team(&team_id, "ghost").unwrap();

    let players = services.teams.team_players(&team_id).unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].name, "Ann");
}

#[test]
fn binding_survives_missing_team() {
    let services = services();
    let ann = profile(&services, "Ann");

    services.teams.add_player_to_team("t-later", &ann).unwrap();
    assert!(services.teams.get_team("t-later").unwrap().is_none());

    let players = services.teams.team_players("t-later").unwrap();
    assert_eq!(players.len(), 1);
}

#[test]
fn candidate_players_exclude_members_and_filter_by_name() {
    let services = services();
    let ann = profile(&services, "Ann");
    profile(&services, "Bea");
    profile(&services, "Annika");
    let team_id = services.teams.save_team(&Team::new("Eagles")).unwrap();
    services.teams.add_player_to_team(&team_id, &ann).unwrap();

    let mut all: Vec<String> = services
        .teams
        .candidate_players(&team_id, "")
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    all.sort();
    assert_eq!(all, vec!["Annika", "Bea"]);

    let searched = services.teams.candidate_players(&team_id, " ANN ").unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].name, "Annika");
}

#[test]
fn team_matches_skip_missing() {
    let services = services();
    let first = ready_match(&services);
    let second = ready_match(&services);
    let team_id = services.teams.save_team(&Team::new("Eagles")).unwrap();

    services.teams.add_match_to_team(&team_id, &first).unwrap();
    services.teams.add_match_to_team(&team_id, "deleted-match").unwrap();
    let team = services.teams.add_match_to_team(&team_id, &second).unwrap();
    assert_eq!(team.match_ids.len(), 3);

    let again = services.teams.add_match_to_team(&team_id, &first).unwrap();
    assert_eq!(again.match_ids.len(), 3);

    let matches = services.teams.team_matches(&team_id).unwrap();
    let ids: Vec<&str> = matches.iter().filter_map(|m| m.id()).collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
}

#[test]
fn team_matches_of_missing_team_is_empty() {
    let services = services();
    assert!(services.teams.team_matches("nope").unwrap().is_empty());
}

#[test]
fn add_match_to_missing_team_is_not_found() {
    let services = services();
    let err = services
        .teams
        .add_match_to_team("nope", "m-1")
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "team", .. }));
}
