//! Full lifecycle over a real SQLite file: seed, signup, profile edit,
//! request exchange, and persistence across process restarts.

use std::path::Path;
use std::sync::Arc;

use skillswap::config::Config;
use skillswap::domain::{Availability, ProfileUpdate, RequestStatus};
use skillswap::kv::{SharedKv, SqliteKv};
use skillswap::state::AppState;
use skillswap::store::requests::NewSwapRequest;
use tempfile::TempDir;

fn open_state(db_path: &Path) -> AppState {
    let kv: SharedKv = Arc::new(SqliteKv::open(db_path).expect("Failed to open test database"));
    AppState::init(Config::default(), kv).expect("Failed to init app state")
}

#[test]
fn first_run_seeds_the_sample_directory() {
    let tmp = TempDir::new().unwrap();
    let state = open_state(&tmp.path().join("test.db"));

    let profiles = state.directory.list_profiles().unwrap();
    assert_eq!(profiles.len(), 3);
    let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Marc Demo", "Michell", "Joe Wills"]);

    // No session on a fresh database
    assert!(state.session.current().unwrap().is_none());
}

#[test]
fn reopening_does_not_reseed() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("test.db");

    {
        let state = open_state(&db_path);
        state
            .session
            .signup("ada@example.com", "secret", "Ada")
            .unwrap();
        assert_eq!(state.directory.list_profiles().unwrap().len(), 4);
    }

    let state = open_state(&db_path);
    assert_eq!(state.directory.list_profiles().unwrap().len(), 4);
}

#[test]
fn signup_edit_and_request_flow_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("test.db");

    let ada_id = {
        let state = open_state(&db_path);

        let ada = state
            .session
            .signup("ada@example.com", "secret", "Ada")
            .unwrap();

        let update = ProfileUpdate {
            location: Some(Some("London".to_string())),
            skills_offered: Some(vec!["Rust".to_string(), "Chess".to_string()]),
            skills_wanted: Some(vec!["Python".to_string()]),
            availability: Some(Availability::Evenings),
            ..Default::default()
        };
        state.session.update_profile(&update).unwrap().unwrap();

        // Ada asks seeded Marc (id "1") for a swap
        state
            .requests
            .create(NewSwapRequest {
                requester_id: ada.id.clone(),
                target_user_id: "1".to_string(),
                offered_skill: "Rust".to_string(),
                wanted_skill: "Python".to_string(),
                message: "Happy to trade Rust lessons for Python help".to_string(),
            })
            .unwrap();

        ada.id
    };

    // "Restart": a fresh state over the same database file
    let state = open_state(&db_path);

    // Session identity survived
    let current = state.session.current().unwrap().unwrap();
    assert_eq!(current.id, ada_id);
    assert_eq!(current.location.as_deref(), Some("London"));
    assert_eq!(current.availability, Availability::Evenings);

    // Directory entry matches the session copy
    let in_directory = state.directory.find(&ada_id).unwrap().unwrap();
    assert_eq!(in_directory.skills_offered, vec!["Rust", "Chess"]);

    // The pending request survived; Marc accepts it
    let requests = state.requests.list().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.can_decide("1"));
    assert!(!request.can_decide(&ada_id));

    state
        .requests
        .update_status(&request.id, RequestStatus::Accepted)
        .unwrap();
    assert_eq!(
        state.requests.find(&request.id).unwrap().unwrap().status,
        RequestStatus::Accepted
    );
}

#[test]
fn rejected_requests_are_deletable_by_either_party() {
    let tmp = TempDir::new().unwrap();
    let state = open_state(&tmp.path().join("test.db"));

    // Between two seeded profiles
    let request = state
        .requests
        .create(NewSwapRequest {
            requester_id: "2".to_string(),
            target_user_id: "3".to_string(),
            offered_skill: "Python".to_string(),
            wanted_skill: "Graphic design".to_string(),
            message: "Swap?".to_string(),
        })
        .unwrap();

    // Pending: only the requester may remove it
    assert!(request.can_delete("2"));
    assert!(!request.can_delete("3"));

    state
        .requests
        .update_status(&request.id, RequestStatus::Rejected)
        .unwrap();
    let rejected = state.requests.find(&request.id).unwrap().unwrap();
    assert!(rejected.can_delete("2"));
    assert!(rejected.can_delete("3"));

    state.requests.delete(&request.id).unwrap();
    assert!(state.requests.find(&request.id).unwrap().is_none());
}

#[test]
fn accepted_requests_are_final() {
    let tmp = TempDir::new().unwrap();
    let state = open_state(&tmp.path().join("test.db"));

    let request = state
        .requests
        .create(NewSwapRequest {
            requester_id: "1".to_string(),
            target_user_id: "2".to_string(),
            offered_skill: "Java Script".to_string(),
            wanted_skill: "Python".to_string(),
            message: "Swap?".to_string(),
        })
        .unwrap();

    state
        .requests
        .update_status(&request.id, RequestStatus::Accepted)
        .unwrap();
    let accepted = state.requests.find(&request.id).unwrap().unwrap();

    // Once accepted, neither party may decide again or delete
    assert!(!accepted.can_decide("1"));
    assert!(!accepted.can_decide("2"));
    assert!(!accepted.can_delete("1"));
    assert!(!accepted.can_delete("2"));
}

#[test]
fn logout_then_login_as_a_seeded_profile() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("test.db");

    {
        let state = open_state(&db_path);
        state
            .session
            .login("michell@example.com", "password123")
            .unwrap();
        state.session.logout().unwrap();
    }

    // Logout persisted
    let state = open_state(&db_path);
    assert!(state.session.current().unwrap().is_none());

    let profile = state
        .session
        .login("joe@example.com", "password123")
        .unwrap();
    assert_eq!(profile.name, "Joe Wills");
}
