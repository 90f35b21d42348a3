use super::*;
use crate::net::types::Role;

fn ann() -> User {
    User::new("ann@example.com", "Ann", "Lee", Role::Admin)
}

#[test]
fn app_state_default_is_logged_out_and_consistent() {
    let state = AppState::default();
    assert!(!state.is_logged_in());
    assert!(state.logged_user().is_none());
    assert!(state.auth_tokens().is_none());
    assert!(state.is_consistent());
}

#[test]
fn root_reducer_routes_action_to_every_slice() {
    let state = reduce(None, &Action::LogIn { user: ann(), auth_tokens: AuthTokens::new("a", "r") });
    assert_eq!(state.logged_user(), Some(&ann()));
    assert_eq!(state.auth_tokens(), Some(&AuthTokens::new("a", "r")));
    assert!(state.is_consistent());
}

#[test]
fn single_slice_actions_can_leave_state_inconsistent() {
    let state = reduce(None, &Action::SetUser(ann()));
    assert!(state.is_logged_in());
    assert!(!state.is_consistent());
}

#[test]
fn log_out_clears_both_slices() {
    let logged_in = reduce(None, &Action::LogIn { user: ann(), auth_tokens: AuthTokens::new("a", "r") });
    let state = reduce(Some(&logged_in), &Action::LogOut);
    assert_eq!(state, AppState::default());
}
