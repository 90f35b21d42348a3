use super::*;
use crate::net::types::{AuthTokens, Role};

fn ann() -> User {
    User::new("ann@example.com", "Ann", "Lee", Role::User)
}

// =============================================================
// UserState defaults
// =============================================================

#[test]
fn user_state_default_is_logged_out() {
    assert!(UserState::default().logged_user.is_none());
}

#[test]
fn missing_state_falls_back_to_initial() {
    let state = reduce(None, &Action::ClearAuthTokens);
    assert_eq!(state, UserState::default());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn set_user_logs_in() {
    let state = reduce(None, &Action::SetUser(ann()));
    assert_eq!(state.logged_user, Some(ann()));
}

#[test]
fn clear_user_logs_out_and_is_idempotent() {
    let logged_in = UserState { logged_user: Some(ann()) };
    let once = reduce(Some(&logged_in), &Action::ClearUser);
    assert_eq!(once, UserState::default());
    let twice = reduce(Some(&once), &Action::ClearUser);
    assert_eq!(twice, once);
}

#[test]
fn joint_actions_drive_user_slice() {
    let state = reduce(None, &Action::LogIn { user: ann(), auth_tokens: AuthTokens::new("a", "r") });
    assert_eq!(state.logged_user, Some(ann()));
    assert_eq!(reduce(Some(&state), &Action::LogOut), UserState::default());
}

#[test]
fn token_actions_leave_user_slice_unchanged() {
    let logged_in = UserState { logged_user: Some(ann()) };
    for action in [
        Action::SetAuthTokens(AuthTokens::new("a", "r")),
        Action::RefreshAuthTokens("b".into()),
        Action::ClearAuthTokens,
    ] {
        assert_eq!(reduce(Some(&logged_in), &action), logged_in);
    }
}
