//! Logged-user slice of the session state.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use super::actions::Action;
use crate::net::types::User;

/// `None` until a login succeeds, and again after logout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserState {
    pub logged_user: Option<User>,
}

/// Compute the next user slice. A missing state starts from the default;
/// actions this slice does not handle return the input unchanged.
#[must_use]
pub fn reduce(state: Option<&UserState>, action: &Action) -> UserState {
    let state = state.cloned().unwrap_or_default();
    match action {
        Action::SetUser(user) | Action::LogIn { user, .. } => {
            UserState { logged_user: Some(user.clone()) }
        }
        Action::ClearUser | Action::LogOut => UserState { logged_user: None },
        _ => state,
    }
}
