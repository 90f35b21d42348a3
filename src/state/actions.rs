//! Session actions and their creators.
//!
//! DESIGN
//! ======
//! `Action` is the only way to describe a session change. Creators are plain
//! functions so front ends never build variants by hand; `Store` wraps each
//! one in a dispatch.

use crate::net::types::{AuthTokens, User};

/// A described change to the session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetUser(User),
    ClearUser,
    SetAuthTokens(AuthTokens),
    /// Replace only the access token; the refresh token is kept.
    RefreshAuthTokens(String),
    ClearAuthTokens,
    /// Set user and tokens in one transition.
    LogIn { user: User, auth_tokens: AuthTokens },
    /// Clear user and tokens in one transition.
    LogOut,
}

impl Action {
    /// Log-safe name of the action; never includes payload data.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetUser(_) => "@@USER/SET",
            Self::ClearUser => "@@USER/CLEAR",
            Self::SetAuthTokens(_) => "@@AUTH_TOKEN/SET",
            Self::RefreshAuthTokens(_) => "@@AUTH_TOKEN/REFRESH",
            Self::ClearAuthTokens => "@@AUTH_TOKEN/CLEAR",
            Self::LogIn { .. } => "@@SESSION/LOG_IN",
            Self::LogOut => "@@SESSION/LOG_OUT",
        }
    }
}

#[must_use]
pub fn set_user(user: User) -> Action {
    Action::SetUser(user)
}

#[must_use]
pub fn clear_user() -> Action {
    Action::ClearUser
}

#[must_use]
pub fn set_auth_tokens(auth_tokens: AuthTokens) -> Action {
    Action::SetAuthTokens(auth_tokens)
}

#[must_use]
pub fn refresh_auth_tokens(access_token: &str) -> Action {
    Action::RefreshAuthTokens(access_token.to_owned())
}

#[must_use]
pub fn clear_auth_tokens() -> Action {
    Action::ClearAuthTokens
}

#[must_use]
pub fn log_in(user: User, auth_tokens: AuthTokens) -> Action {
    Action::LogIn { user, auth_tokens }
}

#[must_use]
pub fn log_out() -> Action {
    Action::LogOut
}
