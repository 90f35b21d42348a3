//! Session state: who is logged in and which credentials to send.
//!
//! SYSTEM CONTEXT
//! ==============
//! `user` and `auth_tokens` are independent slices combined into `AppState`.
//! `actions` describes changes, `store` applies them and notifies
//! subscribers, and `users` holds the admin table's local list.
//!
//! DESIGN
//! ======
//! The session controller only dispatches the joint `LogIn`/`LogOut`
//! actions, so user and tokens appear and disappear together. The
//! single-slice actions remain for front ends that need them.

pub mod actions;
pub mod auth_tokens;
pub mod store;
pub mod user;
pub mod users;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use auth_tokens::AuthTokenState;
use user::UserState;

pub use actions::Action;
pub use store::Store;

use crate::net::types::{AuthTokens, User};

/// Root session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub user: UserState,
    pub auth_tokens: AuthTokenState,
}

impl AppState {
    #[must_use]
    pub fn logged_user(&self) -> Option<&User> {
        self.user.logged_user.as_ref()
    }

    #[must_use]
    pub fn auth_tokens(&self) -> Option<&AuthTokens> {
        self.auth_tokens.auth_tokens.as_ref()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.logged_user.is_some()
    }

    /// `true` when user and tokens are either both present or both absent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.user.logged_user.is_some() == self.auth_tokens.auth_tokens.is_some()
    }
}

/// Root reducer: every slice sees every action.
#[must_use]
pub fn reduce(state: Option<&AppState>, action: &Action) -> AppState {
    AppState {
        user: user::reduce(state.map(|s| &s.user), action),
        auth_tokens: auth_tokens::reduce(state.map(|s| &s.auth_tokens), action),
    }
}
