//! Auth-token slice of the session state.
//!
//! DESIGN
//! ======
//! A refresh replaces only the access token. With no tokens held there is
//! no refresh token to pair the new access token with, so a refresh in that
//! state is a no-op.

#[cfg(test)]
#[path = "auth_tokens_test.rs"]
mod auth_tokens_test;

use super::actions::Action;
use crate::net::types::AuthTokens;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthTokenState {
    pub auth_tokens: Option<AuthTokens>,
}

/// Compute the next token slice. A missing state starts from the default;
/// actions this slice does not handle return the input unchanged.
#[must_use]
pub fn reduce(state: Option<&AuthTokenState>, action: &Action) -> AuthTokenState {
    let state = state.cloned().unwrap_or_default();
    match action {
        Action::SetAuthTokens(auth_tokens) | Action::LogIn { auth_tokens, .. } => {
            AuthTokenState { auth_tokens: Some(auth_tokens.clone()) }
        }
        Action::RefreshAuthTokens(access_token) => match state.auth_tokens {
            Some(current) => AuthTokenState {
                auth_tokens: Some(AuthTokens { access_token: access_token.clone(), ..current }),
            },
            None => AuthTokenState { auth_tokens: None },
        },
        Action::ClearAuthTokens | Action::LogOut => AuthTokenState { auth_tokens: None },
        _ => state,
    }
}
