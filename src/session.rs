//! Session controller: API calls wired to store transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends call these operations instead of touching the client and the
//! store separately. Successful auth calls dispatch the joint `LogIn` /
//! `LogOut` actions, so the store never holds a user without tokens.
//! Failed calls leave the store untouched.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tracing::warn;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{AuthTokens, DeletedUser, HealthStatus, User};
use crate::state::users::UserListState;
use crate::state::{AppState, Store};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct Session {
    api: ApiClient,
    store: Store,
}

impl Session {
    #[must_use]
    pub fn new(api: ApiClient, store: Store) -> Self {
        Self { api, store }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    /// Tokens of the current session.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` when no tokens are held.
    pub fn tokens(&self) -> Result<AuthTokens, SessionError> {
        self.store
            .state()
            .auth_tokens()
            .cloned()
            .ok_or(SessionError::NotLoggedIn)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// Log in and start a session.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the store is left unchanged.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        let result = self.api.login(email, password).await?;
        self.store.log_in(result.user.clone(), result.auth_tokens);
        Ok(result.user)
    }

    /// Register a new account and start a session for it.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the store is left unchanged.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, SessionError> {
        let result = self
            .api
            .register(email, password, first_name, last_name)
            .await?;
        self.store.log_in(result.user.clone(), result.auth_tokens);
        Ok(result.user)
    }

    /// Revoke the tokens server-side and end the local session. The local
    /// session ends even when revocation fails; that failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without tokens, or the revocation failure.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        let tokens = self.tokens()?;
        let revoked = self.api.logout(&tokens).await;
        self.store.log_out();
        if let Err(err) = &revoked {
            warn!(kind = err.kind(), error = %err, "token revocation failed; local session cleared");
        }
        revoked.map_err(SessionError::from)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without tokens, or the API failure.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let tokens = self.tokens()?;
        let access_token = self.api.refresh_access_token(&tokens).await?;
        self.store.refresh_auth_tokens(&access_token);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the API failure.
    pub async fn health(&self) -> Result<HealthStatus, SessionError> {
        Ok(self.api.health().await?)
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// Fetch the user table into `list`.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` or the API failure, which is also recorded on `list`.
    pub async fn load_users(&self, list: &mut UserListState) -> Result<(), SessionError> {
        let tokens = self.tokens()?;
        list.begin_load();
        match self.api.get_user_list(&tokens).await {
            Ok(users) => {
                list.replace(users);
                Ok(())
            }
            Err(err) => {
                list.fail(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `NotLoggedIn` or the API failure.
    pub async fn get_user(&self, email: &str) -> Result<User, SessionError> {
        let tokens = self.tokens()?;
        Ok(self.api.get_user(email, &tokens).await?)
    }

    /// Create or update a user and apply the saved record to `list`.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` or the API failure, which is also recorded on `list`.
    pub async fn save_user(
        &self,
        list: &mut UserListState,
        user: &User,
        is_new: bool,
    ) -> Result<User, SessionError> {
        let tokens = self.tokens()?;
        match self.api.save_user(user, is_new, &tokens).await {
            Ok(saved) => {
                list.apply_saved(saved.clone(), is_new);
                Ok(saved)
            }
            Err(err) => {
                list.fail(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Delete a user and drop it from `list`.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` or the API failure, which is also recorded on `list`.
    pub async fn delete_user(
        &self,
        list: &mut UserListState,
        email: &str,
    ) -> Result<DeletedUser, SessionError> {
        let tokens = self.tokens()?;
        match self.api.delete_user(email, &tokens).await {
            Ok(deleted) => {
                list.apply_deleted(&deleted);
                Ok(deleted)
            }
            Err(err) => {
                list.fail(&err.to_string());
                Err(err.into())
            }
        }
    }
}
