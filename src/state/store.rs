//! Dispatching container for `AppState`.
//!
//! DESIGN
//! ======
//! The store is an ordinary value owned by the front end and passed by
//! reference; there is no global instance. Each dispatch runs the root
//! reducer, appends the action to the log and, only when the state actually
//! changed, swaps the snapshot and notifies subscribers. An unchanged state
//! keeps the same `Arc`, so readers can compare snapshots with `Arc::ptr_eq`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use tracing::{debug, info};

use super::actions::{self, Action};
use super::{AppState, reduce};
use crate::net::types::{AuthTokens, User};

type Listener = Box<dyn Fn(&AppState) + Send>;

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Store {
    state: Arc<AppState>,
    log: Vec<Action>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Store seeded with a previously saved state.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self { state: Arc::new(state), log: Vec::new(), listeners: Vec::new(), next_subscription: 0 }
    }

    /// Current read-only snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Every action dispatched so far, oldest first.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.log
    }

    /// Apply an action. Returns `true` when the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(Some(&*self.state), &action);
        let changed = next != *self.state;
        debug!(action = action.name(), changed, "dispatch");
        self.log.push(action);

        if !changed {
            return false;
        }
        self.state = Arc::new(next);
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
        true
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl Fn(&AppState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    // =========================================================================
    // ACTION CREATORS
    // =========================================================================

    pub fn set_user(&mut self, user: User) -> bool {
        self.dispatch(actions::set_user(user))
    }

    pub fn clear_user(&mut self) -> bool {
        self.dispatch(actions::clear_user())
    }

    pub fn set_auth_tokens(&mut self, auth_tokens: AuthTokens) -> bool {
        self.dispatch(actions::set_auth_tokens(auth_tokens))
    }

    pub fn refresh_auth_tokens(&mut self, access_token: &str) -> bool {
        self.dispatch(actions::refresh_auth_tokens(access_token))
    }

    pub fn clear_auth_tokens(&mut self) -> bool {
        self.dispatch(actions::clear_auth_tokens())
    }

    pub fn log_in(&mut self, user: User, auth_tokens: AuthTokens) -> bool {
        info!(email = %user.email, role = %user.role, "session started");
        self.dispatch(actions::log_in(user, auth_tokens))
    }

    pub fn log_out(&mut self) -> bool {
        info!("session ended");
        self.dispatch(actions::log_out())
    }
}
