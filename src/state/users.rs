//! User-table state for the admin view.
//!
//! DESIGN
//! ======
//! Kept apart from the session store: the list is local to the admin view
//! and discarded with it. Save and delete results are applied in place so
//! the table never needs a re-fetch after a successful mutation.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use crate::net::types::{DeletedUser, User};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserListState {
    pub items: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UserListState {
    /// Mark a fetch as in flight.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the list with a fresh fetch result.
    pub fn replace(&mut self, users: Vec<User>) {
        self.items = users;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed fetch or mutation; the current rows are kept.
    pub fn fail(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_owned());
    }

    /// Apply a saved user: appended when new, replaced by email otherwise.
    /// An update for an email not in the list is appended.
    pub fn apply_saved(&mut self, user: User, is_new: bool) {
        let user = user.without_password();
        if !is_new
            && let Some(existing) = self.items.iter_mut().find(|u| u.email == user.email)
        {
            *existing = user;
            return;
        }
        self.items.push(user);
    }

    /// Drop the row matching a delete result.
    pub fn apply_deleted(&mut self, deleted: &DeletedUser) {
        self.items.retain(|u| u.email != deleted.email);
    }

    #[must_use]
    pub fn find(&self, email: &str) -> Option<&User> {
        self.items.iter().find(|u| u.email == email)
    }
}
