//! On-disk session persistence for the command-line front end.
//!
//! DESIGN
//! ======
//! A logged-in session (user + token pair) is written as one JSON document so
//! separate CLI invocations share it. Only complete sessions are stored; a
//! half session is never written. On Unix the file is created owner-only.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::net::types::{AuthTokens, User};
use crate::state::AppState;
use crate::state::auth_tokens::AuthTokenState;
use crate::state::user::UserState;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session file {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("session file {path} is corrupt: {source}")]
    Format { path: PathBuf, source: serde_json::Error },
}

/// Persisted form of a logged-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub user: User,
    pub auth_tokens: AuthTokens,
}

impl StoredSession {
    /// Snapshot a session; `None` unless both user and tokens are present.
    #[must_use]
    pub fn from_state(state: &AppState) -> Option<Self> {
        let user = state.logged_user()?.without_password();
        let auth_tokens = state.auth_tokens()?.clone();
        Some(Self { user, auth_tokens })
    }

    #[must_use]
    pub fn into_state(self) -> AppState {
        AppState {
            user: UserState { logged_user: Some(self.user) },
            auth_tokens: AuthTokenState { auth_tokens: Some(self.auth_tokens) },
        }
    }
}

pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session. A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };
        let session = serde_json::from_str(&raw)
            .map_err(|source| StorageError::Format { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), "session loaded");
        Ok(Some(session))
    }

    /// Write the session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, session: &StoredSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|source| StorageError::Format { path: self.path.clone(), source })?;

        let mut file = open_private(&self.path).map_err(|source| self.io_error(source))?;
        file.write_all(json.as_bytes())
            .map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the stored session. Removing a missing file succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }
}

fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}
