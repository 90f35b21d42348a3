//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::net::transport::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts};

pub const API_HOST_VAR: &str = "USERDESK_API_HOST";
pub const SESSION_FILE_VAR: &str = "USERDESK_SESSION_FILE";
pub const REQUEST_TIMEOUT_VAR: &str = "USERDESK_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "USERDESK_CONNECT_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: &'static str },

    #[error("invalid API host '{0}' (expected http:// or https://)")]
    InvalidHost(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_host: String,
    pub session_file: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Required:
    /// - `USERDESK_API_HOST`
    ///
    /// Optional:
    /// - `USERDESK_SESSION_FILE`: default `$HOME/.userdesk/session.json`
    /// - `USERDESK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `USERDESK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the host is missing or not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_host = std::env::var(API_HOST_VAR).map_err(|_| ConfigError::MissingVar { var: API_HOST_VAR })?;
        Self::with_host(&api_host)
    }

    /// Config for an explicit host, other settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an http(s) URL.
    pub fn with_host(api_host: &str) -> Result<Self, ConfigError> {
        let api_host = parse_host(api_host)?;
        let session_file = std::env::var(SESSION_FILE_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_session_file, PathBuf::from);
        let timeouts = Timeouts {
            request_secs: env_parse_u64(REQUEST_TIMEOUT_VAR, DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64(CONNECT_TIMEOUT_VAR, DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { api_host, session_file, timeouts })
    }
}

fn parse_host(raw: &str) -> Result<String, ConfigError> {
    let host = raw.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        Ok(host.to_owned())
    } else {
        Err(ConfigError::InvalidHost(raw.to_owned()))
    }
}

fn default_session_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".userdesk").join("session.json"),
        None => PathBuf::from(".userdesk-session.json"),
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
