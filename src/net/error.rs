//! Error taxonomy for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure path of a call resolves to exactly one `ApiError`. Callers
//! usually only display it; `kind()` is there for logs and exit codes.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A failed API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The HTTP exchange never completed (DNS, connect, timeout, reset).
    #[error("network request failed: {0}")]
    Transport(String),

    /// The server answered with a status outside 2xx/400, or a 400 without
    /// a structured error body.
    #[error("Request rejected with status {status}")]
    Http { status: u16 },

    /// The server reported a structured `_error` message.
    #[error("{0}")]
    Application(String),

    /// The response body did not match the expected schema.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The caller cancelled the call before it resolved.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Http { .. } => "E_HTTP",
            Self::Application(_) => "E_APPLICATION",
            Self::Decode(_) => "E_DECODE",
            Self::Cancelled => "E_CANCELLED",
        }
    }

    /// HTTP status attached to the error, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of the underlying transport, before any HTTP status exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.0)
    }
}
