//! Remote backend contract shared by every port.
//!
//! Every call to the agency backend either succeeds with a payload or fails
//! with a [`RemoteError`]. The backend reports failures uniformly as
//! `{success: false, message}`; transport problems are classified
//! separately so callers can distinguish timeouts from generic failures.

mod envelope;
pub mod http;

pub use envelope::ApiEnvelope;

use std::sync::Arc;
use thiserror::Error;

/// Result type for remote backend operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors returned by backend adapters.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The backend answered with `success: false`.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// Server-supplied explanation, if any.
        message: Option<String>,
    },

    /// The request exceeded its client-side deadline.
    #[error("request timed out")]
    Timeout,

    /// The request never produced a backend answer.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a body that could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Creates a rejection carrying a server message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the server-supplied message, if the backend sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref().filter(|text| !text.trim().is_empty()),
            Self::Timeout | Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns the server message when present, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }

    /// Returns `true` for timeout-class failures.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
