//! JSON response envelope used by every backend endpoint.

use super::{RemoteError, RemoteResult};
use serde::Deserialize;

/// Uniform `{success, data, message}` wrapper returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend accepted the request.
    pub success: bool,
    /// Response payload, present on success for data-returning endpoints.
    pub data: Option<T>,
    /// Human-readable message, usually present on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Converts the envelope into a payload result.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Rejected`] when `success` is false and
    /// [`RemoteError::Decode`] when a successful envelope has no payload.
    pub fn into_result(self) -> RemoteResult<T> {
        if !self.success {
            return Err(RemoteError::Rejected {
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| RemoteError::Decode("successful response without data".to_owned()))
    }

    /// Converts the envelope into a unit result, ignoring any payload.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Rejected`] when `success` is false.
    pub fn into_unit(self) -> RemoteResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected {
                message: self.message,
            })
        }
    }
}
