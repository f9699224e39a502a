//! Board runtime configuration.
//!
//! All cadences and timeouts are expressed in milliseconds so the
//! configuration round-trips through JSON without a custom duration format.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors returned while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for [`BoardConfig`].
    #[error("failed to parse board configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the board cannot operate with.
    #[error("invalid board configuration: {field} {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Configuration for the task board core.
///
/// # Examples
///
/// ```
/// use taskboard::config::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.reload_interval().as_secs(), 30);
/// assert_eq!(config.timer_tick().as_secs(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Interval between periodic full reloads of the board.
    pub reload_interval_ms: u64,
    /// Cadence of deadline countdown refreshes.
    pub timer_tick_ms: u64,
    /// Lifetime of success notifications.
    pub success_ttl_ms: u64,
    /// Lifetime of informational notifications.
    pub info_ttl_ms: u64,
    /// Lifetime of error notifications.
    pub error_ttl_ms: u64,
    /// Client-side deadline for comment submissions carrying attachments.
    pub upload_timeout_ms: u64,
    /// Client-side deadline for ordinary backend requests.
    pub request_timeout_ms: u64,
    /// Base URL of the backend REST API.
    pub api_base_url: String,
    /// Base URL under which uploaded attachments are served.
    pub storage_base_url: String,
    /// Bearer token sent with every backend request.
    pub api_token: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            reload_interval_ms: 30_000,
            timer_tick_ms: 1_000,
            success_ttl_ms: 3_000,
            info_ttl_ms: 3_000,
            error_ttl_ms: 4_000,
            upload_timeout_ms: 60_000,
            request_timeout_ms: 15_000,
            api_base_url: "http://localhost:8000/api".to_owned(),
            storage_base_url: "http://localhost:8000/storage".to_owned(),
            api_token: None,
        }
    }
}

impl BoardConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every cadence and timeout is non-zero and the API base
    /// URL is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("reload_interval_ms", self.reload_interval_ms),
            ("timer_tick_ms", self.timer_tick_ms),
            ("success_ttl_ms", self.success_ttl_ms),
            ("info_ttl_ms", self.info_ttl_ms),
            ("error_ttl_ms", self.error_ttl_ms),
            ("upload_timeout_ms", self.upload_timeout_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ];
        if let Some(&(field, _)) = durations.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid {
                field,
                reason: "must be greater than zero",
            });
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_base_url",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Sets the backend API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Sets the attachment storage base URL.
    #[must_use]
    pub fn with_storage_base_url(mut self, url: impl Into<String>) -> Self {
        self.storage_base_url = url.into();
        self
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the comment upload timeout.
    #[must_use]
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout_ms = duration_to_millis(timeout);
        self
    }

    /// Sets the periodic reload interval.
    #[must_use]
    pub fn with_reload_interval(mut self, interval: Duration) -> Self {
        self.reload_interval_ms = duration_to_millis(interval);
        self
    }

    /// Returns the periodic reload interval.
    #[must_use]
    pub const fn reload_interval(&self) -> Duration {
        Duration::from_millis(self.reload_interval_ms)
    }

    /// Returns the countdown refresh cadence.
    #[must_use]
    pub const fn timer_tick(&self) -> Duration {
        Duration::from_millis(self.timer_tick_ms)
    }

    /// Returns the comment upload timeout.
    #[must_use]
    pub const fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }

    /// Returns the ordinary request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
