//! Transient notification queue.
//!
//! Each notification expires on its own schedule; several may be visible at
//! once and new ones never overwrite older ones.

use crate::config::BoardConfig;
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An operation succeeded.
    Success,
    /// An operation failed.
    Error,
    /// Neutral information.
    Info,
}

/// Identifier of a queued notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

/// Auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Queue identifier.
    pub id: NotificationId,
    /// Severity.
    pub severity: Severity,
    /// Message text.
    pub message: String,
    /// When the notification was raised.
    pub created_at: DateTime<Utc>,
    /// When the notification stops being shown.
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Returns `true` while the notification should be displayed.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Lifetimes per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTtl {
    /// Lifetime of success notifications.
    pub success: Duration,
    /// Lifetime of error notifications.
    pub error: Duration,
    /// Lifetime of informational notifications.
    pub info: Duration,
}

impl NotificationTtl {
    /// Reads lifetimes from the board configuration.
    #[must_use]
    pub const fn from_config(config: &BoardConfig) -> Self {
        Self {
            success: Duration::from_millis(config.success_ttl_ms),
            error: Duration::from_millis(config.error_ttl_ms),
            info: Duration::from_millis(config.info_ttl_ms),
        }
    }

    const fn for_severity(&self, severity: Severity) -> Duration {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Info => self.info,
        }
    }
}

impl Default for NotificationTtl {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

/// Queue of stacked, independently expiring notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    ttl: NotificationTtl,
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationCenter {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new(ttl: NotificationTtl) -> Self {
        Self {
            ttl,
            next_id: 0,
            items: Vec::new(),
        }
    }

    /// Queues a notification and returns its id.
    pub fn push(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let lifetime = TimeDelta::from_std(self.ttl.for_severity(severity))
            .unwrap_or(TimeDelta::MAX);
        let text = message.into();
        tracing::debug!(?severity, message = %text, "notification raised");
        self.items.push(Notification {
            id,
            severity,
            message: text,
            created_at: now,
            expires_at: now.checked_add_signed(lifetime).unwrap_or(DateTime::<Utc>::MAX_UTC),
        });
        id
    }

    /// Queues a success notification.
    pub fn success(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> NotificationId {
        self.push(Severity::Success, message, now)
    }

    /// Queues an error notification.
    pub fn error(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> NotificationId {
        self.push(Severity::Error, message, now)
    }

    /// Queues an informational notification.
    pub fn info(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> NotificationId {
        self.push(Severity::Info, message, now)
    }

    /// Returns every queued notification, oldest first, expired or not.
    #[must_use]
    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    /// Iterates over notifications that are still visible at `now`.
    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |item| item.is_active(now))
    }

    /// Returns the most recently queued notification.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    /// Drops expired notifications and returns how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.is_active(now));
        before - self.items.len()
    }

    /// Dismisses a notification early.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before != self.items.len()
    }

    /// Returns the number of queued notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
