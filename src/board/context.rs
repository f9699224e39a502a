//! Explicitly owned board state.

use super::notification::{NotificationCenter, NotificationTtl};
use crate::task::domain::{Executor, TaskId, TaskPartitions, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Everything the view renders for one board.
///
/// The board is mutated only through the transition coordinator, the task
/// loader and the board controller; there is no global instance.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    pub(crate) partitions: TaskPartitions,
    pub(crate) notifications: NotificationCenter,
    pub(crate) in_flight: HashSet<TaskId>,
    pub(crate) viewing_as: Option<UserId>,
    pub(crate) executors: Vec<Executor>,
    pub(crate) last_reload_at: Option<DateTime<Utc>>,
}

impl TaskBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new(ttl: NotificationTtl) -> Self {
        Self {
            notifications: NotificationCenter::new(ttl),
            ..Self::default()
        }
    }

    /// Returns the task partitions.
    #[must_use]
    pub const fn partitions(&self) -> &TaskPartitions {
        &self.partitions
    }

    /// Returns the notification queue.
    #[must_use]
    pub const fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Returns the notification queue for dismissal.
    pub const fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    /// Returns `true` while a status change for `task_id` awaits the
    /// backend.
    #[must_use]
    pub fn is_in_flight(&self, task_id: TaskId) -> bool {
        self.in_flight.contains(&task_id)
    }

    /// Returns the number of transitions awaiting the backend.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns the user whose board is shown, when not the signed-in user.
    #[must_use]
    pub const fn viewing_as(&self) -> Option<UserId> {
        self.viewing_as
    }

    /// Returns the loaded executor directory.
    #[must_use]
    pub fn executors(&self) -> &[Executor] {
        &self.executors
    }

    /// Returns when the last successful full load was applied.
    #[must_use]
    pub const fn last_reload_at(&self) -> Option<DateTime<Utc>> {
        self.last_reload_at
    }
}
