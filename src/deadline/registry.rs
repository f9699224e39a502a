//! Per-task countdown timers with explicit lifecycle.

use super::{Countdown, countdown};
use crate::task::domain::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

struct TimerEntry {
    deadline: DateTime<Utc>,
    receiver: watch::Receiver<Countdown>,
    handle: JoinHandle<()>,
}

/// Registry of live countdowns keyed by task id.
///
/// Each entry is a tokio task that recomputes its countdown on a fixed
/// cadence and publishes it through a watch channel. Entries stop ticking
/// once overdue and are aborted by [`DeadlineTimers::stop`],
/// [`DeadlineTimers::sync_visible`] or when the registry is dropped.
///
/// Starting entries requires a running tokio runtime.
pub struct DeadlineTimers<C>
where
    C: Clock + Send + Sync + 'static,
{
    clock: Arc<C>,
    tick: Duration,
    entries: HashMap<TaskId, TimerEntry>,
}

impl<C> DeadlineTimers<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty registry refreshing every `tick`.
    #[must_use]
    pub fn new(clock: Arc<C>, tick: Duration) -> Self {
        Self {
            clock,
            tick,
            entries: HashMap::new(),
        }
    }

    /// Starts the countdown for `task_id`.
    ///
    /// Starting an entry that already tracks the same deadline leaves it
    /// running; a different deadline restarts it.
    pub fn start(&mut self, task_id: TaskId, deadline: DateTime<Utc>) {
        if self
            .entries
            .get(&task_id)
            .is_some_and(|entry| entry.deadline == deadline)
        {
            return;
        }
        self.stop(task_id);

        let initial = countdown(self.clock.utc(), deadline);
        let (sender, receiver) = watch::channel(initial);
        let clock = Arc::clone(&self.clock);
        let tick = self.tick;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let current = countdown(clock.utc(), deadline);
                let overdue = current.is_overdue;
                sender.send_replace(current);
                if overdue {
                    break;
                }
            }
        });
        tracing::trace!(%task_id, %deadline, "deadline timer started");
        self.entries.insert(
            task_id,
            TimerEntry {
                deadline,
                receiver,
                handle,
            },
        );
    }

    /// Stops the countdown for `task_id`. Returns `true` if one was running.
    pub fn stop(&mut self, task_id: TaskId) -> bool {
        self.entries.remove(&task_id).is_some_and(|entry| {
            entry.handle.abort();
            tracing::trace!(%task_id, "deadline timer stopped");
            true
        })
    }

    /// Stops every countdown.
    pub fn stop_all(&mut self) {
        for (_, entry) in self.entries.drain() {
            entry.handle.abort();
        }
    }

    /// Aligns the registry with the tasks currently rendered.
    ///
    /// Tasks that have a deadline and are not completed get a countdown;
    /// every other entry is stopped.
    pub fn sync_visible<'a>(&mut self, tasks: impl IntoIterator<Item = &'a Task>) {
        let wanted: HashMap<TaskId, DateTime<Utc>> = tasks
            .into_iter()
            .filter(|task| task.status() != TaskStatus::Completed)
            .filter_map(|task| task.deadline().map(|deadline| (task.id(), deadline)))
            .collect();

        let stale: Vec<TaskId> = self
            .entries
            .keys()
            .filter(|id| !wanted.contains_key(id))
            .copied()
            .collect();
        for task_id in stale {
            self.stop(task_id);
        }
        for (task_id, deadline) in wanted {
            self.start(task_id, deadline);
        }
    }

    /// Returns the latest countdown published for `task_id`.
    #[must_use]
    pub fn current(&self, task_id: TaskId) -> Option<Countdown> {
        self.entries
            .get(&task_id)
            .map(|entry| entry.receiver.borrow().clone())
    }

    /// Subscribes to countdown updates for `task_id`.
    #[must_use]
    pub fn subscribe(&self, task_id: TaskId) -> Option<watch::Receiver<Countdown>> {
        self.entries.get(&task_id).map(|entry| entry.receiver.clone())
    }

    /// Returns `true` when a countdown runs for `task_id`.
    #[must_use]
    pub fn is_running(&self, task_id: TaskId) -> bool {
        self.entries.contains_key(&task_id)
    }

    /// Returns the number of registered countdowns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no countdown is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Drop for DeadlineTimers<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop_all();
    }
}
