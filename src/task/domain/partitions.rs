//! Status-keyed partition of the board's tasks.

use super::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Three ordered task lists, one per [`TaskStatus`].
///
/// Within a partition the most recently changed task comes first: moved and
/// newly created tasks are prepended, while a full load keeps server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPartitions {
    pending: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
}

impl TaskPartitions {
    /// Creates an empty partition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds partitions from a server listing, preserving its order.
    ///
    /// A duplicated id keeps its first occurrence.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut partitions = Self::new();
        let mut seen = HashSet::new();
        for task in tasks {
            if seen.insert(task.id()) {
                partitions.partition_mut(task.status()).push(task);
            }
        }
        partitions
    }

    /// Returns the tasks in `status`, most recent first.
    #[must_use]
    pub fn partition(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    const fn partition_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }

    /// Iterates over every task, column by column.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.pending
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.completed.iter())
    }

    /// Returns every task id held by the board.
    #[must_use]
    pub fn ids(&self) -> HashSet<TaskId> {
        self.iter().map(Task::id).collect()
    }

    /// Returns the total number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.completed.len()
    }

    /// Returns `true` when the board holds no task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a task by id.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.iter().find(|task| task.id() == id)
    }

    /// Returns the status of the partition holding `id`.
    #[must_use]
    pub fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| self.partition(*status).iter().any(|task| task.id() == id))
    }

    /// Returns `true` when a task with `id` is on the board.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.status_of(id).is_some()
    }

    /// Removes a task, returning it.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let status = self.status_of(id)?;
        let partition = self.partition_mut(status);
        let index = partition.iter().position(|task| task.id() == id)?;
        Some(partition.remove(index))
    }

    /// Places `task` at the head of the partition matching its status,
    /// replacing any task with the same id.
    pub fn prepend(&mut self, task: Task) {
        self.remove(task.id());
        self.partition_mut(task.status()).insert(0, task);
    }

    /// Moves a task to `target`, returning its pre-move snapshot.
    ///
    /// The moved task is prepended to the target partition. Returns `None`
    /// when no task has `id`.
    pub fn move_to(
        &mut self,
        id: TaskId,
        target: TaskStatus,
        now: DateTime<Utc>,
    ) -> Option<Task> {
        let mut task = self.remove(id)?;
        let snapshot = task.clone();
        task.set_status(target, now);
        self.partition_mut(target).insert(0, task);
        Some(snapshot)
    }

    /// Replaces a task with a newer version of itself.
    ///
    /// The task keeps its position when its status is unchanged and moves
    /// to the head of its new partition otherwise. Unknown tasks are
    /// prepended.
    pub fn replace(&mut self, task: Task) {
        let Some(current) = self.status_of(task.id()) else {
            self.prepend(task);
            return;
        };
        if current != task.status() {
            self.prepend(task);
            return;
        }
        let partition = self.partition_mut(current);
        if let Some(slot) = partition.iter_mut().find(|held| held.id() == task.id()) {
            *slot = task;
        }
    }

    /// Discards the current contents in favour of a fresh server listing.
    pub fn replace_all(&mut self, tasks: impl IntoIterator<Item = Task>) {
        *self = Self::from_tasks(tasks);
    }

    /// Checks that each task sits in the partition matching its status and
    /// that no id appears twice.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let statuses_match = TaskStatus::ALL.into_iter().all(|status| {
            self.partition(status)
                .iter()
                .all(|task| task.status() == status)
        });
        statuses_match && self.ids().len() == self.len()
    }
}
