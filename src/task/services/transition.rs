//! Drag-initiated status transitions with optimistic mutation.
//!
//! A transition runs in three phases:
//!
//! 1. [`TransitionCoordinator::begin`] moves the task locally and fires the
//!    completion flourish. The change is visible immediately.
//! 2. [`TransitionSender::send`] issues the backend update. The sender owns
//!    its API handle and borrows no board state, so transitions of
//!    different tasks and reloads may overlap.
//! 3. [`TransitionCoordinator::finish`] reports the outcome. A rejected
//!    update is not undone locally; the board is reloaded from the backend
//!    instead.

use super::TaskLoader;
use crate::board::{BoardEffects, TaskBoard};
use crate::remote::{RemoteError, RemoteResult};
use crate::task::{
    domain::{Task, TaskId, TaskStatus, TaskUpdate},
    ports::TaskApi,
};
use mockable::Clock;
use std::sync::Arc;

/// Optimistic move awaiting backend confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransition {
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
    snapshot: Task,
}

impl PendingTransition {
    /// Returns the moved task's id.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the source status.
    #[must_use]
    pub const fn from(&self) -> TaskStatus {
        self.from
    }

    /// Returns the target status.
    #[must_use]
    pub const fn to(&self) -> TaskStatus {
        self.to
    }

    /// Returns the task as it was before the move.
    #[must_use]
    pub const fn snapshot(&self) -> &Task {
        &self.snapshot
    }
}

/// Result of [`TransitionCoordinator::begin`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionStart {
    /// The task was moved locally and the update must be sent.
    Started(PendingTransition),
    /// Source and target are the same column.
    Unchanged,
    /// A transition for this task is already awaiting the backend.
    AlreadyInFlight,
    /// The task is not on the board.
    UnknownTask,
}

/// Backend answer for a pending transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// The transition that was sent.
    pub pending: PendingTransition,
    /// Backend result of the status update.
    pub result: RemoteResult<Task>,
}

/// Final report of a transition request.
#[derive(Debug, Clone)]
pub enum TransitionReport {
    /// The backend accepted the new status.
    Confirmed {
        /// Moved task.
        task_id: TaskId,
        /// Accepted status.
        status: TaskStatus,
    },
    /// The backend rejected the update and the board was reloaded.
    Reconciled {
        /// Task whose move was rejected.
        task_id: TaskId,
        /// Backend failure.
        error: RemoteError,
    },
    /// Source and target are the same column; nothing happened.
    Unchanged,
    /// A transition for this task is already awaiting the backend.
    AlreadyInFlight,
    /// The task is not on the board.
    UnknownTask,
}

/// Detached handle that sends status updates for pending transitions.
pub struct TransitionSender<A>
where
    A: TaskApi,
{
    api: Arc<A>,
}

impl<A> Clone for TransitionSender<A>
where
    A: TaskApi,
{
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A> TransitionSender<A>
where
    A: TaskApi,
{
    /// Sends the status update for a pending transition.
    pub async fn send(&self, pending: PendingTransition) -> TransitionOutcome {
        let result = self
            .api
            .update_task(pending.task_id, &TaskUpdate::status(pending.to))
            .await;
        TransitionOutcome { pending, result }
    }
}

/// Orchestrates status transitions against the Task API.
pub struct TransitionCoordinator<A, F, C>
where
    A: TaskApi,
    F: BoardEffects,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    effects: Arc<F>,
    clock: Arc<C>,
    loader: TaskLoader<A>,
}

impl<A, F, C> TransitionCoordinator<A, F, C>
where
    A: TaskApi,
    F: BoardEffects,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator.
    #[must_use]
    pub fn new(api: Arc<A>, effects: Arc<F>, clock: Arc<C>) -> Self {
        let loader = TaskLoader::new(Arc::clone(&api));
        Self {
            api,
            effects,
            clock,
            loader,
        }
    }

    /// Applies the optimistic move of `task_id` to `target`.
    ///
    /// Dropping into the completed column fires the celebration and an
    /// informational notification before the backend is consulted.
    pub fn begin(
        &self,
        board: &mut TaskBoard,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TransitionStart {
        if board.in_flight.contains(&task_id) {
            tracing::debug!(%task_id, "transition ignored, previous drop still in flight");
            return TransitionStart::AlreadyInFlight;
        }
        let Some(from) = board.partitions.status_of(task_id) else {
            tracing::warn!(%task_id, "transition requested for a task not on the board");
            return TransitionStart::UnknownTask;
        };
        if from == target {
            return TransitionStart::Unchanged;
        }

        let now = self.clock.utc();
        let Some(snapshot) = board.partitions.move_to(task_id, target, now) else {
            return TransitionStart::UnknownTask;
        };
        board.in_flight.insert(task_id);

        if target == TaskStatus::Completed {
            if let Some(task) = board.partitions.find(task_id) {
                self.effects.celebrate(task);
            }
            board
                .notifications
                .info(format!("\"{}\" completed", snapshot.title()), now);
        }

        tracing::info!(%task_id, %from, to = %target, "optimistic status change applied");
        TransitionStart::Started(PendingTransition {
            task_id,
            from,
            to: target,
            snapshot,
        })
    }

    /// Returns a sender that can outlive borrows of the coordinator.
    #[must_use]
    pub fn sender(&self) -> TransitionSender<A> {
        TransitionSender {
            api: Arc::clone(&self.api),
        }
    }

    /// Sends the status update for a pending transition.
    pub async fn send(&self, pending: PendingTransition) -> TransitionOutcome {
        self.sender().send(pending).await
    }

    /// Reports a backend answer, reloading the board on failure.
    pub async fn finish(
        &self,
        board: &mut TaskBoard,
        outcome: TransitionOutcome,
    ) -> TransitionReport {
        let TransitionOutcome { pending, result } = outcome;
        let task_id = pending.task_id;
        board.in_flight.remove(&task_id);

        match result {
            Ok(_) => {
                board.notifications.success(
                    format!("Task moved to {}", pending.to.label()),
                    self.clock.utc(),
                );
                TransitionReport::Confirmed {
                    task_id,
                    status: pending.to,
                }
            }
            Err(error) => {
                tracing::warn!(
                    %task_id,
                    from = %pending.from,
                    to = %pending.to,
                    %error,
                    "status change rejected, reloading board"
                );
                board.notifications.error(
                    error.user_message("Failed to update task status"),
                    self.clock.utc(),
                );
                let listing = self.loader.fetch(board.viewing_as).await;
                // A failed reload has already been reported by the loader.
                let _reloaded = self.loader.apply(board, listing, self.clock.utc());
                TransitionReport::Reconciled { task_id, error }
            }
        }
    }

    /// Runs all three phases for a single drop.
    pub async fn request_transition(
        &self,
        board: &mut TaskBoard,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TransitionReport {
        match self.begin(board, task_id, target) {
            TransitionStart::Started(pending) => {
                let outcome = self.send(pending).await;
                self.finish(board, outcome).await
            }
            TransitionStart::Unchanged => TransitionReport::Unchanged,
            TransitionStart::AlreadyInFlight => TransitionReport::AlreadyInFlight,
            TransitionStart::UnknownTask => TransitionReport::UnknownTask,
        }
    }
}
