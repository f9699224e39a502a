//! Full reload of the board from the Task API.

use crate::board::TaskBoard;
use crate::remote::RemoteResult;
use crate::task::{
    domain::{Task, UserId},
    ports::TaskApi,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Replaces the board's partitions with the backend's listing.
///
/// Fetching and applying are separate steps so a caller can issue several
/// reloads concurrently; whichever response is applied last wins.
pub struct TaskLoader<A>
where
    A: TaskApi,
{
    api: Arc<A>,
}

impl<A> Clone for TaskLoader<A>
where
    A: TaskApi,
{
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A> TaskLoader<A>
where
    A: TaskApi,
{
    /// Creates a loader over `api`.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetches the listing for `assignee`, or for the signed-in user when
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns the backend failure unchanged.
    pub async fn fetch(&self, assignee: Option<UserId>) -> RemoteResult<Vec<Task>> {
        self.api.list_tasks(assignee).await
    }

    /// Applies a fetched listing to the board.
    ///
    /// On success the partitions are replaced wholesale and the number of
    /// loaded tasks is returned. On failure the board keeps its current
    /// contents and an error notification is queued.
    ///
    /// # Errors
    ///
    /// Returns the backend failure after notifying.
    pub fn apply(
        &self,
        board: &mut TaskBoard,
        listing: RemoteResult<Vec<Task>>,
        now: DateTime<Utc>,
    ) -> RemoteResult<usize> {
        match listing {
            Ok(tasks) => {
                board.partitions.replace_all(tasks);
                board.last_reload_at = Some(now);
                let loaded = board.partitions.len();
                tracing::debug!(loaded, viewing_as = ?board.viewing_as, "board reloaded");
                Ok(loaded)
            }
            Err(error) => {
                tracing::warn!(%error, "board reload failed");
                board
                    .notifications
                    .error(error.user_message("Failed to load tasks"), now);
                Err(error)
            }
        }
    }

    /// Fetches and applies the listing for the board's current scope.
    ///
    /// # Errors
    ///
    /// Returns the backend failure after notifying.
    pub async fn reload(
        &self,
        board: &mut TaskBoard,
        now: DateTime<Utc>,
    ) -> RemoteResult<usize> {
        let listing = self.fetch(board.viewing_as).await;
        self.apply(board, listing, now)
    }
}
