//! Board controller errors.

use crate::comment::services::CommentSubmitError;
use crate::remote::RemoteError;
use crate::task::domain::TaskId;
use thiserror::Error;

/// Errors returned by board controller operations.
///
/// Every error has already been surfaced to the user as a notification by
/// the time it is returned.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// The signed-in user lacks a privileged role.
    #[error("operation requires a manager or admin role")]
    NotPrivileged,

    /// The task is not on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),

    /// No comment thread is open.
    #[error("no comment thread is open")]
    NoActiveThread,

    /// The backend rejected the operation or could not be reached.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Comment submission failed.
    #[error(transparent)]
    Comment(#[from] CommentSubmitError),
}

/// Result type for board controller operations.
pub type BoardResult<T> = Result<T, BoardError>;
