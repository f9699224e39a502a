//! Comment API port.

use super::{Comment, NewComment};
use crate::remote::RemoteResult;
use crate::task::domain::TaskId;
use async_trait::async_trait;

/// Backend contract for a task's comment thread.
#[async_trait]
pub trait CommentApi: Send + Sync {
    /// Lists the comments of a task in creation order.
    async fn list_comments(&self, task_id: TaskId) -> RemoteResult<Vec<Comment>>;

    /// Submits a comment with its files as one multipart request.
    async fn create_comment(&self, task_id: TaskId, comment: &NewComment)
    -> RemoteResult<Comment>;
}
