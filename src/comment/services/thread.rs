//! Comment thread of the active task and its compose state.

use crate::attachment::{AttachmentStaging, LocalFile, PreviewStore};
use crate::board::NotificationCenter;
use crate::comment::{Comment, CommentApi, NewComment};
use crate::remote::{RemoteError, RemoteResult};
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Shown when a submission has neither text nor files.
pub const EMPTY_COMMENT_MESSAGE: &str = "Please enter a comment or attach a file";
/// Shown when a submission exceeds the upload timeout.
pub const UPLOAD_TIMEOUT_MESSAGE: &str = "Upload timed out. Please try again with smaller files.";
/// Shown for other failures when the backend sent no message.
pub const COMMENT_FAILED_MESSAGE: &str = "Failed to add comment";

/// Errors returned by [`CommentThreadController::submit`].
#[derive(Debug, Clone, Error)]
pub enum CommentSubmitError {
    /// Neither text nor files were provided; nothing was sent.
    #[error("comment has no text and no attachments")]
    EmptyComment,
    /// The backend rejected the submission or it did not complete.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Result type for comment submission.
pub type CommentSubmitResult<T> = Result<T, CommentSubmitError>;

/// Loads a task's comment thread and submits new comments to it.
///
/// Compose state (body, internal flag and staged files) survives failed
/// submissions and is cleared only once the backend accepts a comment.
/// Submission borrows the controller mutably for its whole duration, so a
/// second submission cannot start while one is outstanding.
pub struct CommentThreadController<A, P, C>
where
    A: CommentApi,
    P: PreviewStore,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    clock: Arc<C>,
    upload_timeout: Duration,
    active_task: Option<TaskId>,
    comments: Vec<Comment>,
    body: String,
    is_internal: bool,
    staging: AttachmentStaging<P>,
}

impl<A, P, C> CommentThreadController<A, P, C>
where
    A: CommentApi,
    P: PreviewStore,
    C: Clock + Send + Sync,
{
    /// Creates a controller with no active task.
    #[must_use]
    pub const fn new(api: Arc<A>, previews: Arc<P>, clock: Arc<C>, upload_timeout: Duration) -> Self {
        Self {
            api,
            clock,
            upload_timeout,
            active_task: None,
            comments: Vec::new(),
            body: String::new(),
            is_internal: false,
            staging: AttachmentStaging::new(previews),
        }
    }

    /// Returns the task whose thread is shown.
    #[must_use]
    pub const fn active_task(&self) -> Option<TaskId> {
        self.active_task
    }

    /// Returns the loaded comments in server order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the comment text being composed.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns whether the comment being composed is internal.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.is_internal
    }

    /// Returns the staged attachments.
    #[must_use]
    pub const fn staging(&self) -> &AttachmentStaging<P> {
        &self.staging
    }

    /// Switches to `task_id`, discarding compose state, and loads its
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns the backend failure of the thread load; the task stays
    /// active with an empty thread.
    pub async fn open_task(&mut self, task_id: TaskId) -> RemoteResult<usize> {
        if self.active_task != Some(task_id) {
            self.reset_compose();
            self.comments.clear();
            self.active_task = Some(task_id);
        }
        self.load_thread(task_id).await
    }

    /// Closes the thread, discarding compose state.
    pub fn close(&mut self) {
        self.reset_compose();
        self.comments.clear();
        self.active_task = None;
    }

    /// Replaces the thread with the backend's list for `task_id`.
    ///
    /// A failed load leaves the current list untouched and is only logged.
    /// Results for a task that is no longer active are discarded.
    ///
    /// # Errors
    ///
    /// Returns the backend failure unchanged.
    pub async fn load_thread(&mut self, task_id: TaskId) -> RemoteResult<usize> {
        match self.api.list_comments(task_id).await {
            Ok(comments) => {
                if self.active_task.is_none_or(|active| active == task_id) {
                    self.active_task = Some(task_id);
                    self.comments = comments;
                } else {
                    tracing::debug!(%task_id, "discarding thread of inactive task");
                }
                Ok(self.comments.len())
            }
            Err(error) => {
                tracing::warn!(%task_id, %error, "failed to load comments");
                Err(error)
            }
        }
    }

    /// Sets the comment text.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Sets whether the comment is internal.
    pub const fn set_internal(&mut self, is_internal: bool) {
        self.is_internal = is_internal;
    }

    /// Stages selected files.
    pub fn stage_files(&mut self, files: impl IntoIterator<Item = LocalFile>) {
        self.staging.stage(files);
    }

    /// Stages pasted image data.
    pub fn stage_pasted(&mut self, bytes: impl Into<Arc<[u8]>>, mime: &str) {
        self.staging.stage_pasted(bytes, mime, self.clock.utc());
    }

    /// Removes a staged file.
    pub fn unstage(&mut self, index: usize) -> Option<LocalFile> {
        self.staging.unstage(index)
    }

    /// Submits the composed comment to `task_id`.
    ///
    /// Text, internal flag and every staged file go out in one request
    /// bounded by the upload timeout. Exactly one notification is raised.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSubmitError::EmptyComment`] without a network call
    /// when there is nothing to send, and [`CommentSubmitError::Remote`]
    /// when the backend rejects the comment or the upload times out. Compose
    /// state is kept in both cases.
    pub async fn submit(
        &mut self,
        task_id: TaskId,
        notifications: &mut NotificationCenter,
    ) -> CommentSubmitResult<Comment> {
        let request = NewComment {
            body: self.body.trim().to_owned(),
            is_internal: self.is_internal,
            files: self.staging.to_upload(),
        };
        if request.is_empty() {
            notifications.error(EMPTY_COMMENT_MESSAGE, self.clock.utc());
            return Err(CommentSubmitError::EmptyComment);
        }

        tracing::info!(
            %task_id,
            files = request.files.len(),
            bytes = self.staging.total_bytes(),
            internal = request.is_internal,
            "submitting comment"
        );
        let sent = tokio::time::timeout(
            self.upload_timeout,
            self.api.create_comment(task_id, &request),
        )
        .await
        .unwrap_or_else(|_elapsed| Err(RemoteError::Timeout));

        match sent {
            Ok(comment) => {
                self.reset_compose();
                notifications.success("Comment added", self.clock.utc());
                if self.active_task == Some(task_id) {
                    // A failed reload is logged and the previous list kept.
                    let _reloaded = self.load_thread(task_id).await;
                }
                Ok(comment)
            }
            Err(error) => {
                tracing::warn!(%task_id, %error, "comment submission failed");
                let message = if error.is_timeout() {
                    UPLOAD_TIMEOUT_MESSAGE.to_owned()
                } else {
                    error.user_message(COMMENT_FAILED_MESSAGE)
                };
                notifications.error(message, self.clock.utc());
                Err(error.into())
            }
        }
    }

    fn reset_compose(&mut self) {
        self.body.clear();
        self.is_internal = false;
        self.staging.clear();
    }
}
