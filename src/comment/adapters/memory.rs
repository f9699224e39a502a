//! In-memory Comment API.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::attachment::AttachmentDescriptor;
use crate::comment::{Comment, CommentApi, CommentAuthor, CommentId, NewComment};
use crate::remote::{RemoteError, RemoteResult};
use crate::task::domain::{TaskId, UserId};

/// Comment API operation, used for failure injection and call accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentOperation {
    /// [`CommentApi::list_comments`].
    List,
    /// [`CommentApi::create_comment`].
    Create,
}

/// Thread-safe in-memory Comment API.
///
/// Every create request is recorded, including ones that fail, so tests can
/// assert how many submissions reached the backend.
#[derive(Clone)]
pub struct InMemoryCommentApi {
    state: Arc<RwLock<CommentState>>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for InMemoryCommentApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCommentApi")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct CommentState {
    threads: HashMap<TaskId, Vec<Comment>>,
    next_id: i64,
    author: Option<CommentAuthor>,
    create_delay: Option<Duration>,
    failures: HashMap<CommentOperation, VecDeque<RemoteError>>,
    calls: HashMap<CommentOperation, usize>,
    submissions: Vec<(TaskId, NewComment)>,
}

impl InMemoryCommentApi {
    /// Creates an API with no comments, stamping new ones from `clock`.
    #[must_use]
    pub fn new<C>(clock: Arc<C>) -> Self
    where
        C: Clock + 'static,
    {
        Self {
            state: Arc::default(),
            clock,
        }
    }

    /// Sets the author recorded on created comments.
    #[must_use]
    pub fn acting_as(self, author: CommentAuthor) -> Self {
        self.write().author = Some(author);
        self
    }

    /// Delays every create request by `delay` before it is answered.
    pub fn delay_creates(&self, delay: Duration) {
        self.write().create_delay = Some(delay);
    }

    /// Stores a comment directly, as if another user had posted it.
    pub fn put_comment(&self, comment: Comment) {
        let mut state = self.write();
        state.next_id = state.next_id.max(comment.id.value());
        state.threads.entry(comment.task_id).or_default().push(comment);
    }

    /// Returns the stored thread of a task.
    #[must_use]
    pub fn thread(&self, task_id: TaskId) -> Vec<Comment> {
        self.read()
            .threads
            .get(&task_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns every create request received, in arrival order.
    #[must_use]
    pub fn submissions(&self) -> Vec<(TaskId, NewComment)> {
        self.read().submissions.clone()
    }

    /// Queues a failure for the next call of `operation`.
    pub fn fail_next(&self, operation: CommentOperation, error: RemoteError) {
        self.write()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Returns how many times `operation` has been called.
    #[must_use]
    pub fn calls(&self, operation: CommentOperation) -> usize {
        self.read().calls.get(&operation).copied().unwrap_or(0)
    }

    fn read(&self) -> RwLockReadGuard<'_, CommentState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CommentState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self, operation: CommentOperation) -> RemoteResult<()> {
        let mut state = self.write();
        *state.calls.entry(operation).or_default() += 1;
        state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
            .map_or(Ok(()), Err)
    }
}

#[async_trait]
impl CommentApi for InMemoryCommentApi {
    async fn list_comments(&self, task_id: TaskId) -> RemoteResult<Vec<Comment>> {
        self.record_call(CommentOperation::List)?;
        Ok(self.thread(task_id))
    }

    async fn create_comment(
        &self,
        task_id: TaskId,
        comment: &NewComment,
    ) -> RemoteResult<Comment> {
        let configured_delay = {
            let mut state = self.write();
            state.submissions.push((task_id, comment.clone()));
            state.create_delay
        };
        if let Some(delay) = configured_delay {
            tokio::time::sleep(delay).await;
        }
        self.record_call(CommentOperation::Create)?;

        let now = self.clock.utc();
        let mut state = self.write();
        state.next_id += 1;
        let id = CommentId::new(state.next_id);
        let author = state.author.clone().unwrap_or_else(|| CommentAuthor {
            id: UserId::new(0),
            name: None,
        });
        let attachments = comment
            .files
            .iter()
            .map(|file| AttachmentDescriptor {
                filename: file.name().to_owned(),
                path: format!("comments/{task_id}/{id}/{}", file.name()),
                original_name: file.name().to_owned(),
                size: u64::try_from(file.size()).unwrap_or(u64::MAX),
                uploaded_at: now,
            })
            .collect();
        let created = Comment {
            id,
            task_id,
            author,
            body: comment.body.clone(),
            is_internal: comment.is_internal,
            attachments,
            created_at: now,
            is_read: true,
        };
        state.threads.entry(task_id).or_default().push(created.clone());
        Ok(created)
    }
}
