//! Task API port: the backend's task endpoints.

use crate::remote::RemoteResult;
use crate::task::domain::{NewTask, Task, TaskId, TaskUpdate, UserId};
use async_trait::async_trait;

/// Backend contract for reading and mutating tasks.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists tasks, optionally restricted to one assignee.
    async fn list_tasks(&self, assignee: Option<UserId>) -> RemoteResult<Vec<Task>>;

    /// Fetches a single task.
    async fn get_task(&self, id: TaskId) -> RemoteResult<Task>;

    /// Creates a task and returns the stored record.
    async fn create_task(&self, task: &NewTask) -> RemoteResult<Task>;

    /// Applies a partial update and returns the stored record.
    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> RemoteResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: TaskId) -> RemoteResult<()>;
}
