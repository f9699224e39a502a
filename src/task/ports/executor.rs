//! Executor directory port.

use crate::remote::RemoteResult;
use crate::task::domain::Executor;
use async_trait::async_trait;

/// Backend contract for listing staff that tasks can be assigned to.
#[async_trait]
pub trait ExecutorDirectory: Send + Sync {
    /// Lists active staff in assignable roles.
    async fn list_executors(&self) -> RemoteResult<Vec<Executor>>;
}
