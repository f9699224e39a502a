//! In-memory executor directory.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use crate::remote::{RemoteError, RemoteResult};
use crate::task::{domain::Executor, ports::ExecutorDirectory};

/// Fixed executor directory. Inactive entries are filtered out on listing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutorDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    executors: Vec<Executor>,
    failure: Option<RemoteError>,
}

impl InMemoryExecutorDirectory {
    /// Creates a directory listing `executors`.
    #[must_use]
    pub fn new(executors: impl IntoIterator<Item = Executor>) -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState {
                executors: executors.into_iter().collect(),
                failure: None,
            })),
        }
    }

    /// Makes the next listing fail with `error`.
    pub fn fail_next(&self, error: RemoteError) {
        self.write().failure = Some(error);
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ExecutorDirectory for InMemoryExecutorDirectory {
    async fn list_executors(&self) -> RemoteResult<Vec<Executor>> {
        let mut state = self.write();
        if let Some(error) = state.failure.take() {
            return Err(error);
        }
        Ok(state
            .executors
            .iter()
            .filter(|executor| executor.is_active)
            .cloned()
            .collect())
    }
}
