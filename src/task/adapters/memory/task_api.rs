//! In-memory Task API for board tests and offline runs.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::remote::{RemoteError, RemoteResult};
use crate::task::{
    domain::{Assignee, Creator, NewTask, Task, TaskId, TaskStatus, TaskUpdate, UserId},
    ports::TaskApi,
};

/// Task API operation, used for failure injection and call accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// [`TaskApi::list_tasks`].
    List,
    /// [`TaskApi::get_task`].
    Get,
    /// [`TaskApi::create_task`].
    Create,
    /// [`TaskApi::update_task`].
    Update,
    /// [`TaskApi::delete_task`].
    Delete,
}

/// Thread-safe in-memory Task API.
///
/// Listing returns tasks newest first. Clones share the stored tasks; a
/// clone returned by [`InMemoryTaskApi::acting_as`] answers as that signed-in
/// user, so an unscoped listing returns only the tasks assigned to them.
/// Without a signed-in user an unscoped listing returns every task. Failures
/// queued with [`InMemoryTaskApi::fail_next`] are returned by the next
/// matching call without touching stored state.
#[derive(Clone)]
pub struct InMemoryTaskApi {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<dyn Clock>,
    acting_user: Option<Creator>,
}

impl fmt::Debug for InMemoryTaskApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskApi")
            .field("state", &self.state)
            .field("acting_user", &self.acting_user)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    next_id: i64,
    user_names: HashMap<UserId, String>,
    failures: HashMap<TaskOperation, VecDeque<RemoteError>>,
    calls: HashMap<TaskOperation, usize>,
}

impl InMemoryTaskState {
    fn allocate_id(&mut self) -> TaskId {
        let highest = self.tasks.iter().map(|task| task.id().value()).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest) + 1;
        TaskId::new(self.next_id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}

impl InMemoryTaskApi {
    /// Creates an empty API stamping timestamps from `clock`.
    #[must_use]
    pub fn new<C>(clock: Arc<C>) -> Self
    where
        C: Clock + 'static,
    {
        Self {
            state: Arc::default(),
            clock,
            acting_user: None,
        }
    }

    /// Creates an API pre-populated with `tasks`, listed in the given order.
    #[must_use]
    pub fn with_tasks<C>(clock: Arc<C>, tasks: impl IntoIterator<Item = Task>) -> Self
    where
        C: Clock + 'static,
    {
        let api = Self::new(clock);
        api.write().tasks = tasks.into_iter().collect();
        api
    }

    /// Returns a handle answering as the signed-in `user`.
    ///
    /// Unscoped listings return the user's own tasks and created tasks
    /// record the user as their creator.
    #[must_use]
    pub fn acting_as(self, user: Creator) -> Self {
        Self {
            acting_user: Some(user),
            ..self
        }
    }

    /// Registers a display name used when assigning tasks to `id`.
    pub fn register_user(&self, id: UserId, name: impl Into<String>) {
        self.write().user_names.insert(id, name.into());
    }

    /// Stores `task` directly, as if another client had changed it.
    pub fn put_task(&self, task: Task) {
        let mut state = self.write();
        match state.position(task.id()) {
            Some(index) => {
                if let Some(slot) = state.tasks.get_mut(index) {
                    *slot = task;
                }
            }
            None => state.tasks.insert(0, task),
        }
    }

    /// Returns the stored version of a task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.read().tasks.iter().find(|task| task.id() == id).cloned()
    }

    /// Queues a failure for the next call of `operation`.
    pub fn fail_next(&self, operation: TaskOperation, error: RemoteError) {
        self.write()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Returns how many times `operation` has been called.
    #[must_use]
    pub fn calls(&self, operation: TaskOperation) -> usize {
        self.read().calls.get(&operation).copied().unwrap_or(0)
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryTaskState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryTaskState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(
        &self,
        operation: TaskOperation,
    ) -> RemoteResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        let mut state = self.write();
        *state.calls.entry(operation).or_default() += 1;
        if let Some(error) = state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(state)
    }
}

fn not_found(id: TaskId) -> RemoteError {
    RemoteError::rejected(format!("Task {id} not found"))
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_tasks(&self, assignee: Option<UserId>) -> RemoteResult<Vec<Task>> {
        let scope = assignee.or_else(|| self.acting_user.as_ref().map(|user| user.id));
        let state = self.begin(TaskOperation::List)?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| scope.is_none_or(|user| task.is_assigned_to(user)))
            .cloned()
            .collect())
    }

    async fn get_task(&self, id: TaskId) -> RemoteResult<Task> {
        let state = self.begin(TaskOperation::Get)?;
        state
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create_task(&self, request: &NewTask) -> RemoteResult<Task> {
        let mut state = self.begin(TaskOperation::Create)?;
        let id = state.allocate_id();
        let creator = self.acting_user.clone().unwrap_or_else(|| Creator {
            id: UserId::new(0),
            name: "system".to_owned(),
            is_privileged: true,
        });
        let mut task = Task::new(
            id,
            request.title(),
            TaskStatus::Pending,
            creator,
            self.clock.utc(),
        )
        .with_priority(request.priority());
        if let Some(description) = request.description() {
            task = task.with_description(description);
        }
        if let Some(deadline) = request.deadline() {
            task = task.with_deadline(deadline);
        }
        if let Some(assignee_id) = request.assignee_id() {
            let name = state
                .user_names
                .get(&assignee_id)
                .cloned()
                .unwrap_or_else(|| format!("User {assignee_id}"));
            task = task.with_assignee(Assignee {
                id: assignee_id,
                name,
            });
        }
        state.tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> RemoteResult<Task> {
        let mut state = self.begin(TaskOperation::Update)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| not_found(id))?;
        task.apply(update, self.clock.utc());
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> RemoteResult<()> {
        let mut state = self.begin(TaskOperation::Delete)?;
        let index = state.position(id).ok_or_else(|| not_found(id))?;
        state.tasks.remove(index);
        Ok(())
    }
}
