//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::sync::Arc;
use taskboard::{
    attachment::adapters::memory::InMemoryPreviewStore,
    board::{BoardController, BoardPorts, RecordingEffects, Session},
    clock::ManualClock,
    comment::adapters::memory::InMemoryCommentApi,
    config::BoardConfig,
    task::{
        adapters::memory::{InMemoryExecutorDirectory, InMemoryTaskApi},
        domain::{Assignee, Creator, Executor, Priority, Role, Task, TaskId, TaskStatus, UserId},
    },
};

/// Board controller wired to in-memory adapters.
pub type TestBoard = BoardController<
    InMemoryTaskApi,
    InMemoryExecutorDirectory,
    InMemoryCommentApi,
    InMemoryPreviewStore,
    RecordingEffects,
    ManualClock,
>;

/// Signed-in manager.
pub const MANAGER: UserId = UserId::new(1);
/// Regular executor.
pub const EXECUTOR: UserId = UserId::new(2);

/// Start instant of every test clock.
#[must_use]
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 14, 9, 30, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Builds a task assigned to `user`.
#[must_use]
pub fn task_for(id: i64, status: TaskStatus, user: UserId) -> Task {
    Task::new(
        TaskId::new(id),
        format!("Task {id}"),
        status,
        Creator {
            id: MANAGER,
            name: "Dana".to_owned(),
            is_privileged: true,
        },
        start(),
    )
    .with_assignee(Assignee {
        id: user,
        name: format!("User {user}"),
    })
}

/// Handles to every collaborator behind a [`TestBoard`].
pub struct Backend {
    pub tasks: InMemoryTaskApi,
    pub comments: InMemoryCommentApi,
    pub previews: InMemoryPreviewStore,
    pub effects: Arc<RecordingEffects>,
    pub clock: ManualClock,
}

impl Backend {
    /// Creates a backend seeded with a small agency workload.
    #[must_use]
    pub fn seeded() -> Self {
        let clock = ManualClock::new(start());
        let tasks = InMemoryTaskApi::with_tasks(
            Arc::new(clock.clone()),
            [
                task_for(1, TaskStatus::Pending, MANAGER)
                    .with_priority(Priority::Urgent)
                    .with_deadline(start() + TimeDelta::minutes(45)),
                task_for(2, TaskStatus::InProgress, MANAGER)
                    .with_deadline(start() + TimeDelta::days(2)),
                task_for(3, TaskStatus::Completed, MANAGER),
                task_for(4, TaskStatus::Pending, EXECUTOR)
                    .with_deadline(start() + TimeDelta::hours(5)),
            ],
        );
        tasks.register_user(EXECUTOR, "Rui");
        Self {
            tasks,
            comments: InMemoryCommentApi::new(Arc::new(clock.clone())),
            previews: InMemoryPreviewStore::new(),
            effects: Arc::new(RecordingEffects::new()),
            clock,
        }
    }

    /// Builds a board for `session` over this backend.
    #[must_use]
    pub fn board(&self, session: Session, config: BoardConfig) -> TestBoard {
        let signed_in = Creator {
            id: session.user_id,
            name: session.name.clone(),
            is_privileged: session.is_privileged(),
        };
        BoardController::new(
            session,
            config,
            BoardPorts {
                tasks: Arc::new(self.tasks.clone().acting_as(signed_in)),
                executors: Arc::new(InMemoryExecutorDirectory::new([
                    Executor {
                        id: EXECUTOR,
                        name: "Rui".to_owned(),
                        role: Role::Employee,
                        is_active: true,
                    },
                    Executor {
                        id: UserId::new(3),
                        name: "Former".to_owned(),
                        role: Role::Employee,
                        is_active: false,
                    },
                ])),
                comments: Arc::new(self.comments.clone()),
                previews: Arc::new(self.previews.clone()),
                effects: Arc::clone(&self.effects),
            },
            Arc::new(self.clock.clone()),
        )
    }
}

/// Session of the signed-in manager.
#[must_use]
pub fn manager() -> Session {
    Session::new(MANAGER, "Dana", Role::Manager)
}

/// Session of the executor.
#[must_use]
pub fn executor() -> Session {
    Session::new(EXECUTOR, "Rui", Role::Employee)
}
