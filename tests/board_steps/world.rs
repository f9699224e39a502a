//! Shared world state for task board BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use taskboard::{
    attachment::adapters::memory::InMemoryPreviewStore,
    board::{BoardController, BoardPorts, BoardResult, RecordingEffects, Session},
    clock::ManualClock,
    comment::{Comment, adapters::memory::InMemoryCommentApi},
    config::BoardConfig,
    task::{
        adapters::memory::{InMemoryExecutorDirectory, InMemoryTaskApi},
        domain::{Creator, Role, UserId},
        services::TransitionReport,
    },
};

/// Board controller type used by the BDD world.
pub type TestBoard = BoardController<
    InMemoryTaskApi,
    InMemoryExecutorDirectory,
    InMemoryCommentApi,
    InMemoryPreviewStore,
    RecordingEffects,
    ManualClock,
>;

/// Upload timeout short enough to exercise in real time.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_millis(50);

/// Signed-in user of every scenario.
pub const OWNER: UserId = UserId::new(1);

/// Scenario world for task board behaviour tests.
pub struct BoardWorld {
    pub tasks: InMemoryTaskApi,
    pub comments: InMemoryCommentApi,
    pub effects: Arc<RecordingEffects>,
    pub clock: ManualClock,
    pub board: TestBoard,
    pub last_report: Option<TransitionReport>,
    pub last_submit: Option<BoardResult<Comment>>,
}

impl BoardWorld {
    /// Creates a world with an empty backend and an unmounted board.
    #[must_use]
    pub fn new() -> Self {
        let clock = ManualClock::new(start_instant());
        let tasks = InMemoryTaskApi::new(Arc::new(clock.clone()));
        let comments = InMemoryCommentApi::new(Arc::new(clock.clone()));
        let effects = Arc::new(RecordingEffects::new());
        let board = BoardController::new(
            Session::new(OWNER, "Dana", Role::Employee),
            BoardConfig::default().with_upload_timeout(UPLOAD_TIMEOUT),
            BoardPorts {
                tasks: Arc::new(tasks.clone().acting_as(Creator {
                    id: OWNER,
                    name: "Dana".to_owned(),
                    is_privileged: false,
                })),
                executors: Arc::new(InMemoryExecutorDirectory::default()),
                comments: Arc::new(comments.clone()),
                previews: Arc::new(InMemoryPreviewStore::new()),
                effects: Arc::clone(&effects),
            },
            Arc::new(clock.clone()),
        );

        Self {
            tasks,
            comments,
            effects,
            clock,
            board,
            last_report: None,
            last_submit: None,
        }
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 14, 9, 30, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
