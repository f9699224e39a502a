//! In-memory integration tests for board-level flows.

use super::helpers::{Backend, EXECUTOR, MANAGER, manager, start, task_for};
use chrono::TimeDelta;
use rstest::{fixture, rstest};
use taskboard::{
    config::BoardConfig,
    deadline::UrgencyTier,
    task::{
        adapters::memory::TaskOperation,
        domain::{NewTask, TaskId, TaskStatus},
        services::TransitionReport,
    },
};

#[fixture]
fn backend() -> Backend {
    Backend::seeded()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_board_lists_own_tasks_and_active_executors(backend: Backend) {
    let mut board = backend.board(manager(), BoardConfig::default());

    let loaded = board.mount().await;

    assert_eq!(loaded, Some(3));
    assert!(!board.board().partitions().contains(TaskId::new(4)));
    let executor_ids: Vec<_> = board.board().executors().iter().map(|e| e.id).collect();
    assert_eq!(executor_ids, vec![EXECUTOR]);
    assert!(board.board().partitions().is_consistent());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn countdowns_follow_visible_open_tasks(backend: Backend) {
    let mut board = backend.board(manager(), BoardConfig::default());
    board.mount().await;

    let timers = board.timers();
    assert_eq!(timers.len(), 2);
    assert_eq!(
        timers.current(TaskId::new(1)).map(|c| c.tier),
        Some(UrgencyTier::Critical)
    );
    assert_eq!(
        timers.current(TaskId::new(2)).map(|c| c.label),
        Some("2d 0h".to_owned())
    );
    assert!(!timers.is_running(TaskId::new(3)));
    assert!(!timers.is_running(TaskId::new(4)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn viewing_another_board_scopes_tasks_and_timers(backend: Backend) {
    let mut board = backend.board(manager(), BoardConfig::default());
    board.mount().await;

    let loaded = board
        .view_as(Some(EXECUTOR))
        .await
        .expect("managers may view other boards");

    assert_eq!(loaded, Some(1));
    assert_eq!(board.timers().len(), 1);
    assert!(board.timers().is_running(TaskId::new(4)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_for_viewed_user_appears_at_the_head(backend: Backend) {
    let mut board = backend.board(manager(), BoardConfig::default());
    board.mount().await;
    board
        .view_as(Some(EXECUTOR))
        .await
        .expect("managers may view other boards");

    let request = NewTask::new("Prepare hosting renewal")
        .expect("valid title")
        .with_assignee(EXECUTOR)
        .with_deadline(start() + TimeDelta::hours(8));
    let created = board.create_task(request).await.expect("task created");

    let pending = board.board().partitions().partition(TaskStatus::Pending);
    assert_eq!(pending.first().map(|task| task.id()), Some(created.id()));
    assert_eq!(
        created.assignee().map(|assignee| assignee.name.as_str()),
        Some("Rui")
    );
    assert!(board.timers().is_running(created.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_is_replaced_by_server_state(backend: Backend) {
    let mut board = backend.board(manager(), BoardConfig::default());
    board.mount().await;
    backend
        .tasks
        .put_task(task_for(1, TaskStatus::Completed, MANAGER));
    backend.tasks.fail_next(
        TaskOperation::Update,
        taskboard::remote::RemoteError::Timeout,
    );

    let report = board
        .request_transition(TaskId::new(1), TaskStatus::InProgress)
        .await;

    assert!(matches!(report, TransitionReport::Reconciled { .. }));
    assert_eq!(
        board.board().partitions().status_of(TaskId::new(1)),
        Some(TaskStatus::Completed)
    );
    assert!(!board.timers().is_running(TaskId::new(1)));
    assert!(backend.effects.celebrated().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn periodic_reload_picks_up_remote_changes(backend: Backend) {
    let mut board = backend.board(
        manager(),
        BoardConfig::default().with_reload_interval(std::time::Duration::from_secs(10)),
    );
    board.mount().await;
    backend
        .tasks
        .put_task(task_for(9, TaskStatus::Pending, MANAGER));

    backend.clock.advance(TimeDelta::seconds(9));
    assert!(!board.tick().await);
    assert!(!board.board().partitions().contains(TaskId::new(9)));

    backend.clock.advance(TimeDelta::seconds(1));
    assert!(board.tick().await);
    assert!(board.board().partitions().contains(TaskId::new(9)));
    assert_eq!(board.board().last_reload_at(), Some(start() + TimeDelta::seconds(10)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_periodic_reload_keeps_the_board(backend: Backend) {
    let mut board = backend.board(manager(), BoardConfig::default());
    board.mount().await;
    let before = board.board().partitions().clone();
    backend.tasks.fail_next(
        TaskOperation::List,
        taskboard::remote::RemoteError::rejected("Maintenance window"),
    );

    backend.clock.advance(TimeDelta::seconds(30));
    board.tick().await;

    assert_eq!(board.board().partitions(), &before);
    assert_eq!(
        board
            .board()
            .notifications()
            .latest()
            .map(|n| n.message.as_str()),
        Some("Maintenance window")
    );
}
