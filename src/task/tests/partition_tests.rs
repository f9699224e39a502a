//! Tests for the status-keyed task partitions.

use super::{instant, task};
use crate::task::domain::{TaskId, TaskPartitions, TaskStatus};
use rstest::{fixture, rstest};

#[fixture]
fn board() -> TaskPartitions {
    TaskPartitions::from_tasks([
        task(1, TaskStatus::Pending),
        task(2, TaskStatus::Pending),
        task(3, TaskStatus::InProgress),
        task(4, TaskStatus::Completed),
    ])
}

fn ids(partitions: &TaskPartitions, status: TaskStatus) -> Vec<i64> {
    partitions
        .partition(status)
        .iter()
        .map(|task| task.id().value())
        .collect()
}

#[rstest]
fn full_load_keeps_server_order(board: TaskPartitions) {
    assert_eq!(ids(&board, TaskStatus::Pending), vec![1, 2]);
    assert_eq!(ids(&board, TaskStatus::InProgress), vec![3]);
    assert_eq!(ids(&board, TaskStatus::Completed), vec![4]);
    assert!(board.is_consistent());
}

#[test]
fn duplicate_ids_in_a_listing_keep_the_first_entry() {
    let board = TaskPartitions::from_tasks([
        task(1, TaskStatus::Pending),
        task(1, TaskStatus::Completed),
    ]);
    assert_eq!(board.len(), 1);
    assert_eq!(board.status_of(TaskId::new(1)), Some(TaskStatus::Pending));
}

#[rstest]
fn move_prepends_to_target_and_returns_snapshot(mut board: TaskPartitions) {
    let snapshot = board.move_to(TaskId::new(2), TaskStatus::InProgress, instant());

    assert_eq!(
        snapshot.map(|task| task.status()),
        Some(TaskStatus::Pending)
    );
    assert_eq!(ids(&board, TaskStatus::Pending), vec![1]);
    assert_eq!(ids(&board, TaskStatus::InProgress), vec![2, 3]);
    assert!(board.is_consistent());
}

#[rstest]
fn move_of_unknown_task_changes_nothing(mut board: TaskPartitions) {
    let before = board.clone();
    assert!(board.move_to(TaskId::new(99), TaskStatus::Completed, instant()).is_none());
    assert_eq!(board, before);
}

#[rstest]
#[case(1, TaskStatus::Completed)]
#[case(3, TaskStatus::Pending)]
#[case(4, TaskStatus::InProgress)]
fn every_move_preserves_the_partition_invariant(
    mut board: TaskPartitions,
    #[case] id: i64,
    #[case] target: TaskStatus,
) {
    let before = board.ids();
    board.move_to(TaskId::new(id), target, instant());

    assert!(board.is_consistent());
    assert_eq!(board.ids(), before);
    assert_eq!(board.status_of(TaskId::new(id)), Some(target));
}

#[rstest]
fn replace_keeps_position_when_status_is_unchanged(mut board: TaskPartitions) {
    let renamed = task(2, TaskStatus::Pending).with_description("edited");
    board.replace(renamed);

    assert_eq!(ids(&board, TaskStatus::Pending), vec![1, 2]);
    assert_eq!(
        board.find(TaskId::new(2)).and_then(|task| task.description()),
        Some("edited")
    );
}

#[rstest]
fn replace_moves_task_whose_status_changed(mut board: TaskPartitions) {
    board.replace(task(1, TaskStatus::Completed));

    assert_eq!(ids(&board, TaskStatus::Pending), vec![2]);
    assert_eq!(ids(&board, TaskStatus::Completed), vec![1, 4]);
    assert!(board.is_consistent());
}

#[rstest]
fn remove_and_prepend(mut board: TaskPartitions) {
    assert!(board.remove(TaskId::new(3)).is_some());
    assert!(board.remove(TaskId::new(3)).is_none());

    board.prepend(task(5, TaskStatus::Pending));
    assert_eq!(ids(&board, TaskStatus::Pending), vec![5, 1, 2]);
    assert_eq!(board.len(), 4);
}
