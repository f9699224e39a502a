//! In-memory integration tests for comment threads driven by the board.

use super::helpers::{Backend, executor};
use rstest::{fixture, rstest};
use taskboard::{
    attachment::{AttachmentKind, LocalFile},
    board::BoardError,
    comment::{
        adapters::memory::CommentOperation,
        services::{COMMENT_FAILED_MESSAGE, CommentSubmitError},
    },
    config::BoardConfig,
    remote::RemoteError,
    task::domain::TaskId,
};

#[fixture]
fn backend() -> Backend {
    Backend::seeded()
}

fn pdf(name: &str) -> LocalFile {
    LocalFile::new(name, "application/pdf", vec![0_u8; 512])
}

fn png(name: &str) -> LocalFile {
    LocalFile::new(name, "image/png", vec![0_u8; 128])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_attachments_are_classified_by_filename(backend: Backend) {
    let mut board = backend.board(executor(), BoardConfig::default());
    board.mount().await;
    board.open_task(TaskId::new(4)).await;

    let thread = board.thread_mut();
    thread.set_body("Signed contract and screenshot");
    thread.stage_files([pdf("contract.pdf"), png("screen.png")]);
    assert_eq!(backend.previews.live(), 1);

    let comment = board.submit_comment().await.expect("comment accepted");

    let kinds: Vec<_> = comment.attachments.iter().map(|a| a.kind()).collect();
    assert_eq!(kinds, vec![AttachmentKind::File, AttachmentKind::Image]);
    assert_eq!(backend.previews.live(), 0);
    assert_eq!(backend.previews.revoked(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_comment_can_be_resubmitted_explicitly(backend: Backend) {
    let mut board = backend.board(executor(), BoardConfig::default());
    board.mount().await;
    board.open_task(TaskId::new(4)).await;
    board.thread_mut().set_body("Retry me");
    backend.comments.fail_next(
        CommentOperation::Create,
        RemoteError::Rejected { message: None },
    );

    let first = board.submit_comment().await;
    assert!(matches!(
        first,
        Err(BoardError::Comment(CommentSubmitError::Remote(_)))
    ));
    assert_eq!(
        board
            .board()
            .notifications()
            .latest()
            .map(|n| n.message.as_str()),
        Some(COMMENT_FAILED_MESSAGE)
    );
    assert_eq!(backend.comments.submissions().len(), 1);
    assert_eq!(board.thread().body(), "Retry me");

    board.submit_comment().await.expect("second attempt accepted");

    assert_eq!(backend.comments.submissions().len(), 2);
    assert_eq!(board.thread().comments().len(), 1);
    assert_eq!(backend.comments.calls(CommentOperation::Create), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_the_open_task_closes_its_thread(backend: Backend) {
    let mut board = backend.board(executor(), BoardConfig::default());
    board.mount().await;
    board.open_task(TaskId::new(4)).await;
    board.thread_mut().stage_files([png("draft.png")]);

    board
        .delete_task(TaskId::new(4))
        .await
        .expect("delete confirmed");

    assert!(board.thread().active_task().is_none());
    assert_eq!(backend.previews.live(), 0);
}
