//! Then steps for task board BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskboard::{
    board::{BoardError, Severity},
    comment::services::CommentSubmitError,
    task::{
        domain::{Task, TaskId, TaskStatus},
        services::TransitionReport,
    },
};

fn status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[then("the celebration fired for task {id:i64}")]
fn celebration_fired(world: &BoardWorld, id: i64) -> Result<(), eyre::Report> {
    let celebrated = world.effects.celebrated();
    eyre::ensure!(
        celebrated == vec![TaskId::new(id)],
        "expected one celebration for task {id}, got {celebrated:?}"
    );
    Ok(())
}

#[then(r#"task {id:i64} heads the "{column}" column"#)]
fn task_heads_column(world: &BoardWorld, id: i64, column: String) -> Result<(), eyre::Report> {
    let head = world
        .board
        .board()
        .partitions()
        .partition(status(&column)?)
        .first()
        .map(Task::id);
    eyre::ensure!(
        head == Some(TaskId::new(id)),
        "expected task {id} at the head of {column}, found {head:?}"
    );
    eyre::ensure!(world.board.board().partitions().is_consistent());
    Ok(())
}

#[then(r#"the "{column}" column does not contain task {id:i64}"#)]
fn column_lacks_task(world: &BoardWorld, column: String, id: i64) -> Result<(), eyre::Report> {
    let present = world
        .board
        .board()
        .partitions()
        .partition(status(&column)?)
        .iter()
        .any(|task| task.id() == TaskId::new(id));
    eyre::ensure!(!present, "task {id} still in {column}");
    Ok(())
}

#[then(r#"the latest notification is a success saying "{message}""#)]
fn latest_success(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let latest = world
        .board
        .board()
        .notifications()
        .latest()
        .ok_or_else(|| eyre::eyre!("no notification raised"))?;
    eyre::ensure!(latest.severity == Severity::Success, "latest was {latest:?}");
    eyre::ensure!(latest.message == message, "latest was {latest:?}");
    Ok(())
}

#[then(r#"an error notification says "{message}""#)]
fn error_notification(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let errors: Vec<_> = world
        .board
        .board()
        .notifications()
        .all()
        .iter()
        .filter(|n| n.severity == Severity::Error)
        .map(|n| n.message.clone())
        .collect();
    eyre::ensure!(errors == vec![message], "error notifications were {errors:?}");
    Ok(())
}

#[then("no notification was raised")]
fn no_notification(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.board.board().notifications().is_empty());
    Ok(())
}

#[then("no countdown runs for task {id:i64}")]
fn no_countdown(world: &BoardWorld, id: i64) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.board.timers().is_running(TaskId::new(id)));
    Ok(())
}

#[then(r#"the comment text is still "{text}""#)]
fn comment_text_kept(world: &BoardWorld, text: String) -> Result<(), eyre::Report> {
    let body = world.board.thread().body();
    eyre::ensure!(body == text, "compose text was {body:?}");
    Ok(())
}

#[then("{count:usize} files are still staged")]
fn files_still_staged(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let staged = world.board.thread().staging().len();
    eyre::ensure!(staged == count, "expected {count} staged files, found {staged}");
    Ok(())
}

#[then("the compose state is empty")]
fn compose_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let thread = world.board.thread();
    eyre::ensure!(thread.body().is_empty());
    eyre::ensure!(!thread.is_internal());
    eyre::ensure!(thread.staging().is_empty());
    Ok(())
}

#[then("the backend submission count is {count:usize}")]
fn submission_count(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let received = world.comments.submissions().len();
    eyre::ensure!(received == count, "backend received {received} submissions");
    Ok(())
}

#[then("the thread length is {count:usize}")]
fn thread_length(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let shown = world.board.thread().comments().len();
    eyre::ensure!(shown == count, "thread shows {shown} comments");
    Ok(())
}

#[then("the last comment has {count:usize} attachments")]
fn last_comment_attachments(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let attached = world
        .board
        .thread()
        .comments()
        .last()
        .map(|comment| comment.attachments.len());
    eyre::ensure!(attached == Some(count), "last comment had {attached:?} attachments");
    Ok(())
}

#[then("the drop is reported as unchanged")]
fn drop_unchanged(world: &BoardWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition report"))?;
    eyre::ensure!(
        matches!(report, TransitionReport::Unchanged),
        "expected Unchanged, got {report:?}"
    );
    Ok(())
}

#[then("the submission is rejected as empty")]
fn submission_rejected_as_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_submit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(BoardError::Comment(CommentSubmitError::EmptyComment))
        ),
        "expected EmptyComment, got {result:?}"
    );
    Ok(())
}
