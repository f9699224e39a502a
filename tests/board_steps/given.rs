//! Given steps for task board BDD scenarios.

use super::world::{BoardWorld, OWNER, UPLOAD_TIMEOUT, run_async};
use chrono::TimeDelta;
use mockable::Clock;
use std::time::Duration;
use taskboard::{
    attachment::LocalFile,
    remote::RemoteError,
    task::{
        adapters::memory::TaskOperation,
        domain::{Assignee, Creator, Task, TaskId, TaskStatus},
    },
};
use rstest_bdd_macros::given;

#[given(r#"a board with task {id:i64} "{title}" pending and due in {hours:i64} hours"#)]
fn board_with_pending_task(
    world: &mut BoardWorld,
    id: i64,
    title: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    let now = world.clock.utc();
    let creator = Creator {
        id: OWNER,
        name: "Dana".to_owned(),
        is_privileged: false,
    };
    world.tasks.put_task(
        Task::new(TaskId::new(id), title, TaskStatus::Pending, creator, now)
            .with_assignee(Assignee {
                id: OWNER,
                name: "Dana".to_owned(),
            })
            .with_deadline(now + TimeDelta::hours(hours)),
    );
    let loaded = run_async(world.board.mount());
    eyre::ensure!(loaded == Some(1), "board failed to load: {loaded:?}");
    Ok(())
}

#[given(r#"the server will reject the next status update with "{message}""#)]
fn server_rejects_next_update(world: &mut BoardWorld, message: String) {
    world
        .tasks
        .fail_next(TaskOperation::Update, RemoteError::rejected(message));
}

#[given("another client has completed task {id:i64}")]
fn another_client_completed(world: &mut BoardWorld, id: i64) -> Result<(), eyre::Report> {
    let mut task = world
        .tasks
        .task(TaskId::new(id))
        .ok_or_else(|| eyre::eyre!("task {id} missing from backend"))?;
    task.set_status(TaskStatus::Completed, world.clock.utc());
    world.tasks.put_task(task);
    Ok(())
}

#[given("the comment thread of task {id:i64} is open")]
fn comment_thread_open(world: &mut BoardWorld, id: i64) -> Result<(), eyre::Report> {
    let loaded = run_async(world.board.open_task(TaskId::new(id)));
    eyre::ensure!(loaded.is_some(), "thread failed to load");
    Ok(())
}

#[given(r#"the comment text is "{text}""#)]
fn comment_text(world: &mut BoardWorld, text: String) {
    world.board.thread_mut().set_body(text);
}

#[given("{count:usize} image files are staged")]
fn image_files_staged(world: &mut BoardWorld, count: usize) {
    let files = (1..=count)
        .map(|n| LocalFile::new(format!("asset-{n}.png"), "image/png", vec![0_u8; 256]));
    world.board.thread_mut().stage_files(files);
}

#[given("uploads take longer than the upload timeout")]
fn uploads_are_slow(world: &mut BoardWorld) {
    world
        .comments
        .delay_creates(UPLOAD_TIMEOUT + Duration::from_millis(500));
}
