//! When steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::{TaskId, TaskStatus};

#[when(r#"task {id:i64} is dragged to "{status}""#)]
fn drag_task(world: &mut BoardWorld, id: i64, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let report = run_async(world.board.request_transition(TaskId::new(id), target));
    world.last_report = Some(report);
    Ok(())
}

#[when("the comment is submitted")]
fn submit_comment(world: &mut BoardWorld) {
    let result = run_async(world.board.submit_comment());
    world.last_submit = Some(result);
}
