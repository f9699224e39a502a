//! Unit tests for the task board domain and services.

mod partition_tests;

use crate::task::domain::{Creator, Task, TaskId, TaskStatus, UserId};
use chrono::{DateTime, TimeZone, Utc};

pub(super) fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 14, 9, 30, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub(super) fn creator() -> Creator {
    Creator {
        id: UserId::new(1),
        name: "Dana".to_owned(),
        is_privileged: true,
    }
}

pub(super) fn task(id: i64, status: TaskStatus) -> Task {
    Task::new(
        TaskId::new(id),
        format!("Task {id}"),
        status,
        creator(),
        instant(),
    )
}
