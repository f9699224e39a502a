//! Domain model for the personal task board.
//!
//! Tasks are owned by the backend; the board holds a status-keyed projection
//! of them in [`TaskPartitions`] and never invents tasks locally.

mod error;
mod ids;
mod partitions;
mod staff;
mod status;
mod task;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, UserId};
pub use partitions::TaskPartitions;
pub use staff::{Executor, Role};
pub use status::{Priority, TaskStatus};
pub use task::{Assignee, Creator, NewTask, Progress, ProjectRef, Task, TaskUpdate};
