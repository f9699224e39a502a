//! In-memory adapters for the task ports.

mod executors;
mod task_api;

pub use executors::InMemoryExecutorDirectory;
pub use task_api::{InMemoryTaskApi, TaskOperation};
