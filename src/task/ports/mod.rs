//! Port contracts for the task board.
//!
//! Ports define backend-agnostic interfaces used by task services.

pub mod executor;
pub mod task_api;

pub use executor::ExecutorDirectory;
pub use task_api::TaskApi;
