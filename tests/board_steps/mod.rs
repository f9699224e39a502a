//! Step definitions shared by the task board and comment thread scenarios.

mod given;
mod then;
mod when;
pub mod world;
