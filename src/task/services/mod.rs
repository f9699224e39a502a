//! Application services for the task board.

mod loader;
mod transition;

pub use loader::TaskLoader;
pub use transition::{
    PendingTransition, TransitionCoordinator, TransitionOutcome, TransitionReport,
    TransitionSender, TransitionStart,
};
