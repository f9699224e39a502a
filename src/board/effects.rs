//! Visual side-effect port.

use crate::task::domain::{Task, TaskId};
use std::sync::{PoisonError, RwLock};

/// Celebratory flourish fired when a task is dropped into the completed
/// column.
#[cfg_attr(test, mockall::automock)]
pub trait BoardEffects: Send + Sync {
    /// Plays the completion flourish for `task`.
    fn celebrate(&self, task: &Task);
}

/// Effects sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl BoardEffects for NoEffects {
    fn celebrate(&self, _task: &Task) {}
}

/// Effects sink that records which tasks were celebrated.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    celebrated: RwLock<Vec<TaskId>>,
}

impl RecordingEffects {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the celebrated task ids in firing order.
    #[must_use]
    pub fn celebrated(&self) -> Vec<TaskId> {
        self.celebrated
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BoardEffects for RecordingEffects {
    fn celebrate(&self, task: &Task) {
        self.celebrated
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task.id());
    }
}
