//! Deadline countdowns for visible tasks.
//!
//! [`countdown`] is a pure projection of a deadline at one instant.
//! [`DeadlineTimers`] keeps one refreshing countdown per visible task.

mod countdown;
mod registry;

pub use countdown::{Countdown, OVERDUE_LABEL, UrgencyTier, countdown};
pub use registry::DeadlineTimers;
