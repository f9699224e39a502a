//! Board context, notifications and the controller that drives them.
//!
//! A [`BoardController`] owns one [`TaskBoard`] and every collaborator that
//! mutates it. There is no shared board instance; views read the context
//! through the controller.

mod context;
mod controller;
mod effects;
mod error;
mod notification;
mod session;

pub use context::TaskBoard;
pub use controller::{BoardController, BoardPorts};
#[cfg(test)]
pub use effects::MockBoardEffects;
pub use effects::{BoardEffects, NoEffects, RecordingEffects};
pub use error::{BoardError, BoardResult};
pub use notification::{Notification, NotificationCenter, NotificationId, NotificationTtl, Severity};
pub use session::Session;

#[cfg(test)]
mod tests;
