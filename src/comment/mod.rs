//! Task comment threads.
//!
//! Comments are loaded per task and appended through the backend; the client
//! never edits or deletes them. Outgoing comments carry files staged in an
//! [`AttachmentStaging`](crate::attachment::AttachmentStaging) area.

pub mod adapters;
mod domain;
mod ports;
pub mod services;

pub use domain::{Comment, CommentAuthor, CommentId, NewComment};
pub use ports::CommentApi;

#[cfg(test)]
mod tests;
