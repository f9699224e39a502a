//! Comment records and the outgoing submission payload.

use crate::attachment::{AttachmentDescriptor, LocalFile};
use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wraps a backend identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    /// User identifier.
    pub id: UserId,
    /// Display name, when the backend includes it.
    #[serde(default)]
    pub name: Option<String>,
}

/// Comment on a task. Comments are append-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Author.
    #[serde(alias = "user")]
    pub author: CommentAuthor,
    /// Body text, possibly empty when only files were attached.
    #[serde(default, alias = "text")]
    pub body: String,
    /// Whether the comment is visible to staff only.
    #[serde(default)]
    pub is_internal: bool,
    /// Uploaded attachments in upload order.
    #[serde(default)]
    pub attachments: Vec<AttachmentDescriptor>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether the signed-in user has read the comment.
    #[serde(default)]
    pub is_read: bool,
}

/// Outgoing comment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Body text, already trimmed.
    pub body: String,
    /// Whether the comment is visible to staff only.
    pub is_internal: bool,
    /// Files uploaded with the comment.
    pub files: Vec<LocalFile>,
}

impl NewComment {
    /// Returns `true` when there is neither text nor a file to submit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty() && self.files.is_empty()
    }
}
