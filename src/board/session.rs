//! Signed-in user context.

use crate::task::domain::{Role, UserId};
use serde::{Deserialize, Serialize};

/// The signed-in user the board is rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// User identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Staff role.
    pub role: Role,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(user_id: UserId, name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            name: name.into(),
            role,
        }
    }

    /// Returns `true` when the user may assign tasks to others and view
    /// other users' boards.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}
