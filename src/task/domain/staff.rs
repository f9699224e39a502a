//! Staff roles and assignable executors.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Role of a staff member in the agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Manages projects and staff.
    Manager,
    /// Regular executor.
    Employee,
}

impl Role {
    /// Returns `true` for roles that may assign tasks to others and view
    /// other users' boards.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// Staff member eligible for task assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executor {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Staff role.
    pub role: Role,
    /// Whether the account is active.
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}
