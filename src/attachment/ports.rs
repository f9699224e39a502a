//! Preview resource port.

use super::LocalFile;
use uuid::Uuid;

/// Handle to a preview resource allocated for a staged image.
///
/// Handles are not `Clone`: releasing one consumes it, so a preview cannot
/// be released twice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PreviewHandle(Uuid);

impl PreviewHandle {
    /// Allocates a fresh handle identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for PreviewHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage for local preview resources of staged images.
#[cfg_attr(test, mockall::automock)]
pub trait PreviewStore: Send + Sync {
    /// Allocates a preview for `file`.
    fn create(&self, file: &LocalFile) -> PreviewHandle;

    /// Releases a preview.
    fn revoke(&self, handle: PreviewHandle);
}
