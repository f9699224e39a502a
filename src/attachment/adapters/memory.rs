//! In-memory preview store.

use crate::attachment::{LocalFile, PreviewHandle, PreviewStore};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Preview store that keeps previews in a map and counts allocations.
///
/// Clones share state, so a test can inspect the store after handing a
/// clone to the staging area.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreviewStore {
    state: Arc<RwLock<PreviewState>>,
}

#[derive(Debug, Default)]
struct PreviewState {
    live: HashMap<Uuid, String>,
    created: usize,
    revoked: usize,
}

impl InMemoryPreviewStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many previews are currently allocated.
    #[must_use]
    pub fn live(&self) -> usize {
        self.read(|state| state.live.len())
    }

    /// Returns how many previews were ever created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.read(|state| state.created)
    }

    /// Returns how many previews were released.
    #[must_use]
    pub fn revoked(&self) -> usize {
        self.read(|state| state.revoked)
    }

    /// Returns the filename a live preview was allocated for.
    #[must_use]
    pub fn file_name(&self, handle: &PreviewHandle) -> Option<String> {
        self.read(|state| state.live.get(&handle.id()).cloned())
    }

    fn read<T>(&self, f: impl FnOnce(&PreviewState) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl PreviewStore for InMemoryPreviewStore {
    fn create(&self, file: &LocalFile) -> PreviewHandle {
        let handle = PreviewHandle::new();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.live.insert(handle.id(), file.name().to_owned());
        state.created += 1;
        handle
    }

    fn revoke(&self, handle: PreviewHandle) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.live.remove(&handle.id()).is_some() {
            state.revoked += 1;
        } else {
            tracing::warn!(preview = %handle.id(), "revoke of unknown preview");
        }
    }
}
