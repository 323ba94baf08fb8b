//! State storage trait.

use voyager_types::SnapState;

use crate::StoreError;

/// Access to the persisted snap state.
///
/// `write` is an additive merge (see [`SnapState::merge`]), never a
/// replacement. Read-then-write is not atomic across callers: two concurrent
/// refreshes may overwrite each other's merged fields.
pub trait StateStore: Send + Sync {
    /// Current snapshot; an empty state when nothing was ever written.
    fn read(&self) -> Result<SnapState, StoreError>;

    /// Merge `patch` into the stored state.
    fn write(&self, patch: SnapState) -> Result<(), StoreError>;
}
