//! Nullable state store: in-memory snap state.

use std::sync::Mutex;
use voyager_store::{StateStore, StoreError};
use voyager_types::SnapState;

/// In-memory [`StateStore`] that counts writes.
#[derive(Default)]
pub struct NullStateStore {
    state: Mutex<SnapState>,
    writes: Mutex<usize>,
}

impl NullStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `state`.
    pub fn with_state(state: SnapState) -> Self {
        Self {
            state: Mutex::new(state),
            writes: Mutex::new(0),
        }
    }

    pub fn snapshot(&self) -> SnapState {
        self.state.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl StateStore for NullStateStore {
    fn read(&self) -> Result<SnapState, StoreError> {
        Ok(self.snapshot())
    }

    fn write(&self, patch: SnapState) -> Result<(), StoreError> {
        self.state.lock().unwrap().merge(patch);
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}
