//! JSON-file backed state store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use voyager_types::SnapState;

use crate::{StateStore, StoreError};

/// Keeps the snap state as one JSON document on disk.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash never leaves a half-written state behind.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SnapState, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(SnapState::default()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Corruption(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SnapState::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, state: &SnapState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn read(&self) -> Result<SnapState, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Backend("state lock poisoned".into()))?;
        self.load()
    }

    fn write(&self, patch: SnapState) -> Result<(), StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Backend("state lock poisoned".into()))?;
        let mut state = self.load()?;
        state.merge(patch);
        self.persist(&state)?;
        tracing::debug!(path = %self.path.display(), "snap state written");
        Ok(())
    }
}
