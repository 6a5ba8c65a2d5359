//! Save/load persistence for growth progress
//!
//! Features:
//! - JSON record under a single fixed key
//! - Pluggable key-value backends (memory, file, LocalStorage)
//! - Best-effort saves: storage failures are logged, never fatal
//! - Corrupt or unreadable records load as "absent"

pub mod record;
pub mod storage;

pub use record::PersistedRecord;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, Storage};

use crate::sim::GrowthState;

/// Storage backend failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("value is not valid UTF-8")]
    NotUtf8,
}

/// Errors from saving or loading the growth record
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("could not encode growth record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("could not decode growth record: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid growth record: {0}")]
    InvalidRecord(String),
}

/// Reads and writes the growth record under a fixed key
pub struct PersistenceStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> PersistenceStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the record and flush immediately
    pub fn try_save(&mut self, record: &PersistedRecord) -> Result<(), PersistError> {
        let bytes = record.encode()?;
        self.storage.set(&self.key, &bytes)?;
        self.storage.flush()?;
        Ok(())
    }

    /// Best-effort save of the state's persisted fields. Returns whether the
    /// write went through.
    pub fn save(&mut self, state: &GrowthState) -> bool {
        match self.try_save(&PersistedRecord::capture(state)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Growth progress not saved: {}", e);
                false
            }
        }
    }

    /// Read the record. `Ok(None)` when nothing has been saved.
    pub fn try_load(&self) -> Result<Option<PersistedRecord>, PersistError> {
        match self.storage.get(&self.key)? {
            Some(bytes) => PersistedRecord::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Read the record, treating unavailable storage and corrupt data as absent
    pub fn load(&self) -> Option<PersistedRecord> {
        match self.try_load() {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Ignoring saved growth progress: {}", e);
                None
            }
        }
    }

    /// Delete the stored record
    pub fn try_reset(&mut self) -> Result<(), PersistError> {
        self.storage.delete(&self.key)?;
        self.storage.flush()?;
        Ok(())
    }

    /// Best-effort delete of the stored record
    pub fn reset(&mut self) -> bool {
        match self.try_reset() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not delete saved growth progress: {}", e);
                false
            }
        }
    }
}
