//! Persistence adapters
//!
//! The store serializes exactly `{documents, aiHistory}` after every
//! mutation and rehydrates the same pair at startup; everything else
//! (current document id, selection, editing flag, last error) is
//! session-local and never written.
//!
//! [`FileAdapter`] keeps the blob as pretty JSON and uses atomic
//! writes (write to temp file, then rename) to prevent corruption.
//! [`MemoryAdapter`] is an in-memory fake for tests, with a toggle to
//! simulate save failures.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{ChatMessage, Document};
use crate::storage::error::{StorageError, StorageResult};

/// The persisted subset of store state
///
/// Field names follow the on-disk JSON shape (`aiHistory`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    pub documents: Vec<Document>,
    #[serde(rename = "aiHistory", default)]
    pub chat_history: Vec<ChatMessage>,
}

/// Opaque blob storage for the document store
///
/// `load` runs once at startup; `save` runs after every mutation and
/// is best-effort from the store's perspective (a failure is surfaced,
/// never rolled back).
pub trait PersistenceAdapter {
    /// Load previously persisted state
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> StorageResult<Option<PersistedState>>;

    /// Persist the current state
    fn save(&self, state: &PersistedState) -> StorageResult<()>;
}

// Lets tests hand the store a shared handle and still inspect saves.
impl<T: PersistenceAdapter + ?Sized> PersistenceAdapter for std::sync::Arc<T> {
    fn load(&self) -> StorageResult<Option<PersistedState>> {
        (**self).load()
    }

    fn save(&self, state: &PersistedState) -> StorageResult<()> {
        (**self).save(state)
    }
}

/// File-backed adapter storing state as pretty JSON
pub struct FileAdapter {
    path: PathBuf,
}

impl FileAdapter {
    /// Create an adapter storing at the configured location
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.store_path(),
        }
    }

    /// Create an adapter storing at a specific path (tests)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this adapter reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for FileAdapter {
    fn load(&self) -> StorageResult<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        let state = serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidFormat {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(Some(state))
    }

    fn save(&self, state: &PersistedState) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(state).map_err(StorageError::Serialize)?;
        atomic_write(&self.path, &bytes)
    }
}

/// In-memory adapter for tests
#[derive(Default)]
pub struct MemoryAdapter {
    state: Mutex<Option<PersistedState>>,
    fail_saves: AtomicBool,
}

impl MemoryAdapter {
    /// Empty adapter: `load` returns `None`
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter pre-seeded with state, as if a prior run had saved it
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `save` fail
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// What the last successful `save` wrote
    pub fn saved(&self) -> Option<PersistedState> {
        self.state.lock().unwrap().clone()
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn load(&self) -> StorageResult<Option<PersistedState>> {
        Ok(self.state.lock().unwrap().clone())
    }

    fn save(&self, state: &PersistedState) -> StorageResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::WriteError {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "simulated save failure"),
            });
        }
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;

    Ok(())
}
