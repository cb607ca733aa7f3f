//! Storage layer
//!
//! The store treats durable storage as an opaque blob behind the
//! [`PersistenceAdapter`] trait: one `load` at startup, one `save`
//! after every mutation. [`FileAdapter`] keeps the blob as JSON on
//! disk with atomic writes; [`MemoryAdapter`] backs tests.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{FileAdapter, MemoryAdapter, PersistedState, PersistenceAdapter};
