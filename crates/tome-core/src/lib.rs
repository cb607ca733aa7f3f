//! Tome Core Library
//!
//! This crate provides the core functionality for Tome, a rich-text
//! document editor whose documents are ordered sequences of typed
//! content blocks (headings, paragraphs, lists, quotes, code, images).
//!
//! # Architecture
//!
//! The in-memory [`DocumentStore`] is the source of truth. It mirrors
//! the persistable subset of its state (`{documents, aiHistory}`)
//! through an injected [`PersistenceAdapter`] after every mutation;
//! a failed save surfaces through the store's error field and never
//! rolls back the mutation.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = DocumentStore::open(Box::new(FileAdapter::new(&config)));
//!
//! let doc = store.create_document(Some("Meeting notes"));
//! store.add_block(&doc.id, None, BlockType::Heading1);
//!
//! let results = store.search_documents("meeting");
//! ```
//!
//! # Modules
//!
//! - `store`: the document store (main entry point)
//! - `models`: documents, blocks, patches, and the chat log entries
//! - `ident`: identifier generation
//! - `session`: ephemeral selection/editing state
//! - `storage`: persistence adapters and errors
//! - `config`: application configuration

pub mod config;
pub mod ident;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;

pub use config::Config;
pub use ident::{new_id, IdKind};
pub use models::{
    Block, BlockPatch, BlockType, ChatMessage, ChatRole, Document, DocumentPatch, MoveDirection,
};
pub use session::EditorSession;
pub use storage::{
    FileAdapter, MemoryAdapter, PersistedState, PersistenceAdapter, StorageError, StorageResult,
};
pub use store::DocumentStore;
