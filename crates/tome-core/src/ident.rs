//! Identifier generation
//!
//! Every document, block, and chat message gets a `"<prefix>-<uuid>"`
//! string id. The prefix only aids debugging (a block id is obvious at
//! a glance in logs or persisted JSON); uniqueness comes from the
//! random UUID, which holds within a single operation (duplicating a
//! document mints N block ids in the same instant), across the process
//! lifetime, and across reloads of persisted state.

use uuid::Uuid;

/// What kind of entity an identifier names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Document,
    Block,
    Message,
}

impl IdKind {
    /// Debug prefix carried by generated ids
    pub fn prefix(&self) -> &'static str {
        match self {
            IdKind::Document => "doc",
            IdKind::Block => "block",
            IdKind::Message => "msg",
        }
    }
}

/// Mint a fresh identifier for the given kind
pub fn new_id(kind: IdKind) -> String {
    format!("{}-{}", kind.prefix(), Uuid::new_v4())
}
