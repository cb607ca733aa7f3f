//! Data models for Tome
//!
//! Defines the core data structures: Document, Block, and the chat
//! message log, plus the typed patch structs used for partial updates.
//!
//! Documents and blocks are only ever constructed through
//! [`DocumentStore`](crate::store::DocumentStore) operations, so the
//! constructors and mutators here are crate-private; external callers
//! address everything by `id`.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ident::{new_id, IdKind};

/// Title given to documents created without one
pub const DEFAULT_TITLE: &str = "Untitled";

/// Suffix appended to the title of a duplicated document
pub const COPY_SUFFIX: &str = " (Copy)";

/// The closed set of block types
///
/// Serialized with the camelCase wire names used by the persisted
/// document format (`"bulletList"`, `"heading1"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    #[default]
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletList,
    NumberedList,
    Quote,
    Code,
    Image,
}

impl BlockType {
    /// The wire name of this block type
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading1",
            BlockType::Heading2 => "heading2",
            BlockType::Heading3 => "heading3",
            BlockType::BulletList => "bulletList",
            BlockType::NumberedList => "numberedList",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::Image => "image",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(BlockType::Paragraph),
            "heading1" => Ok(BlockType::Heading1),
            "heading2" => Ok(BlockType::Heading2),
            "heading3" => Ok(BlockType::Heading3),
            "bulletList" => Ok(BlockType::BulletList),
            "numberedList" => Ok(BlockType::NumberedList),
            "quote" => Ok(BlockType::Quote),
            "code" => Ok(BlockType::Code),
            "image" => Ok(BlockType::Image),
            other => Err(format!("unknown block type: {}", other)),
        }
    }
}

/// The smallest addressable unit of document content
///
/// `content` is an opaque text payload; `metadata` is an open key/value
/// mapping (rendering hints such as an image source) that passes
/// through storage untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Block type
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Opaque text payload
    pub content: String,
    /// Auxiliary key/value pairs, opaque pass-through
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Block {
    /// Create an empty block of the given type
    pub(crate) fn new(block_type: BlockType) -> Self {
        Self {
            id: new_id(IdKind::Block),
            block_type,
            content: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create a block with a specific id (seed data)
    pub(crate) fn with_id(
        id: impl Into<String>,
        block_type: BlockType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            block_type,
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Copy this block under a fresh identity
    pub(crate) fn reidentified(&self) -> Self {
        Self {
            id: new_id(IdKind::Block),
            block_type: self.block_type,
            content: self.content.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Apply a partial update
    pub(crate) fn apply(&mut self, patch: BlockPatch) {
        if let Some(block_type) = patch.block_type {
            self.block_type = block_type;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
    }
}

/// Direction for [`Document::move_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(format!("unknown direction: {} (expected up or down)", other)),
        }
    }
}

/// Partial update for a document
///
/// Fields left as `None` are untouched. This enumerates the mutable
/// document fields; block content is changed through block operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl DocumentPatch {
    /// Patch that only changes the title
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the public flag
    pub fn is_public(is_public: bool) -> Self {
        Self {
            is_public: Some(is_public),
            ..Self::default()
        }
    }

    /// Patch that replaces the tag set
    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }
}

/// Partial update for a block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPatch {
    pub block_type: Option<BlockType>,
    pub content: Option<String>,
    pub metadata: Option<BTreeMap<String, Value>>,
}

impl BlockPatch {
    /// Patch that only changes the content
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the block type
    pub fn block_type(block_type: BlockType) -> Self {
        Self {
            block_type: Some(block_type),
            ..Self::default()
        }
    }
}

/// A titled, tagged container of an ordered block sequence
///
/// A document always holds at least one block; the store's deletion
/// path refuses to remove the last one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier, immutable
    pub id: String,
    /// Free text, may be empty
    pub title: String,
    /// Ordered block sequence, never empty
    pub content: Vec<Block>,
    /// Fixed at creation
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation to the document or any of its blocks
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Opaque sharing flag, exposed for external collaborators
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    /// Case-sensitive tag set
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document {
    /// Create a document with one empty paragraph block
    pub(crate) fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(IdKind::Document),
            title: title.into(),
            content: vec![Block::new(BlockType::Paragraph)],
            created_at: now,
            updated_at: now,
            is_public: false,
            tags: Vec::new(),
        }
    }

    /// Deep copy with fresh identities for the document and every block
    ///
    /// Content and type of each block are preserved positionally; the
    /// title gains the copy suffix and both timestamps are reset.
    pub(crate) fn duplicated(&self) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(IdKind::Document),
            title: format!("{}{}", self.title, COPY_SUFFIX),
            content: self.content.iter().map(Block::reidentified).collect(),
            created_at: now,
            updated_at: now,
            is_public: self.is_public,
            tags: self.tags.clone(),
        }
    }

    /// Refresh `updated_at`
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Apply a partial update and refresh `updated_at`
    pub(crate) fn apply(&mut self, patch: DocumentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.touch();
    }

    /// Look up a block by id
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.content.iter().find(|b| b.id == block_id)
    }

    /// Create an empty block of the given type and insert it
    ///
    /// When `after_block_id` resolves, the block lands immediately
    /// after it; otherwise it is appended. Returns a clone of the
    /// created block.
    pub(crate) fn insert_block(
        &mut self,
        after_block_id: Option<&str>,
        block_type: BlockType,
    ) -> Block {
        let block = Block::new(block_type);
        let index = after_block_id
            .and_then(|id| self.content.iter().position(|b| b.id == id))
            .map(|i| i + 1)
            .unwrap_or(self.content.len());
        self.content.insert(index, block.clone());
        self.touch();
        block
    }

    /// Apply a partial update to a block; false if the id is absent
    pub(crate) fn update_block(&mut self, block_id: &str, patch: BlockPatch) -> bool {
        match self.content.iter_mut().find(|b| b.id == block_id) {
            Some(block) => {
                block.apply(patch);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove a block; false if the id is absent or it is the last block
    ///
    /// A document must never be left with zero blocks through this path.
    pub(crate) fn remove_block(&mut self, block_id: &str) -> bool {
        if self.content.len() <= 1 {
            return false;
        }
        match self.content.iter().position(|b| b.id == block_id) {
            Some(index) => {
                self.content.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Swap a block with its neighbor; false at boundaries or on a
    /// missing id
    pub(crate) fn move_block(&mut self, block_id: &str, direction: MoveDirection) -> bool {
        let Some(index) = self.content.iter().position(|b| b.id == block_id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.content.len() => index + 1,
            _ => return false,
        };
        self.content.swap(index, target);
        self.touch();
        true
    }

    /// Exact membership test against the tag set
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether this document matches a lowercased search needle
    ///
    /// Substring match on title and block content; exact
    /// case-insensitive match on tags.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .content
                .iter()
                .any(|b| b.content.to_lowercase().contains(needle))
            || self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}

/// Role of a chat log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::User => f.write_str("user"),
            ChatRole::Assistant => f.write_str("assistant"),
        }
    }
}

/// One entry in the append-only assistant chat log
///
/// Persisted alongside documents; the store never validates or
/// processes entries beyond append and clear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub(crate) fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: new_id(IdKind::Message),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
