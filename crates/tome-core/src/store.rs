//! The document store
//!
//! `DocumentStore` owns the document collection, the id of the
//! currently open document, the assistant chat log, and the ephemeral
//! editing session. Every mutation runs to completion on `&mut self`
//! and then mirrors `{documents, aiHistory}` through the injected
//! [`PersistenceAdapter`]; the in-memory state is the source of truth
//! and a failed save is surfaced through the error field, never rolled
//! back.
//!
//! Operations given an id that does not resolve are silent no-ops:
//! those are expected races against stale UI references, not
//! programming errors. The one hard-blocked case is deleting the last
//! remaining block of a document.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = DocumentStore::open(Box::new(FileAdapter::new(&config)));
//!
//! let doc = store.create_document(Some("Meeting notes"));
//! store.add_block(&doc.id, None, BlockType::Quote);
//!
//! let results = store.search_documents("meeting");
//! ```

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, warn};

use crate::models::{
    Block, BlockPatch, BlockType, ChatMessage, ChatRole, Document, DocumentPatch, MoveDirection,
    DEFAULT_TITLE,
};
use crate::session::EditorSession;
use crate::storage::{PersistedState, PersistenceAdapter};

/// Block-oriented document store
pub struct DocumentStore {
    /// Newest-first document collection
    documents: Vec<Document>,
    /// Id of the currently open document; the projection itself is
    /// derived by lookup, so there is no second copy to keep in sync
    current_id: Option<String>,
    /// Append-only assistant chat log
    chat_history: Vec<ChatMessage>,
    /// Selection and editing-mode state, never persisted
    session: EditorSession,
    /// Most recent persistence failure, cleared by the next successful
    /// save or by `clear_error`
    last_error: Option<String>,
    adapter: Box<dyn PersistenceAdapter>,
}

impl DocumentStore {
    /// Open the store, rehydrating from the adapter
    ///
    /// Falls back to the built-in seed document when nothing has been
    /// persisted yet or the persisted blob is unreadable; an unreadable
    /// blob also surfaces through the error field.
    pub fn open(adapter: Box<dyn PersistenceAdapter>) -> Self {
        let (state, load_error) = match adapter.load() {
            Ok(Some(state)) => (state, None),
            Ok(None) => (seed_state(), None),
            Err(e) => {
                warn!(error = %e, "failed to load persisted state, starting from seed");
                (seed_state(), Some(e.to_string()))
            }
        };

        let mut store = Self::with_state(state, adapter);
        store.last_error = load_error;
        store
    }

    /// Build a store from explicit initial state
    pub fn with_state(state: PersistedState, adapter: Box<dyn PersistenceAdapter>) -> Self {
        Self {
            documents: state.documents,
            current_id: None,
            chat_history: state.chat_history,
            session: EditorSession::new(),
            last_error: None,
            adapter,
        }
    }

    // ==================== Document Operations ====================

    /// Create a document with one empty paragraph block
    ///
    /// The document is prepended to the collection and becomes the
    /// current one. `title` defaults to `"Untitled"`.
    pub fn create_document(&mut self, title: Option<&str>) -> Document {
        let doc = Document::new(title.unwrap_or(DEFAULT_TITLE));
        debug!(id = %doc.id, "created document");
        self.documents.insert(0, doc.clone());
        self.current_id = Some(doc.id.clone());
        self.persist();
        doc
    }

    /// Merge a patch into the matching document; no-op on a missing id
    pub fn update_document(&mut self, id: &str, patch: DocumentPatch) {
        let Some(doc) = self.documents.iter_mut().find(|d| d.id == id) else {
            debug!(id, "update_document: no such document");
            return;
        };
        doc.apply(patch);
        debug!(id, "updated document");
        self.persist();
    }

    /// Remove a document; no-op on a missing id
    ///
    /// Deleting the current document clears the current reference.
    pub fn delete_document(&mut self, id: &str) {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        if self.documents.len() == before {
            debug!(id, "delete_document: no such document");
            return;
        }
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
        debug!(id, "deleted document");
        self.persist();
    }

    /// Deep-copy a document under fresh identities
    ///
    /// The copy's title gains `" (Copy)"`, its timestamps are reset,
    /// and every block is re-identified; it is prepended to the
    /// collection. The current document is unchanged. Returns `None`
    /// on a missing id.
    pub fn duplicate_document(&mut self, id: &str) -> Option<Document> {
        let copy = self.documents.iter().find(|d| d.id == id)?.duplicated();
        debug!(source = id, copy = %copy.id, "duplicated document");
        self.documents.insert(0, copy.clone());
        self.persist();
        Some(copy)
    }

    /// Record which document is open in the editor
    ///
    /// Membership is not validated; a stale or foreign document simply
    /// fails to resolve in later queries, and mutations against its id
    /// are the usual no-ops.
    pub fn set_current_document(&mut self, document: Option<&Document>) {
        self.current_id = document.map(|d| d.id.clone());
    }

    /// The currently open document, derived from the collection
    pub fn current_document(&self) -> Option<&Document> {
        self.current_id.as_deref().and_then(|id| self.document(id))
    }

    // ==================== Block Operations ====================

    /// Insert an empty block of `block_type` into a document
    ///
    /// When `after_block_id` resolves, the block lands immediately
    /// after it; otherwise it is appended. Returns `None` when the
    /// document id does not resolve.
    pub fn add_block(
        &mut self,
        document_id: &str,
        after_block_id: Option<&str>,
        block_type: BlockType,
    ) -> Option<Block> {
        let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) else {
            debug!(document_id, "add_block: no such document");
            return None;
        };
        let block = doc.insert_block(after_block_id, block_type);
        debug!(document_id, block_id = %block.id, %block_type, "added block");
        self.persist();
        Some(block)
    }

    /// Merge a patch into a block; no-op if either id is absent
    pub fn update_block(&mut self, document_id: &str, block_id: &str, patch: BlockPatch) {
        let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) else {
            debug!(document_id, "update_block: no such document");
            return;
        };
        if doc.update_block(block_id, patch) {
            debug!(document_id, block_id, "updated block");
            self.persist();
        }
    }

    /// Remove a block; no-op if either id is absent
    ///
    /// Hard-blocked when the document has exactly one block: a document
    /// is never left empty through this path.
    pub fn delete_block(&mut self, document_id: &str, block_id: &str) {
        let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) else {
            debug!(document_id, "delete_block: no such document");
            return;
        };
        if doc.remove_block(block_id) {
            debug!(document_id, block_id, "deleted block");
            self.persist();
        }
    }

    /// Swap a block with its neighbor; no-op at the boundary
    pub fn move_block(&mut self, document_id: &str, block_id: &str, direction: MoveDirection) {
        let Some(doc) = self.documents.iter_mut().find(|d| d.id == document_id) else {
            debug!(document_id, "move_block: no such document");
            return;
        };
        if doc.move_block(block_id, direction) {
            debug!(document_id, block_id, "moved block");
            self.persist();
        }
    }

    // ==================== Queries ====================

    /// All documents, newest first
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Substring search across title and block content, plus exact
    /// case-insensitive tag match
    ///
    /// An empty or whitespace-only query returns all documents in their
    /// current order; results always follow collection order.
    pub fn search_documents(&self, query: &str) -> Vec<&Document> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.documents.iter().collect();
        }
        self.documents.iter().filter(|d| d.matches(&needle)).collect()
    }

    /// Documents whose tag set contains `tag` exactly
    pub fn documents_by_tag(&self, tag: &str) -> Vec<&Document> {
        self.documents.iter().filter(|d| d.has_tag(tag)).collect()
    }

    /// Union of every document's tags, deduplicated and sorted
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .documents
            .iter()
            .flat_map(|d| d.tags.iter().cloned())
            .collect();
        tags.into_iter().collect()
    }

    // ==================== Chat Log ====================

    /// Append an entry to the chat log
    pub fn add_chat_message(&mut self, role: ChatRole, content: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(role, content);
        self.chat_history.push(message.clone());
        self.persist();
        message
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    pub fn clear_chat_history(&mut self) {
        self.chat_history.clear();
        self.persist();
    }

    // ==================== Session ====================

    /// Replace the block selection; accepts any collection of ids
    pub fn set_selected_blocks<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.session.set_selected_blocks(ids);
    }

    /// Replace the selection with a single block
    pub fn select_block(&mut self, id: impl Into<String>) {
        self.session.select_block(id);
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.session.set_editing(editing);
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    // ==================== Errors ====================

    /// Record a process-wide error for the caller to surface
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ==================== Persistence ====================

    /// Mirror the persistable subset of state through the adapter
    ///
    /// Fire-and-forget: a failure lands in the error field and the
    /// in-memory mutation stands. The next successful save clears it.
    fn persist(&mut self) {
        let state = PersistedState {
            documents: self.documents.clone(),
            chat_history: self.chat_history.clone(),
        };
        match self.adapter.save(&state) {
            Ok(()) => {
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to persist store state");
                self.last_error = Some(match e.recovery_suggestion() {
                    Some(hint) => format!("{} {}", e, hint),
                    None => e.to_string(),
                });
            }
        }
    }
}

/// Built-in first-run state: one welcome document
fn seed_state() -> PersistedState {
    let now = Utc::now();
    let document = Document {
        id: "1".to_string(),
        title: "Welcome to Tome".to_string(),
        content: vec![
            Block::with_id("block-1", BlockType::Heading1, "Welcome to Tome"),
            Block::with_id(
                "block-2",
                BlockType::Paragraph,
                "This is a block-oriented document editor. Start typing to create \
                 your first document.",
            ),
            Block::with_id(
                "block-3",
                BlockType::Paragraph,
                "Use \"/\" to open the block menu and add different types of content.",
            ),
        ],
        created_at: now,
        updated_at: now,
        is_public: false,
        tags: vec!["welcome".to_string(), "getting-started".to_string()],
    };
    PersistedState {
        documents: vec![document],
        chat_history: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryAdapter;
    use std::sync::Arc;
    use std::thread::sleep;
    use std::time::Duration;

    fn empty_store() -> (DocumentStore, Arc<MemoryAdapter>) {
        let adapter = Arc::new(MemoryAdapter::new());
        let store = DocumentStore::with_state(
            PersistedState::default(),
            Box::new(Arc::clone(&adapter)),
        );
        (store, adapter)
    }

    fn seeded_store() -> DocumentStore {
        DocumentStore::open(Box::new(MemoryAdapter::new()))
    }

    #[test]
    fn test_open_seeds_on_empty_adapter() {
        let store = seeded_store();
        assert_eq!(store.document_count(), 1);

        let doc = store.document("1").unwrap();
        assert_eq!(doc.content.len(), 3);
        assert_eq!(doc.content[0].block_type, BlockType::Heading1);
        assert_eq!(doc.tags, vec!["welcome", "getting-started"]);
        assert!(store.current_document().is_none());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_open_rehydrates_persisted_state() {
        let adapter = Arc::new(MemoryAdapter::new());

        let doc_id;
        {
            let mut store = DocumentStore::with_state(
                PersistedState::default(),
                Box::new(Arc::clone(&adapter)),
            );
            doc_id = store.create_document(Some("Kept")).id;
            store.add_chat_message(ChatRole::User, "hello");
        }

        let store = DocumentStore::open(Box::new(Arc::clone(&adapter)));
        assert_eq!(store.document_count(), 1);
        assert_eq!(store.document(&doc_id).unwrap().title, "Kept");
        assert_eq!(store.chat_history().len(), 1);
    }

    #[test]
    fn test_create_document_shape_and_order() {
        let (mut store, _) = empty_store();

        let first = store.create_document(None);
        assert_eq!(first.title, "Untitled");
        assert_eq!(first.content.len(), 1);
        assert_eq!(first.content[0].block_type, BlockType::Paragraph);
        assert_eq!(store.current_document().unwrap().id, first.id);

        let second = store.create_document(Some("Second"));
        // Newest first
        assert_eq!(store.documents()[0].id, second.id);
        assert_eq!(store.documents()[1].id, first.id);
        assert_eq!(store.current_document().unwrap().id, second.id);
    }

    #[test]
    fn test_update_document_patch_and_projection() {
        let (mut store, _) = empty_store();
        let doc = store.create_document(Some("Before"));

        sleep(Duration::from_millis(10));
        store.update_document(&doc.id, DocumentPatch::title("After"));

        let updated = store.document(&doc.id).unwrap();
        assert_eq!(updated.title, "After");
        assert!(updated.updated_at > doc.updated_at);
        // The current-document projection reflects the mutation
        assert_eq!(store.current_document().unwrap().title, "After");
    }

    #[test]
    fn test_update_document_missing_id_is_noop() {
        let (mut store, adapter) = empty_store();
        store.create_document(Some("Only"));
        let before = store.documents().to_vec();
        let saved_before = adapter.saved();

        store.update_document("missing-id", DocumentPatch::title("x"));

        assert_eq!(store.documents(), &before[..]);
        assert_eq!(adapter.saved(), saved_before);
    }

    #[test]
    fn test_delete_document_clears_current() {
        let (mut store, _) = empty_store();
        let keep = store.create_document(Some("Keep"));
        let gone = store.create_document(Some("Gone"));
        assert_eq!(store.current_document().unwrap().id, gone.id);

        store.delete_document(&gone.id);
        assert!(store.current_document().is_none());
        assert_eq!(store.document_count(), 1);

        // Deleting a non-current document leaves the reference alone
        store.set_current_document(Some(&keep));
        store.delete_document("missing-id");
        assert_eq!(store.current_document().unwrap().id, keep.id);
    }

    #[test]
    fn test_duplicate_document_regenerates_identities() {
        let (mut store, _) = empty_store();
        let original = store.create_document(Some("Original"));
        store.add_block(&original.id, None, BlockType::Quote);
        store.update_block(
            &original.id,
            &original.content[0].id,
            BlockPatch::content("body text"),
        );
        store.set_current_document(Some(&original));

        let copy = store.duplicate_document(&original.id).unwrap();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, "Original (Copy)");

        let source = store.document(&original.id).unwrap();
        assert_eq!(copy.content.len(), source.content.len());
        for (a, b) in source.content.iter().zip(&copy.content) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.block_type, b.block_type);
            assert_eq!(a.content, b.content);
        }

        // Copy is prepended; current document is unchanged
        assert_eq!(store.documents()[0].id, copy.id);
        assert_eq!(store.current_document().unwrap().id, original.id);

        assert!(store.duplicate_document("missing-id").is_none());
    }

    #[test]
    fn test_set_current_document_tolerates_foreign_value() {
        let (mut store, _) = empty_store();
        store.create_document(Some("Mine"));

        // A document that was deleted elsewhere, or never belonged here
        let foreign = Document::new("Foreign");
        store.set_current_document(Some(&foreign));
        assert!(store.current_document().is_none());

        // Mutations against its id are no-ops
        store.update_document(&foreign.id, DocumentPatch::title("x"));
        assert_eq!(store.document_count(), 1);

        store.set_current_document(None);
        assert!(store.current_document().is_none());
    }

    #[test]
    fn test_add_block_positions() {
        let mut store = seeded_store();
        let anchor = store.document("1").unwrap().content[0].id.clone();
        let before = store.document("1").unwrap().updated_at;

        sleep(Duration::from_millis(10));
        let block = store
            .add_block("1", Some(&anchor), BlockType::Quote)
            .unwrap();
        assert_eq!(block.block_type, BlockType::Quote);
        assert!(block.content.is_empty());

        let doc = store.document("1").unwrap();
        assert_eq!(doc.content[1].id, block.id);
        assert!(doc.updated_at > before);

        // Missing anchor appends; missing document yields None
        let appended = store
            .add_block("1", Some("block-missing"), BlockType::Code)
            .unwrap();
        assert_eq!(
            store.document("1").unwrap().content.last().unwrap().id,
            appended.id
        );
        assert!(store
            .add_block("missing-doc", None, BlockType::Paragraph)
            .is_none());
    }

    #[test]
    fn test_delete_block_never_empties_document() {
        let mut store = seeded_store();
        let heading = store.document("1").unwrap().content[0].id.clone();
        store.add_block("1", None, BlockType::Quote);
        assert_eq!(store.document("1").unwrap().content.len(), 4);

        store.delete_block("1", &heading);
        assert_eq!(store.document("1").unwrap().content.len(), 3);

        // Drain down to one block, then keep trying
        loop {
            let doc = store.document("1").unwrap();
            if doc.content.len() == 1 {
                break;
            }
            let id = doc.content[0].id.clone();
            store.delete_block("1", &id);
        }
        let last = store.document("1").unwrap().content[0].id.clone();
        store.delete_block("1", &last);
        store.delete_block("1", &last);
        assert_eq!(store.document("1").unwrap().content.len(), 1);
    }

    #[test]
    fn test_delete_block_noop_does_not_touch_timestamp() {
        let mut store = seeded_store();
        // Reduce to a single block first
        loop {
            let doc = store.document("1").unwrap();
            if doc.content.len() == 1 {
                break;
            }
            let id = doc.content[0].id.clone();
            store.delete_block("1", &id);
        }
        let before = store.document("1").unwrap().clone();

        sleep(Duration::from_millis(10));
        store.delete_block("1", &before.content[0].id);
        assert_eq!(store.document("1").unwrap().updated_at, before.updated_at);
    }

    #[test]
    fn test_move_block_round_trip() {
        let mut store = seeded_store();
        let order: Vec<String> = store
            .document("1")
            .unwrap()
            .content
            .iter()
            .map(|b| b.id.clone())
            .collect();
        let middle = order[1].clone();

        store.move_block("1", &middle, MoveDirection::Up);
        store.move_block("1", &middle, MoveDirection::Down);
        let restored: Vec<String> = store
            .document("1")
            .unwrap()
            .content
            .iter()
            .map(|b| b.id.clone())
            .collect();
        assert_eq!(restored, order);

        // Boundary moves are no-ops
        store.move_block("1", &order[0], MoveDirection::Up);
        let unchanged: Vec<String> = store
            .document("1")
            .unwrap()
            .content
            .iter()
            .map(|b| b.id.clone())
            .collect();
        assert_eq!(unchanged, order);
    }

    #[test]
    fn test_search_empty_query_returns_all_in_order() {
        let (mut store, _) = empty_store();
        let a = store.create_document(Some("Alpha"));
        let b = store.create_document(Some("Beta"));

        let all = store.search_documents("");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, b.id);
        assert_eq!(all[1].id, a.id);

        let whitespace = store.search_documents("   ");
        assert_eq!(whitespace.len(), 2);
    }

    #[test]
    fn test_search_matches_title_blocks_and_tags() {
        let (mut store, _) = empty_store();
        let titled = store.create_document(Some("Quarterly Report"));
        let bodied = store.create_document(Some("Scratch"));
        store.update_block(
            &bodied.id,
            &bodied.content[0].id,
            BlockPatch::content("notes about the quarterly numbers"),
        );
        let tagged = store.create_document(Some("Misc"));
        store.update_document(&tagged.id, DocumentPatch::tags(vec!["quarterly".into()]));

        let hits = store.search_documents("QUARTERLY");
        assert_eq!(hits.len(), 3);

        // Tag matching is exact, not substring
        let partial = store.search_documents("quart");
        let ids: Vec<&str> = partial.iter().map(|d| d.id.as_str()).collect();
        assert!(ids.contains(&titled.id.as_str()));
        assert!(ids.contains(&bodied.id.as_str()));
        assert!(!ids.contains(&tagged.id.as_str()));
    }

    #[test]
    fn test_search_consistent_with_tag_filter() {
        let (mut store, _) = empty_store();
        let doc = store.create_document(Some("Welcome guide"));
        store.update_document(&doc.id, DocumentPatch::tags(vec!["welcome".into()]));

        let by_tag = store.documents_by_tag("welcome");
        let by_search = store.search_documents("welcome");
        for d in &by_tag {
            assert!(by_search.iter().any(|s| s.id == d.id));
        }
    }

    #[test]
    fn test_documents_by_tag_is_exact_and_case_sensitive() {
        let (mut store, _) = empty_store();
        let doc = store.create_document(Some("Doc"));
        store.update_document(&doc.id, DocumentPatch::tags(vec!["Rust".into()]));

        assert_eq!(store.documents_by_tag("Rust").len(), 1);
        assert!(store.documents_by_tag("rust").is_empty());
        assert!(store.documents_by_tag("Rus").is_empty());
    }

    #[test]
    fn test_all_tags_deduplicated_and_sorted() {
        let (mut store, _) = empty_store();
        let one = store.create_document(Some("One"));
        store.update_document(&one.id, DocumentPatch::tags(vec!["b".into(), "a".into()]));
        let two = store.create_document(Some("Two"));
        store.update_document(&two.id, DocumentPatch::tags(vec!["a".into(), "c".into()]));

        assert_eq!(store.all_tags(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_persisted_subset_excludes_session_state() {
        let (mut store, adapter) = empty_store();
        let doc = store.create_document(Some("Doc"));
        store.set_current_document(Some(&doc));
        store.set_selected_blocks([doc.content[0].id.clone()]);
        store.set_editing(true);
        store.add_chat_message(ChatRole::User, "hi");

        let saved = adapter.saved().unwrap();
        assert_eq!(saved.documents.len(), 1);
        assert_eq!(saved.chat_history.len(), 1);

        // A fresh store from the same adapter has no session carryover
        let reopened = DocumentStore::open(Box::new(Arc::clone(&adapter)));
        assert!(reopened.current_document().is_none());
        assert!(reopened.session().selected_blocks().is_empty());
        assert!(!reopened.session().is_editing());
    }

    #[test]
    fn test_save_failure_sets_error_and_keeps_mutation() {
        let (mut store, adapter) = empty_store();
        store.create_document(Some("Kept"));
        assert!(store.last_error().is_none());

        adapter.set_fail_saves(true);
        let doc = store.create_document(Some("Also kept"));

        // In-memory mutation stands, error is surfaced once
        assert_eq!(store.document_count(), 2);
        assert!(store.last_error().is_some());
        // The failed write never reached the adapter
        assert_eq!(adapter.saved().unwrap().documents.len(), 1);

        // The next successful write recovers
        adapter.set_fail_saves(false);
        store.update_document(&doc.id, DocumentPatch::title("Renamed"));
        assert!(store.last_error().is_none());
        assert_eq!(adapter.saved().unwrap().documents.len(), 2);
    }

    #[test]
    fn test_error_field_accessors() {
        let (mut store, _) = empty_store();
        store.set_error("something went wrong");
        assert_eq!(store.last_error(), Some("something went wrong"));
        store.clear_error();
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_chat_history_append_and_clear() {
        let (mut store, adapter) = empty_store();

        let user = store.add_chat_message(ChatRole::User, "improve this paragraph");
        let reply = store.add_chat_message(ChatRole::Assistant, "done");
        assert!(user.id.starts_with("msg-"));
        assert_ne!(user.id, reply.id);

        let history = store.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert!(history[0].timestamp <= history[1].timestamp);
        assert_eq!(adapter.saved().unwrap().chat_history.len(), 2);

        store.clear_chat_history();
        assert!(store.chat_history().is_empty());
        assert!(adapter.saved().unwrap().chat_history.is_empty());
    }

    #[test]
    fn test_selection_passthrough() {
        let (mut store, _) = empty_store();
        store.set_selected_blocks(["block-a", "block-b"]);
        assert_eq!(store.session().selected_blocks().len(), 2);

        // Single-id form replaces the whole selection
        store.select_block("block-c");
        assert_eq!(store.session().selected_blocks().len(), 1);
        assert!(store.session().selected_blocks().contains("block-c"));

        store.clear_selection();
        assert!(store.session().selected_blocks().is_empty());
    }

    #[test]
    fn test_updated_at_never_precedes_created_at() {
        let (mut store, _) = empty_store();
        let doc = store.create_document(Some("Doc"));
        store.add_block(&doc.id, None, BlockType::Quote);
        store.update_document(&doc.id, DocumentPatch::is_public(true));

        let current = store.document(&doc.id).unwrap();
        assert!(current.updated_at >= current.created_at);
    }
}
