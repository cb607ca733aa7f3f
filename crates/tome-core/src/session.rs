//! Ephemeral editing session state
//!
//! Tracks which blocks are selected and whether the editor is in
//! editing mode. Session state is never persisted and is never
//! validated against the open document's actual block ids; callers
//! clear the selection when switching documents.

use std::collections::BTreeSet;

/// Selection and editing-mode state for the open editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    selected_blocks: BTreeSet<String>,
    is_editing: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection set
    pub fn set_selected_blocks<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_blocks = ids.into_iter().map(Into::into).collect();
    }

    /// Replace the selection with a single block
    pub fn select_block(&mut self, id: impl Into<String>) {
        let id: String = id.into();
        self.set_selected_blocks([id]);
    }

    pub fn clear_selection(&mut self) {
        self.selected_blocks.clear();
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
    }

    pub fn selected_blocks(&self) -> &BTreeSet<String> {
        &self.selected_blocks
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }
}
