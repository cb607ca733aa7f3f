//! Tag command handlers

use anyhow::Result;
use tome_core::DocumentStore;

use crate::output::Output;

/// List all tags, or the documents carrying one tag
pub fn list(store: &DocumentStore, tag: Option<String>, output: &Output) -> Result<()> {
    match tag {
        Some(tag) => {
            let docs = store.documents_by_tag(&tag);
            output.print_documents(&docs);
        }
        None => {
            let tags = store.all_tags();
            output.print_tags(&tags);
        }
    }
    Ok(())
}
