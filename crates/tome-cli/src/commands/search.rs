//! Search command handler

use anyhow::Result;
use tome_core::DocumentStore;

use crate::output::Output;

/// Search documents by title, block content, or tag
pub fn run(store: &DocumentStore, query: String, output: &Output) -> Result<()> {
    let results = store.search_documents(&query);
    output.print_documents(&results);
    Ok(())
}
