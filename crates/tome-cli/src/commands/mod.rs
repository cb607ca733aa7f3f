//! Command handlers

pub mod block;
pub mod chat;
pub mod config;
pub mod doc;
pub mod search;
pub mod tag;

use anyhow::{bail, Result};
use tome_core::{Document, DocumentStore};

use crate::output::short_id;

/// Resolve a document id argument (full id or unique prefix)
pub fn resolve_document_id(store: &DocumentStore, input: &str) -> Result<String> {
    if store.document(input).is_some() {
        return Ok(input.to_string());
    }

    let matches: Vec<&Document> = store
        .documents()
        .iter()
        .filter(|d| d.id.starts_with(input))
        .collect();

    match matches.len() {
        0 => bail!("No document found matching: {}", input),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple documents match '{}':", input);
            for doc in &matches {
                eprintln!("  {} - {}", doc.id, doc.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Resolve a block id argument within a document (full id or unique prefix)
pub fn resolve_block_id(doc: &Document, input: &str) -> Result<String> {
    if doc.block(input).is_some() {
        return Ok(input.to_string());
    }

    let matches: Vec<_> = doc
        .content
        .iter()
        .filter(|b| b.id.starts_with(input))
        .collect();

    match matches.len() {
        0 => bail!("No block found matching: {}", input),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple blocks match '{}':", input);
            for block in &matches {
                eprintln!("  {} - {}", short_id(&block.id), block.block_type);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
