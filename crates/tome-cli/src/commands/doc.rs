//! Document command handlers

use anyhow::{anyhow, Result};
use tome_core::{Document, DocumentPatch, DocumentStore};

use crate::commands::resolve_document_id;
use crate::output::{short_id, Output};

/// Create a new document
pub fn create(store: &mut DocumentStore, title: Option<String>, output: &Output) -> Result<()> {
    let doc = store.create_document(title.as_deref());
    if output.is_quiet() {
        println!("{}", doc.id);
    } else if output.is_json() {
        output.print_document(&doc);
    } else {
        output.success(&format!("Created document: {} ({})", doc.title, doc.id));
    }
    Ok(())
}

/// List all documents, newest first
pub fn list(store: &DocumentStore, output: &Output) -> Result<()> {
    let docs: Vec<&Document> = store.documents().iter().collect();
    output.print_documents(&docs);
    Ok(())
}

/// Show one document with its blocks
pub fn show(store: &DocumentStore, id: String, output: &Output) -> Result<()> {
    let id = resolve_document_id(store, &id)?;
    let doc = store
        .document(&id)
        .ok_or_else(|| anyhow!("Document not found: {}", id))?;
    output.print_document(doc);
    Ok(())
}

/// Rename a document
pub fn rename(
    store: &mut DocumentStore,
    id: String,
    title: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_document_id(store, &id)?;
    store.update_document(&id, DocumentPatch::title(title.clone()));
    output.success(&format!("Renamed {} to: {}", short_id(&id), title));
    Ok(())
}

/// Add and remove tags on a document
pub fn tag(
    store: &mut DocumentStore,
    id: String,
    add: Vec<String>,
    remove: Vec<String>,
    output: &Output,
) -> Result<()> {
    let id = resolve_document_id(store, &id)?;
    let doc = store
        .document(&id)
        .ok_or_else(|| anyhow!("Document not found: {}", id))?;

    let mut tags = doc.tags.clone();
    tags.retain(|t| !remove.contains(t));
    for tag in add {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    store.update_document(&id, DocumentPatch::tags(tags.clone()));
    output.success(&format!(
        "Tags on {}: {}",
        short_id(&id),
        if tags.is_empty() {
            "(none)".to_string()
        } else {
            tags.join(", ")
        }
    ));
    Ok(())
}

/// Set the public flag on a document
pub fn set_public(
    store: &mut DocumentStore,
    id: String,
    is_public: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_document_id(store, &id)?;
    store.update_document(&id, DocumentPatch::is_public(is_public));
    output.success(&format!(
        "Document {} is now {}",
        short_id(&id),
        if is_public { "public" } else { "private" }
    ));
    Ok(())
}

/// Duplicate a document
pub fn duplicate(store: &mut DocumentStore, id: String, output: &Output) -> Result<()> {
    let id = resolve_document_id(store, &id)?;
    let copy = store
        .duplicate_document(&id)
        .ok_or_else(|| anyhow!("Document not found: {}", id))?;
    if output.is_quiet() {
        println!("{}", copy.id);
    } else if output.is_json() {
        output.print_document(&copy);
    } else {
        output.success(&format!("Duplicated as: {} ({})", copy.title, copy.id));
    }
    Ok(())
}

/// Delete a document
pub fn delete(store: &mut DocumentStore, id: String, output: &Output) -> Result<()> {
    let id = resolve_document_id(store, &id)?;
    store.delete_document(&id);
    output.success(&format!("Deleted document: {}", short_id(&id)));
    Ok(())
}
