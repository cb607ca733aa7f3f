//! Block command handlers
//!
//! Blocks are addressed by document id plus block id; both accept
//! unique prefixes.

use anyhow::{anyhow, Result};
use tome_core::{BlockPatch, BlockType, Document, DocumentStore, MoveDirection};

use crate::commands::{resolve_block_id, resolve_document_id};
use crate::output::{short_id, Output};

/// Add a block to a document
pub fn add(
    store: &mut DocumentStore,
    doc_id: String,
    after: Option<String>,
    block_type: String,
    output: &Output,
) -> Result<()> {
    let doc_id = resolve_document_id(store, &doc_id)?;
    let block_type: BlockType = block_type.parse().map_err(|e: String| anyhow!(e))?;

    let after = match after {
        Some(input) => {
            let doc = store
                .document(&doc_id)
                .ok_or_else(|| anyhow!("Document not found: {}", doc_id))?;
            Some(resolve_block_id(doc, &input)?)
        }
        None => None,
    };

    let block = store
        .add_block(&doc_id, after.as_deref(), block_type)
        .ok_or_else(|| anyhow!("Document not found: {}", doc_id))?;

    if output.is_quiet() {
        println!("{}", block.id);
    } else {
        output.success(&format!(
            "Added {} block {} to {}",
            block.block_type,
            short_id(&block.id),
            short_id(&doc_id)
        ));
    }
    Ok(())
}

/// Update a block's content and/or type
pub fn update(
    store: &mut DocumentStore,
    doc_id: String,
    block_id: String,
    content: Option<String>,
    block_type: Option<String>,
    output: &Output,
) -> Result<()> {
    if content.is_none() && block_type.is_none() {
        anyhow::bail!("Nothing to update: pass --content and/or --type");
    }

    let doc_id = resolve_document_id(store, &doc_id)?;
    let doc = store
        .document(&doc_id)
        .ok_or_else(|| anyhow!("Document not found: {}", doc_id))?;
    let block_id = resolve_block_id(doc, &block_id)?;

    let patch = BlockPatch {
        content,
        block_type: block_type
            .map(|t| t.parse::<BlockType>().map_err(|e| anyhow!(e)))
            .transpose()?,
        metadata: None,
    };

    store.update_block(&doc_id, &block_id, patch);
    output.success(&format!("Updated block: {}", short_id(&block_id)));
    Ok(())
}

/// Delete a block
pub fn delete(
    store: &mut DocumentStore,
    doc_id: String,
    block_id: String,
    output: &Output,
) -> Result<()> {
    let doc_id = resolve_document_id(store, &doc_id)?;
    let doc = store
        .document(&doc_id)
        .ok_or_else(|| anyhow!("Document not found: {}", doc_id))?;
    let block_id = resolve_block_id(doc, &block_id)?;

    if doc.content.len() <= 1 {
        anyhow::bail!("A document must keep at least one block");
    }

    store.delete_block(&doc_id, &block_id);
    output.success(&format!("Deleted block: {}", short_id(&block_id)));
    Ok(())
}

/// Move a block up or down
///
/// The store treats boundary moves as no-ops; the position is compared
/// before and after so the output never claims a move that didn't
/// happen.
pub fn r#move(
    store: &mut DocumentStore,
    doc_id: String,
    block_id: String,
    direction: String,
    output: &Output,
) -> Result<()> {
    let direction: MoveDirection = direction.parse().map_err(|e: String| anyhow!(e))?;
    let doc_id = resolve_document_id(store, &doc_id)?;
    let doc = store
        .document(&doc_id)
        .ok_or_else(|| anyhow!("Document not found: {}", doc_id))?;
    let block_id = resolve_block_id(doc, &block_id)?;
    let before = block_position(doc, &block_id);

    store.move_block(&doc_id, &block_id, direction);

    let after = store
        .document(&doc_id)
        .and_then(|d| block_position(d, &block_id));
    if after == before {
        let edge = match direction {
            MoveDirection::Up => "top",
            MoveDirection::Down => "bottom",
        };
        output.message(&format!(
            "Block {} is already at the {}",
            short_id(&block_id),
            edge
        ));
    } else {
        output.success(&format!("Moved block: {}", short_id(&block_id)));
    }
    Ok(())
}

/// Index of a block within a document's sequence
fn block_position(doc: &Document, block_id: &str) -> Option<usize> {
    doc.content.iter().position(|b| b.id == block_id)
}
