//! Chat command handlers
//!
//! The assistant is a placeholder: every prompt gets the same canned
//! reply, appended to the persisted chat log alongside the user
//! message. No inference happens anywhere.

use anyhow::Result;
use tome_core::{ChatRole, DocumentStore};

use crate::output::Output;

/// The fixed reply returned for every prompt
const PLACEHOLDER_REPLY: &str = "AI features are currently under development. \
    This is a placeholder response to demonstrate the interface. \
    Your request has been noted!";

/// Append a prompt and the placeholder reply to the chat log
pub fn send(store: &mut DocumentStore, message: String, output: &Output) -> Result<()> {
    store.add_chat_message(ChatRole::User, message);
    let reply = store.add_chat_message(ChatRole::Assistant, PLACEHOLDER_REPLY);
    output.message(&reply.content);
    Ok(())
}

/// Print the chat log
pub fn history(store: &DocumentStore, output: &Output) -> Result<()> {
    output.print_messages(store.chat_history());
    Ok(())
}

/// Clear the chat log
pub fn clear(store: &mut DocumentStore, output: &Output) -> Result<()> {
    store.clear_chat_history();
    output.success("Cleared chat history");
    Ok(())
}
