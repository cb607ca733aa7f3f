//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use tome_core::{ChatMessage, Document};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single document with its blocks
    pub fn print_document(&self, doc: &Document) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", doc.id);
                println!("Title:   {}", doc.title);
                if !doc.tags.is_empty() {
                    println!("Tags:    {}", doc.tags.join(", "));
                }
                println!("Public:  {}", if doc.is_public { "yes" } else { "no" });
                println!("Created: {}", doc.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated: {}", doc.updated_at.format("%Y-%m-%d %H:%M"));

                println!();
                println!("── Blocks ({}) ──", doc.content.len());
                for block in &doc.content {
                    println!(
                        "{} | {:12} | {}",
                        short_id(&block.id),
                        block.block_type.to_string(),
                        truncate_line(&block.content, 60)
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(doc).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", doc.id);
            }
        }
    }

    /// Print a list of documents
    pub fn print_documents(&self, docs: &[&Document]) {
        match self.format {
            OutputFormat::Human => {
                if docs.is_empty() {
                    println!("No documents found.");
                    return;
                }
                for doc in docs {
                    let tags = if doc.tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", doc.tags.join(", "))
                    };
                    println!(
                        "{} | {}{} | {} block(s) | {}",
                        short_id(&doc.id),
                        truncate(&doc.title, 35),
                        tags,
                        doc.content.len(),
                        doc.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
                println!("\n{} document(s)", docs.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(docs).unwrap());
            }
            OutputFormat::Quiet => {
                for doc in docs {
                    println!("{}", doc.id);
                }
            }
        }
    }

    /// Print a list of tags
    pub fn print_tags(&self, tags: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for tag in tags {
                    println!("{}", tag);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(tags).unwrap());
            }
            OutputFormat::Quiet => {
                for tag in tags {
                    println!("{}", tag);
                }
            }
        }
    }

    /// Print the chat log
    pub fn print_messages(&self, messages: &[ChatMessage]) {
        match self.format {
            OutputFormat::Human => {
                if messages.is_empty() {
                    println!("No messages.");
                    return;
                }
                for msg in messages {
                    println!(
                        "[{}] {:9} {}",
                        msg.timestamp.format("%Y-%m-%d %H:%M"),
                        msg.role.to_string(),
                        msg.content
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(messages).unwrap());
            }
            OutputFormat::Quiet => {
                for msg in messages {
                    println!("{}", msg.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// First characters of an id, enough to disambiguate in listings
///
/// Ids vary in length (the seed document is just `"1"`), so this never
/// slices past the end.
pub fn short_id(id: &str) -> &str {
    let end = id
        .char_indices()
        .nth(12)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    &id[..end]
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}
