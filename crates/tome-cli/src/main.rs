//! Tome CLI
//!
//! Command-line interface for Tome - block-oriented document editing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tome_core::{Config, DocumentStore, FileAdapter};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "tome")]
#[command(about = "Tome - block-oriented document editor")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage documents
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },
    /// Manage blocks within a document
    Block {
        #[command(subcommand)]
        command: BlockCommands,
    },
    /// Search documents by title, content, or tag
    Search {
        /// Search query
        query: String,
    },
    /// List all tags, or documents carrying one tag
    Tags {
        /// Show documents with this exact tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Talk to the (placeholder) assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum DocCommands {
    /// Create a new document
    #[command(alias = "add")]
    Create {
        /// Document title (defaults to "Untitled")
        title: Option<String>,
    },
    /// List all documents, newest first
    #[command(alias = "ls")]
    List,
    /// Show a document with its blocks
    Show {
        /// Document ID (full or prefix)
        id: String,
    },
    /// Rename a document
    Rename {
        /// Document ID (full or prefix)
        id: String,
        /// New title
        title: String,
    },
    /// Add or remove tags
    Tag {
        /// Document ID (full or prefix)
        id: String,
        /// Tags to add
        #[arg(short, long)]
        add: Vec<String>,
        /// Tags to remove
        #[arg(short, long)]
        remove: Vec<String>,
    },
    /// Mark a document public
    Publish {
        /// Document ID (full or prefix)
        id: String,
    },
    /// Mark a document private
    Unpublish {
        /// Document ID (full or prefix)
        id: String,
    },
    /// Duplicate a document under a fresh identity
    Duplicate {
        /// Document ID (full or prefix)
        id: String,
    },
    /// Delete a document
    #[command(alias = "rm")]
    Delete {
        /// Document ID (full or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum BlockCommands {
    /// Add a block to a document
    Add {
        /// Document ID (full or prefix)
        doc: String,
        /// Insert after this block (appends when omitted)
        #[arg(long)]
        after: Option<String>,
        /// Block type (paragraph, heading1..3, bulletList, numberedList, quote, code, image)
        #[arg(short = 't', long = "type", default_value = "paragraph")]
        block_type: String,
    },
    /// Update a block's content and/or type
    Update {
        /// Document ID (full or prefix)
        doc: String,
        /// Block ID (full or prefix)
        block: String,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// New block type
        #[arg(short = 't', long = "type")]
        block_type: Option<String>,
    },
    /// Delete a block (a document always keeps at least one)
    #[command(alias = "rm")]
    Delete {
        /// Document ID (full or prefix)
        doc: String,
        /// Block ID (full or prefix)
        block: String,
    },
    /// Move a block up or down
    Move {
        /// Document ID (full or prefix)
        doc: String,
        /// Block ID (full or prefix)
        block: String,
        /// Direction: up or down
        direction: String,
    },
}

#[derive(Subcommand)]
enum ChatCommands {
    /// Send a prompt and get the placeholder reply
    Send {
        /// The prompt
        message: String,
    },
    /// Show the chat log
    History,
    /// Clear the chat log
    Clear,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;
    let mut store = DocumentStore::open(Box::new(FileAdapter::new(&config)));

    let result = match cli.command {
        Commands::Doc { command } => handle_doc_command(command, &mut store, &output),
        Commands::Block { command } => handle_block_command(command, &mut store, &output),
        Commands::Search { query } => commands::search::run(&store, query, &output),
        Commands::Tags { tag } => commands::tag::list(&store, tag, &output),
        Commands::Chat { command } => handle_chat_command(command, &mut store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    };

    // Persistence failures don't fail commands; surface them once here
    if let Some(err) = store.last_error() {
        eprintln!("⚠ {}", err);
    }

    result
}

fn handle_doc_command(
    command: DocCommands,
    store: &mut DocumentStore,
    output: &Output,
) -> Result<()> {
    match command {
        DocCommands::Create { title } => commands::doc::create(store, title, output),
        DocCommands::List => commands::doc::list(store, output),
        DocCommands::Show { id } => commands::doc::show(store, id, output),
        DocCommands::Rename { id, title } => commands::doc::rename(store, id, title, output),
        DocCommands::Tag { id, add, remove } => commands::doc::tag(store, id, add, remove, output),
        DocCommands::Publish { id } => commands::doc::set_public(store, id, true, output),
        DocCommands::Unpublish { id } => commands::doc::set_public(store, id, false, output),
        DocCommands::Duplicate { id } => commands::doc::duplicate(store, id, output),
        DocCommands::Delete { id } => commands::doc::delete(store, id, output),
    }
}

fn handle_block_command(
    command: BlockCommands,
    store: &mut DocumentStore,
    output: &Output,
) -> Result<()> {
    match command {
        BlockCommands::Add {
            doc,
            after,
            block_type,
        } => commands::block::add(store, doc, after, block_type, output),
        BlockCommands::Update {
            doc,
            block,
            content,
            block_type,
        } => commands::block::update(store, doc, block, content, block_type, output),
        BlockCommands::Delete { doc, block } => commands::block::delete(store, doc, block, output),
        BlockCommands::Move {
            doc,
            block,
            direction,
        } => commands::block::r#move(store, doc, block, direction, output),
    }
}

fn handle_chat_command(
    command: ChatCommands,
    store: &mut DocumentStore,
    output: &Output,
) -> Result<()> {
    match command {
        ChatCommands::Send { message } => commands::chat::send(store, message, output),
        ChatCommands::History => commands::chat::history(store, output),
        ChatCommands::Clear => commands::chat::clear(store, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
