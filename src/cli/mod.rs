//! CLI module for semdex.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::models::OutputFormat;

/// Semantic corpus CLI: ingest documents into a vector index and query them.
#[derive(Debug, Parser)]
#[command(name = "semdex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(long, short = 'f', global = true, help = "Output format: text or json")]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check infrastructure status (embedding server, vector store)
    Status,

    /// Ingest a file or directory into a collection
    Ingest(commands::IngestArgs),

    /// Query a collection for similar content
    Query(commands::QueryArgs),

    /// Manage collections (delete, info)
    #[command(subcommand)]
    Collection(commands::CollectionCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}
