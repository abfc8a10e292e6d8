//! Collection lifecycle commands.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cli::output::{CollectionStats, get_formatter};
use crate::error::VectorStoreError;
use crate::models::{Config, OutputFormat};
use crate::services::{CollectionManager, VectorStore, connect};

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    /// Delete a collection and all its records
    Delete {
        /// Name of the collection to delete
        #[arg(required = true)]
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        force: bool,
    },

    /// Show information about a collection
    Info {
        /// Name of the collection
        #[arg(required = true)]
        name: String,
    },
}

pub async fn handle_collection(
    cmd: CollectionCommand,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    match cmd {
        CollectionCommand::Delete { name, force } => {
            handle_delete(name, force, format, verbose).await
        }
        CollectionCommand::Info { name } => handle_info(name, format).await,
    }
}

async fn handle_delete(
    name: String,
    force: bool,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    if verbose {
        println!("Deleting collection: {}", name);
    }

    if !force {
        println!(
            "This will delete collection '{}' and ALL its records. Continue? [y/N]",
            name
        );
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.format_message("Cancelled."));
            return Ok(());
        }
    }

    let store = connect(&config.vector_store, u64::from(config.embedding.dimension))?;
    let manager = CollectionManager::new(store);

    match manager.delete(&name).await {
        Ok(()) => {
            println!(
                "{}",
                formatter.format_message(&format!("Deleted collection '{}'", name))
            );
            Ok(())
        }
        Err(VectorStoreError::NotFound(name)) => {
            anyhow::bail!("collection not found: {}", name)
        }
        Err(e) => Err(e).context("failed to delete collection"),
    }
}

async fn handle_info(name: String, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let store = connect(&config.vector_store, u64::from(config.embedding.dimension))?;

    let info = store
        .collection_info(&name)
        .await
        .context("failed to fetch collection info")?;

    match info {
        Some(info) => {
            let stats = CollectionStats {
                name,
                points_count: info.points_count,
            };
            print!("{}", formatter.format_collection_info(&stats));
        }
        None => {
            anyhow::bail!("collection not found: {}", name);
        }
    }

    Ok(())
}
