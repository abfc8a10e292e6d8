use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use std::time::Instant;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat, QueryResults};
use crate::services::{HttpEmbedder, QueryPipeline, connect};

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[arg(required = true, help = "Query text")]
    pub query: String,

    #[arg(
        long,
        short = 'c',
        help = "Collection to query (defaults to the configured collection)"
    )]
    pub collection: Option<String>,

    #[arg(long, short = 'n', help = "Maximum number of results to return")]
    pub limit: Option<u32>,
}

pub async fn handle_query(args: QueryArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        anyhow::bail!("query cannot be empty");
    }

    let config = Config::load()?;
    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let collection = args
        .collection
        .unwrap_or_else(|| config.query.default_collection.clone());
    let limit = args.limit.unwrap_or(config.query.default_limit);
    if limit == 0 {
        anyhow::bail!("limit must be at least 1");
    }

    if verbose {
        eprintln!("Query: \"{query}\"");
        eprintln!("  Collection: {collection}");
        eprintln!("  Limit: {limit}");
    }

    let embedder = Arc::new(HttpEmbedder::new(&config.embedding)?);
    let store = connect(&config.vector_store, u64::from(config.embedding.dimension))?;
    let pipeline = QueryPipeline::new(embedder, store);

    let hits = pipeline
        .query(&collection, query, u64::from(limit))
        .await
        .context("query failed")?;

    if verbose {
        eprintln!("Total: {}ms", start_time.elapsed().as_millis());
        eprintln!();
    }

    let duration_ms = start_time.elapsed().as_millis() as u64;
    let results = QueryResults::new(query.to_string(), collection, hits, duration_ms);

    print!("{}", formatter.format_query_results(&results));

    Ok(())
}
