//! Ingest command implementation.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use walkdir::WalkDir;

use crate::cli::output::{IngestStats, get_formatter};
use crate::models::{Config, OutputFormat};
use crate::services::{FilePreprocessor, HttpEmbedder, IngestPipeline, connect};
use crate::utils::is_text_file;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Path to the file or directory to ingest
    #[arg(required = true)]
    pub path: PathBuf,

    /// Target collection (defaults to the configured collection)
    #[arg(long, short = 'c')]
    pub collection: Option<String>,

    /// File patterns to exclude (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Show what would be ingested without actually ingesting
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle_ingest(args: IngestArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let collection = args
        .collection
        .unwrap_or_else(|| config.query.default_collection.clone());

    let path = args.path.canonicalize().context("invalid path")?;
    let files = collect_files(&path, &args.exclude, &config.ingest.exclude_patterns)?;

    if files.is_empty() {
        println!("{}", formatter.format_message("No files found to ingest."));
        return Ok(());
    }

    if verbose {
        println!("Found {} files to process", files.len());
    }

    if args.dry_run {
        println!(
            "{}",
            formatter.format_message(&format!("Dry run: Would ingest {} files", files.len()))
        );
        for file in &files {
            println!("  {}", file.display());
        }
        return Ok(());
    }

    let preprocessor = Arc::new(FilePreprocessor::new(&config.ingest));
    let embedder = Arc::new(HttpEmbedder::new(&config.embedding)?);
    let store = connect(&config.vector_store, u64::from(config.embedding.dimension))?;
    let pipeline = IngestPipeline::new(preprocessor, embedder, store);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut stats = IngestStats {
        files_scanned: files.len() as u64,
        ..Default::default()
    };

    for file_path in &files {
        pb.inc(1);

        if !is_text_file(file_path) {
            stats.files_skipped += 1;
            continue;
        }

        match pipeline.ingest(&collection, file_path).await {
            Ok(count) => {
                stats.records_written += count;
                stats.files_ingested += 1;
            }
            Err(crate::error::IngestError::PreprocessError(e)) => {
                // Unreadable files are skipped when walking a directory
                if verbose {
                    pb.println(format!("Skipping {}: {}", file_path.display(), e));
                }
                stats.files_skipped += 1;
                if path.is_file() {
                    pb.finish_and_clear();
                    return Err(e).context("failed to preprocess file");
                }
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e).context(format!("failed to ingest {}", file_path.display()));
            }
        }
    }

    pb.finish_and_clear();
    stats.duration_ms = start_time.elapsed().as_millis() as u64;
    print!("{}", formatter.format_ingest_stats(&stats));

    Ok(())
}

fn collect_files(
    path: &PathBuf,
    exclude: &[String],
    default_exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.clone());
        return Ok(files);
    }

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.context("failed to read directory entry")?;
        let entry_path = entry.path();

        if !entry_path.is_file() {
            continue;
        }

        let path_str = entry_path.to_string_lossy();
        let mut excluded = false;

        for pattern in exclude.iter().chain(default_exclude.iter()) {
            if glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
            {
                excluded = true;
                break;
            }
        }

        if !excluded {
            files.push(entry_path.to_path_buf());
        }
    }

    Ok(files)
}
