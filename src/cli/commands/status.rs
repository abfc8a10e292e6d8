use anyhow::Result;

use crate::cli::output::{StatusInfo, get_formatter};
use crate::models::{Config, OutputFormat};
use crate::services::{HttpEmbedder, VectorStore, connect};

pub async fn handle_status(format: OutputFormat, _verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let (embedding_connected, embedding_model) = match HttpEmbedder::new(&config.embedding) {
        Ok(embedder) => match embedder.health_check().await {
            Ok(health) => (true, health.model_id),
            Err(_) => (false, None),
        },
        Err(_) => (false, None),
    };

    let vector_store_connected = match connect(
        &config.vector_store,
        u64::from(config.embedding.dimension),
    ) {
        Ok(store) => store.health_check().await.unwrap_or(false),
        Err(_) => false,
    };

    let status = StatusInfo {
        embedding_url: config.embedding.url.clone(),
        embedding_connected,
        embedding_model,
        vector_store_url: config.vector_store.url.clone(),
        vector_store_connected,
    };

    print!("{}", formatter.format_status(&status));

    if !embedding_connected || !vector_store_connected {
        eprintln!();
        if !embedding_connected {
            eprintln!(
                "Warning: embedding server not reachable at {}",
                config.embedding.url
            );
        }
        if !vector_store_connected {
            eprintln!(
                "Warning: vector store not reachable at {}. Start with: docker-compose up -d qdrant",
                config.vector_store.url
            );
        }
    }

    Ok(())
}
