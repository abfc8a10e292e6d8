//! Query pipeline: query text in, ranked hits out.

use std::sync::Arc;

use crate::error::QueryError;
use crate::models::QueryHit;
use crate::services::{CollectionManager, Embedder, VectorStore};

/// Orchestrates embed → nearest-neighbor search for one named collection.
///
/// The target collection goes through create-or-get first, so querying a
/// collection that was never ingested returns an empty result set rather
/// than an error. The store's ranking is returned unmodified.
#[derive(Clone)]
pub struct QueryPipeline {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    collections: CollectionManager,
}

impl QueryPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        let collections = CollectionManager::new(store.clone());
        Self {
            embedder,
            store,
            collections,
        }
    }

    /// Run a similarity query against the named collection.
    pub async fn query(
        &self,
        collection: &str,
        text: &str,
        limit: u64,
    ) -> Result<Vec<QueryHit>, QueryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QueryError::InvalidQuery("query cannot be empty".to_string()));
        }

        let vector = self.embedder.embed_query(text).await?;
        let handle = self.collections.get_or_create(collection).await?;
        let hits = self.store.query(handle.name(), vector, limit).await?;

        Ok(hits)
    }
}
