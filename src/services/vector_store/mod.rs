//! Vector store abstraction layer.
//!
//! A trait-based client over the remote vector store, with Qdrant as the
//! production backend. Operations are collection-scoped by name; one client
//! is built at startup and shared by reference with both pipelines rather
//! than reconnecting per call.

mod qdrant;

pub use qdrant::QdrantStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::VectorStoreError;
use crate::models::{QueryHit, Record, VectorStoreConfig};

/// Collection information as reported by the store.
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    pub points_count: u64,
}

/// Client primitives against the remote vector store.
///
/// Collection existence is never cached locally; every operation round-trips
/// to the store so concurrent processes see consistent state.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Check if the vector store is healthy and accessible.
    async fn health_check(&self) -> Result<bool, VectorStoreError>;

    /// Get information about a named collection.
    /// Returns None if the collection doesn't exist.
    async fn collection_info(&self, name: &str)
    -> Result<Option<CollectionInfo>, VectorStoreError>;

    /// Create the named collection. Succeeds if it already exists.
    async fn create_collection(&self, name: &str) -> Result<(), VectorStoreError>;

    /// Delete the named collection and all its records.
    async fn delete_collection(&self, name: &str) -> Result<(), VectorStoreError>;

    /// Insert records into the named collection in one batched write.
    async fn upsert(&self, collection: &str, records: Vec<Record>)
    -> Result<(), VectorStoreError>;

    /// Nearest-neighbor query against the named collection. Returns the
    /// store's ranked results unmodified.
    async fn query(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<QueryHit>, VectorStoreError>;
}

/// Build the process-wide store client.
///
/// Acquired once at startup and handed to the pipelines as a shared
/// capability; per-call reconnection is deliberately avoided.
pub fn connect(
    config: &VectorStoreConfig,
    dimension: u64,
) -> Result<Arc<dyn VectorStore>, VectorStoreError> {
    let store = QdrantStore::new(config, dimension)?;
    Ok(Arc::new(store))
}
