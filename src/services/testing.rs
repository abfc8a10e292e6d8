//! Stub collaborators for pipeline tests.
//!
//! The pipelines take their collaborators as trait objects precisely so
//! these stand-ins can replace the network-backed implementations.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{EmbeddingError, PreprocessError, VectorStoreError};
use crate::models::{Chunk, QueryHit, Record};
use crate::services::{CollectionInfo, Embedder, Preprocessor, VectorStore};

/// Preprocessor that returns a fixed chunk sequence, tagged with whatever
/// path it is asked to preprocess.
pub struct StubPreprocessor {
    texts: Vec<String>,
    failure: Option<String>,
}

impl StubPreprocessor {
    pub fn with_chunks<T: Into<String>>(texts: Vec<T>) -> Self {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            texts: Vec::new(),
            failure: Some(message.to_string()),
        }
    }
}

impl Preprocessor for StubPreprocessor {
    fn preprocess(&self, path: &Path) -> Result<Vec<Chunk>, PreprocessError> {
        if let Some(ref message) = self.failure {
            return Err(PreprocessError::ReadError(message.clone()));
        }
        let source = path.display().to_string();
        Ok(self
            .texts
            .iter()
            .map(|text| Chunk::new(text.clone(), source.clone()))
            .collect())
    }
}

/// Embedder with a known mapping from text to vector.
pub struct StubEmbedder {
    truncate_to: Option<usize>,
}

impl StubEmbedder {
    /// Maps each text to the 1-dimensional vector `[len(text)]`.
    pub fn text_length() -> Self {
        Self { truncate_to: None }
    }

    /// Misbehaving embedder that drops all but the first `n` vectors.
    pub fn truncating(n: usize) -> Self {
        Self {
            truncate_to: Some(n),
        }
    }

    fn embed(text: &str) -> Vec<f32> {
        vec![text.len() as f32]
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors: Vec<Vec<f32>> = texts.iter().map(|t| Self::embed(t)).collect();
        if let Some(n) = self.truncate_to {
            vectors.truncate(n);
        }
        Ok(vectors)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(Self::embed(text))
    }
}

/// In-memory vector store keyed by collection name.
///
/// Ranks query results by Euclidean distance; ties keep insertion order.
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }

    /// Records currently held by the named collection, in insertion order.
    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt()
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn health_check(&self) -> Result<bool, VectorStoreError> {
        Ok(true)
    }

    async fn collection_info(
        &self,
        name: &str,
    ) -> Result<Option<CollectionInfo>, VectorStoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(name)
            .map(|records| CollectionInfo {
                points_count: records.len() as u64,
            }))
    }

    async fn create_collection(&self, name: &str) -> Result<(), VectorStoreError> {
        self.collections
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<(), VectorStoreError> {
        self.collections.lock().unwrap().remove(name);
        Ok(())
    }

    async fn upsert(
        &self,
        collection: &str,
        records: Vec<Record>,
    ) -> Result<(), VectorStoreError> {
        let mut collections = self.collections.lock().unwrap();
        let existing = collections
            .get_mut(collection)
            .ok_or_else(|| VectorStoreError::UpsertError(format!("no collection {collection}")))?;
        existing.extend(records);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<QueryHit>, VectorStoreError> {
        let collections = self.collections.lock().unwrap();
        let records = collections
            .get(collection)
            .ok_or_else(|| VectorStoreError::QueryError(format!("no collection {collection}")))?;

        let mut scored: Vec<QueryHit> = records
            .iter()
            .map(|record| QueryHit {
                id: record.id.clone(),
                score: -Self::distance(&record.vector, &vector),
                text: record.text.clone(),
                source: record.metadata.source.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        scored.truncate(limit as usize);
        Ok(scored)
    }
}
