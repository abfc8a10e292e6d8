//! Ingestion pipeline: file path in, persisted records out.

use std::path::Path;
use std::sync::Arc;

use crate::error::{EmbeddingError, IngestError};
use crate::models::Record;
use crate::services::{CollectionManager, Embedder, Preprocessor, VectorStore};

/// Orchestrates preprocess → embed → id assignment → upsert for one
/// named collection.
///
/// Each call is strictly sequential internally and surfaces the first
/// failure without retrying; a failed call writes nothing. Retrying a whole
/// call is safe but produces duplicate records with fresh ids.
#[derive(Clone)]
pub struct IngestPipeline {
    preprocessor: Arc<dyn Preprocessor>,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    collections: CollectionManager,
}

impl IngestPipeline {
    pub fn new(
        preprocessor: Arc<dyn Preprocessor>,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        let collections = CollectionManager::new(store.clone());
        Self {
            preprocessor,
            embedder,
            store,
            collections,
        }
    }

    /// Ingest one file into the named collection.
    ///
    /// Returns the number of records written. Chunk-to-vector correspondence
    /// is positional through the single batched embedding call.
    pub async fn ingest(&self, collection: &str, path: &Path) -> Result<u64, IngestError> {
        let chunks = self.preprocessor.preprocess(path)?;

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(texts).await?;

        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::LengthMismatch {
                sent: chunks.len(),
                received: vectors.len(),
            }
            .into());
        }

        let records: Vec<Record> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| Record::from_chunk(chunk, vector))
            .collect();
        let count = records.len() as u64;

        let handle = self.collections.get_or_create(collection).await?;
        self.store.upsert(handle.name(), records).await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreprocessError;
    use crate::services::testing::{MemoryStore, StubEmbedder, StubPreprocessor};
    use std::collections::HashSet;

    fn pipeline_with(
        preprocessor: StubPreprocessor,
        embedder: StubEmbedder,
    ) -> (IngestPipeline, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let pipeline = IngestPipeline::new(
            Arc::new(preprocessor),
            Arc::new(embedder),
            store.clone(),
        );
        (pipeline, store)
    }

    #[tokio::test]
    async fn test_ingest_writes_one_record_per_chunk() {
        let (pipeline, store) = pipeline_with(
            StubPreprocessor::with_chunks(vec!["alpha", "beta"]),
            StubEmbedder::text_length(),
        );

        let count = pipeline
            .ingest("docs", Path::new("/corpus/a.txt"))
            .await
            .unwrap();
        assert_eq!(count, 2);

        let records = store.records("docs");
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.metadata.source, "/corpus/a.txt");
        }
    }

    #[tokio::test]
    async fn test_ingest_assigns_distinct_ids() {
        let (pipeline, store) = pipeline_with(
            StubPreprocessor::with_chunks(vec!["one", "two", "three"]),
            StubEmbedder::text_length(),
        );

        pipeline.ingest("docs", Path::new("/f")).await.unwrap();

        let ids: HashSet<String> = store.records("docs").iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_chunk_to_vector_order_is_preserved() {
        // Stub embedder maps text[i] -> [len(text[i])], so record i's vector
        // must equal the length of chunk i's text.
        let (pipeline, store) = pipeline_with(
            StubPreprocessor::with_chunks(vec!["alpha", "beta"]),
            StubEmbedder::text_length(),
        );

        pipeline.ingest("docs", Path::new("/f")).await.unwrap();

        let records = store.records("docs");
        assert_eq!(records[0].text, "alpha");
        assert_eq!(records[0].vector, vec![5.0]);
        assert_eq!(records[1].text, "beta");
        assert_eq!(records[1].vector, vec![4.0]);
    }

    #[tokio::test]
    async fn test_reingestion_duplicates_with_new_ids() {
        let (pipeline, store) = pipeline_with(
            StubPreprocessor::with_chunks(vec!["same"]),
            StubEmbedder::text_length(),
        );

        pipeline.ingest("docs", Path::new("/f")).await.unwrap();
        pipeline.ingest("docs", Path::new("/f")).await.unwrap();

        let records = store.records("docs");
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
    }

    #[tokio::test]
    async fn test_preprocess_failure_writes_nothing() {
        let (pipeline, store) = pipeline_with(
            StubPreprocessor::failing("unreadable"),
            StubEmbedder::text_length(),
        );

        let err = pipeline.ingest("docs", Path::new("/f")).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::PreprocessError(PreprocessError::ReadError(_))
        ));
        assert!(store.records("docs").is_empty());
    }

    #[tokio::test]
    async fn test_embedding_length_mismatch_is_fatal() {
        let (pipeline, store) = pipeline_with(
            StubPreprocessor::with_chunks(vec!["alpha", "beta"]),
            StubEmbedder::truncating(1),
        );

        let err = pipeline.ingest("docs", Path::new("/f")).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::EmbeddingError(EmbeddingError::LengthMismatch {
                sent: 2,
                received: 1
            })
        ));
        assert!(store.records("docs").is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_ingests_zero_records() {
        let (pipeline, store) = pipeline_with(
            StubPreprocessor::with_chunks(Vec::<&str>::new()),
            StubEmbedder::text_length(),
        );

        let count = pipeline.ingest("docs", Path::new("/f")).await.unwrap();
        assert_eq!(count, 0);
        // The collection still gets created, matching create-or-get semantics
        assert!(store.collection_info("docs").await.unwrap().is_some());
        assert!(store.records("docs").is_empty());
    }
}
