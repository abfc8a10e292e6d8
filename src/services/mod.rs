mod chunker;
mod collections;
mod embedding;
mod ingest;
mod preprocess;
mod query;
mod vector_store;

#[cfg(test)]
pub(crate) mod testing;

pub use chunker::TextChunker;
pub use collections::CollectionManager;
pub use embedding::{Embedder, HealthResponse, HttpEmbedder};
pub use ingest::IngestPipeline;
pub use preprocess::{FilePreprocessor, Preprocessor};
pub use query::QueryPipeline;
pub use vector_store::{CollectionInfo, QdrantStore, VectorStore, connect};
