mod config;
mod query;
mod record;

pub use config::{
    Config, DEFAULT_COLLECTION, DEFAULT_EMBEDDING_URL, DEFAULT_QDRANT_URL, EmbeddingConfig,
    IngestConfig, QueryConfig, VectorStoreConfig,
};
pub use query::{OutputFormat, QueryHit, QueryResults};
pub use record::{Chunk, CollectionHandle, Record, RecordMetadata};
