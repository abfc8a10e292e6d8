use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contiguous span of text cut from one source document.
///
/// Produced by a [`Preprocessor`](crate::services::Preprocessor) and consumed
/// exactly once by the ingestion pipeline; never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    /// Provenance: path of the source document this chunk was cut from.
    pub source: String,
}

impl Chunk {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Provenance metadata attached to every persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Path of the source document.
    pub source: String,
    /// RFC 3339 timestamp of when the record was created.
    pub created_at: String,
}

/// The unit of persistence: chunk text plus its embedding, a globally unique
/// id, and provenance metadata. Immutable once created; re-ingesting the same
/// content produces new records with new ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub vector: Vec<f32>,
    pub metadata: RecordMetadata,
}

impl Record {
    /// Generate a fresh record id.
    ///
    /// Ids are random UUID v4 strings, never content hashes or counters, so
    /// concurrent ingestions cannot collide and identical content ingested
    /// twice yields distinct records.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Build a record from a chunk and its embedding, assigning a fresh id.
    pub fn from_chunk(chunk: Chunk, vector: Vec<f32>) -> Self {
        let created_at = chrono::Utc::now().to_rfc3339();
        Self {
            id: Self::generate_id(),
            text: chunk.text,
            vector,
            metadata: RecordMetadata {
                source: chunk.source,
                created_at,
            },
        }
    }
}

/// A handle to a named collection returned by
/// [`CollectionManager::get_or_create`](crate::services::CollectionManager::get_or_create).
///
/// The remote store addresses collections by name and existence is never
/// cached locally, so the handle certifies only that create-or-get ran
/// against the store at the time it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    name: String,
}

impl CollectionHandle {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
