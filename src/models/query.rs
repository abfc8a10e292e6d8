//! Query-related models for results and output formats.

use serde::{Deserialize, Serialize};

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// Machine-parseable JSON format
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// A single ranked hit returned by the vector store.
///
/// The ranking is the store's own; the pipeline never reorders or filters it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryHit {
    /// Id of the matching record
    pub id: String,

    /// Store-assigned similarity score
    pub score: f32,

    /// Record text
    pub text: String,

    /// Source document path
    pub source: String,
}

/// Ranked results for one query, in the order the store returned them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResults {
    /// Query text that was executed
    pub query: String,

    /// Collection that was queried
    pub collection: String,

    /// Ranked hits
    pub hits: Vec<QueryHit>,

    /// Query execution time in milliseconds
    pub duration_ms: u64,
}

impl QueryResults {
    pub fn new(query: String, collection: String, hits: Vec<QueryHit>, duration_ms: u64) -> Self {
        Self {
            query,
            collection,
            hits,
            duration_ms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}
