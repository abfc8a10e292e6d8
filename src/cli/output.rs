use std::fmt::Write as FmtWrite;

use crate::models::{OutputFormat, QueryResults};

pub trait Formatter {
    fn format_query_results(&self, results: &QueryResults) -> String;
    fn format_status(&self, status: &StatusInfo) -> String;
    fn format_ingest_stats(&self, stats: &IngestStats) -> String;
    fn format_collection_info(&self, info: &CollectionStats) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub embedding_url: String,
    pub embedding_connected: bool,
    pub embedding_model: Option<String>,
    pub vector_store_url: String,
    pub vector_store_connected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    pub files_scanned: u64,
    pub files_ingested: u64,
    pub files_skipped: u64,
    pub records_written: u64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct CollectionStats {
    pub name: String,
    pub points_count: u64,
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_query_results(&self, results: &QueryResults) -> String {
        if results.is_empty() {
            return format!("No results found for: {}\n", results.query);
        }

        let mut output = String::new();
        writeln!(output, "Results for: \"{}\"", results.query).unwrap();
        writeln!(
            output,
            "Found {} results in {}ms (collection: {})\n",
            results.len(),
            results.duration_ms,
            results.collection
        )
        .unwrap();

        for (i, hit) in results.hits.iter().enumerate() {
            writeln!(output, "{}. [Score: {:.3}]", i + 1, hit.score).unwrap();
            writeln!(output, "   Source: {}", hit.source).unwrap();
            writeln!(output, "   ---").unwrap();

            let preview: String = hit.text.chars().take(200).collect();
            let preview = if hit.text.chars().count() > 200 {
                format!("{}...", preview)
            } else {
                preview
            };
            for line in preview.lines() {
                writeln!(output, "   {}", line).unwrap();
            }
            writeln!(output).unwrap();
        }

        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "Status").unwrap();
        writeln!(output, "------").unwrap();

        let embedding_status = if status.embedding_connected {
            "[CONNECTED]"
        } else {
            "[DISCONNECTED]"
        };
        writeln!(output, "Embedding:     {}", embedding_status).unwrap();
        writeln!(output, "  URL:         {}", status.embedding_url).unwrap();
        if let Some(ref model) = status.embedding_model {
            writeln!(output, "  Model:       {}", model).unwrap();
        }
        writeln!(output).unwrap();

        let store_status = if status.vector_store_connected {
            "[CONNECTED]"
        } else {
            "[DISCONNECTED]"
        };
        writeln!(output, "Vector Store:  {}", store_status).unwrap();
        writeln!(output, "  URL:         {}", status.vector_store_url).unwrap();

        output
    }

    fn format_ingest_stats(&self, stats: &IngestStats) -> String {
        let mut output = String::new();
        writeln!(output, "Ingestion Complete").unwrap();
        writeln!(output, "------------------").unwrap();
        writeln!(output, "Files scanned: {}", stats.files_scanned).unwrap();
        writeln!(output, "Files ingested: {}", stats.files_ingested).unwrap();
        writeln!(output, "Files skipped: {}", stats.files_skipped).unwrap();
        writeln!(output, "Records written: {}", stats.records_written).unwrap();
        writeln!(output, "Duration: {}ms", stats.duration_ms).unwrap();
        output
    }

    fn format_collection_info(&self, info: &CollectionStats) -> String {
        let mut output = String::new();
        writeln!(output, "Collection: {}", info.name).unwrap();
        writeln!(output, "  Records: {}", info.points_count).unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}\n", error)
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, json: &serde_json::Value) -> String {
        if self.pretty {
            serde_json::to_string_pretty(json).unwrap()
        } else {
            serde_json::to_string(json).unwrap()
        }
    }
}

impl Formatter for JsonFormatter {
    fn format_query_results(&self, results: &QueryResults) -> String {
        if self.pretty {
            serde_json::to_string_pretty(results)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(results).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let json = serde_json::json!({
            "embedding": {
                "url": status.embedding_url,
                "connected": status.embedding_connected,
                "model": status.embedding_model,
            },
            "vector_store": {
                "url": status.vector_store_url,
                "connected": status.vector_store_connected,
            }
        });
        self.render(&json)
    }

    fn format_ingest_stats(&self, stats: &IngestStats) -> String {
        let json = serde_json::json!({
            "files_scanned": stats.files_scanned,
            "files_ingested": stats.files_ingested,
            "files_skipped": stats.files_skipped,
            "records_written": stats.records_written,
            "duration_ms": stats.duration_ms,
        });
        self.render(&json)
    }

    fn format_collection_info(&self, info: &CollectionStats) -> String {
        let json = serde_json::json!({
            "collection": info.name,
            "points_count": info.points_count,
        });
        self.render(&json)
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({"message": message}).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({"error": error}).to_string()
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueryHit;

    fn sample_results() -> QueryResults {
        QueryResults::new(
            "alpha".to_string(),
            "docs".to_string(),
            vec![QueryHit {
                id: "id-1".to_string(),
                score: 0.9,
                text: "alpha content".to_string(),
                source: "/corpus/a.txt".to_string(),
            }],
            12,
        )
    }

    #[test]
    fn test_text_formatter_includes_source() {
        let output = TextFormatter.format_query_results(&sample_results());
        assert!(output.contains("/corpus/a.txt"));
        assert!(output.contains("alpha content"));
    }

    #[test]
    fn test_text_formatter_empty_results() {
        let empty = QueryResults::new("x".to_string(), "docs".to_string(), vec![], 1);
        let output = TextFormatter.format_query_results(&empty);
        assert!(output.contains("No results"));
    }

    #[test]
    fn test_json_formatter_is_valid_json() {
        let output = JsonFormatter::new(false).format_query_results(&sample_results());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["collection"], "docs");
        assert_eq!(parsed["hits"][0]["id"], "id-1");
    }
}
