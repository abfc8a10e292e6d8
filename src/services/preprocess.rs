//! Document preprocessing: file path in, ordered chunks out.

use std::path::Path;

use crate::error::PreprocessError;
use crate::models::{Chunk, IngestConfig};
use crate::services::TextChunker;
use crate::utils::{is_text_file, read_file_content};

/// Turns a source document into an ordered sequence of coherent text chunks.
///
/// The ingestion pipeline takes this as an injected capability so tests can
/// substitute a stub. Ordering must be deterministic for a given file.
pub trait Preprocessor: Send + Sync {
    fn preprocess(&self, path: &Path) -> Result<Vec<Chunk>, PreprocessError>;
}

/// Default preprocessor: reads a text file from disk and splits it into
/// overlapping chunks tagged with the file's path.
#[derive(Debug, Clone)]
pub struct FilePreprocessor {
    chunker: TextChunker,
    max_file_size: u64,
}

impl FilePreprocessor {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            chunker: TextChunker::new(config),
            max_file_size: config.max_file_size,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&IngestConfig::default())
    }
}

impl Preprocessor for FilePreprocessor {
    fn preprocess(&self, path: &Path) -> Result<Vec<Chunk>, PreprocessError> {
        if !is_text_file(path) {
            return Err(PreprocessError::NotTextFile(path.display().to_string()));
        }

        let content = read_file_content(path, self.max_file_size).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                PreprocessError::FileTooLarge {
                    size,
                    max: self.max_file_size,
                }
            } else {
                PreprocessError::ReadError(format!("{}: {}", path.display(), e))
            }
        })?;

        let source = path.display().to_string();
        Ok(self
            .chunker
            .chunk(&content)
            .into_iter()
            .map(|text| Chunk::new(text, source.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_preprocess_tags_chunks_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Some short document content.").unwrap();

        let preprocessor = FilePreprocessor::with_defaults();
        let chunks = preprocessor.preprocess(&path).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Some short document content.");
        assert_eq!(chunks[0].source, path.display().to_string());
    }

    #[test]
    fn test_preprocess_missing_file() {
        let preprocessor = FilePreprocessor::with_defaults();
        let err = preprocessor
            .preprocess(Path::new("/nonexistent/file.txt"))
            .unwrap_err();
        assert!(matches!(err, PreprocessError::ReadError(_)));
    }

    #[test]
    fn test_preprocess_rejects_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.png");
        std::fs::write(&path, [0u8, 1, 2, 3]).unwrap();

        let preprocessor = FilePreprocessor::with_defaults();
        let err = preprocessor.preprocess(&path).unwrap_err();
        assert!(matches!(err, PreprocessError::NotTextFile(_)));
    }

    #[test]
    fn test_preprocess_rejects_oversized_file() {
        let config = IngestConfig {
            max_file_size: 8,
            ..Default::default()
        };
        let preprocessor = FilePreprocessor::new(&config);

        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"far too much content").unwrap();

        let err = preprocessor.preprocess(file.path()).unwrap_err();
        assert!(matches!(err, PreprocessError::FileTooLarge { .. }));
    }

    #[test]
    fn test_preprocess_ordering_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "Paragraph one.\n\nParagraph two.\n\nParagraph three.").unwrap();

        let preprocessor = FilePreprocessor::with_defaults();
        let first = preprocessor.preprocess(&path).unwrap();
        let second = preprocessor.preprocess(&path).unwrap();

        let first_texts: Vec<_> = first.iter().map(|c| c.text.clone()).collect();
        let second_texts: Vec<_> = second.iter().map(|c| c.text.clone()).collect();
        assert_eq!(first_texts, second_texts);
    }
}
