//! Text chunking with overlap for optimal embedding.

use crate::models::IngestConfig;
use crate::utils::has_meaningful_content;

/// Text chunker that splits document content into overlapping segments.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Target chunk size in characters (approximate tokens * 4)
    chunk_size: usize,
    /// Overlap size in characters
    overlap: usize,
}

impl TextChunker {
    /// Create a new text chunker with the given configuration.
    pub fn new(config: &IngestConfig) -> Self {
        // Convert tokens to approximate characters (1 token ≈ 4 characters)
        let chunk_size = (config.chunk_size as usize) * 4;
        let overlap = (config.chunk_overlap as usize) * 4;
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Create a chunker with default settings.
    pub fn with_defaults() -> Self {
        Self::new(&IngestConfig::default())
    }

    /// Split content into an ordered sequence of coherent chunk texts.
    ///
    /// Ordering is deterministic for a given input. Segments that carry no
    /// meaningful content are dropped.
    pub fn chunk(&self, content: &str) -> Vec<String> {
        if content.is_empty() {
            return Vec::new();
        }

        // Content smaller than one chunk goes through whole
        if content.len() <= self.chunk_size {
            return vec![content.to_string()];
        }

        self.split_with_overlap(content)
            .into_iter()
            .filter(|segment| has_meaningful_content(segment))
            .collect()
    }

    /// Split content into overlapping segments at natural break points.
    fn split_with_overlap(&self, content: &str) -> Vec<String> {
        let mut segments = Vec::new();
        let chars: Vec<char> = content.chars().collect();
        let total_chars = chars.len();

        if total_chars == 0 {
            return segments;
        }

        let step = if self.chunk_size > self.overlap {
            self.chunk_size - self.overlap
        } else {
            self.chunk_size
        };

        let mut start = 0;
        while start < total_chars {
            let end = (start + self.chunk_size).min(total_chars);
            let adjusted_end = self.find_break_point(&chars, end, total_chars);

            segments.push(chars[start..adjusted_end].iter().collect());

            if adjusted_end >= total_chars {
                break;
            }

            start += step;
            if start >= total_chars {
                break;
            }
        }

        segments
    }

    /// Find a natural break point near the target end position.
    fn find_break_point(&self, chars: &[char], target_end: usize, total: usize) -> usize {
        if target_end >= total {
            return total;
        }

        // Look for a natural break point within the last 20% of the chunk
        let search_start = target_end.saturating_sub(self.chunk_size / 5);
        let search_range = &chars[search_start..target_end];

        // Priority: double newline > single newline > period+space > space
        let mut best_break = None;
        let mut last_newline = None;
        let mut last_sentence = None;
        let mut last_space = None;

        for (i, c) in search_range.iter().enumerate() {
            let pos = search_start + i;
            match c {
                '\n' => {
                    // Check for double newline (paragraph break)
                    if i > 0 && search_range.get(i.saturating_sub(1)) == Some(&'\n') {
                        best_break = Some(pos + 1);
                    }
                    last_newline = Some(pos + 1);
                }
                '.' | '!' | '?' => {
                    // Sentence end followed by space or newline
                    if search_range.get(i + 1).is_some_and(|c| c.is_whitespace()) {
                        last_sentence = Some(pos + 1);
                    }
                }
                ' ' | '\t' => {
                    last_space = Some(pos + 1);
                }
                _ => {}
            }
        }

        best_break
            .or(last_newline)
            .or(last_sentence)
            .or(last_space)
            .unwrap_or(target_end)
    }
}
