pub struct ChunkerConfig {
    pub max_words: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self { max_words: 500 }
    }
}

/// Splits normalized text into bounded word windows.
///
/// The bound exists because the entity recognizer has a practical input-size
/// ceiling; a mention straddling a window boundary is an accepted precision
/// loss.
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Group words into contiguous, non-overlapping windows of at most
    /// `max_words`, preserving order. The final window may be shorter.
    /// Empty text produces no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        words
            .chunks(self.config.max_words.max(1))
            .map(|window| window.join(" "))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_count(chunk: &str) -> usize {
        chunk.split_whitespace().count()
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = Chunker::new(ChunkerConfig::default());
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunker = Chunker::new(ChunkerConfig::default());
        let chunks = chunker.chunk("just a few words");
        assert_eq!(chunks, vec!["just a few words".to_string()]);
    }

    #[test]
    fn twelve_hundred_words_split_500_500_200() {
        let text = (0..1200)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let chunker = Chunker::new(ChunkerConfig { max_words: 500 });
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(word_count(&chunks[0]), 500);
        assert_eq!(word_count(&chunks[1]), 500);
        assert_eq!(word_count(&chunks[2]), 200);
    }

    #[test]
    fn chunks_reassemble_to_the_original_words() {
        let text = (0..47).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let chunker = Chunker::new(ChunkerConfig { max_words: 10 });
        let chunks = chunker.chunk(&text);

        for chunk in &chunks {
            assert!(word_count(chunk) <= 10);
        }
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, text);
    }
}
