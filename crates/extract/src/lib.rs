pub mod dedup;
pub mod recognizer;
pub mod schema;

pub use dedup::dedup_spans;
pub use recognizer::{EntityRecognizer, HttpRecognizer, RecognizerError};
pub use schema::EntitySpan;

use std::sync::Arc;

/// Runs one document's chunks through the recognizer and deduplicates the
/// combined span list.
pub struct EntityExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl EntityExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Chunks are processed in order, so downstream previews see spans in
    /// first-occurrence order.
    pub async fn extract(&self, chunks: &[String]) -> Result<Vec<EntitySpan>, RecognizerError> {
        let mut spans = Vec::new();
        for chunk in chunks {
            spans.extend(self.recognizer.recognize(chunk).await?);
        }
        tracing::debug!(
            chunks = chunks.len(),
            spans = spans.len(),
            "recognition complete"
        );
        Ok(dedup_spans(spans))
    }
}
