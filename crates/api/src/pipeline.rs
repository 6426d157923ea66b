use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use extract::{EntityExtractor, EntitySpan};
use ingest::{Chunker, ChunkerConfig, TextNormalizer, decode, preview};
use store::GraphStore;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::retry::RetryPolicy;

/// Raw-text preview returned per uploaded file.
pub const PREVIEW_CHARS: usize = 500;
/// Deduplicated entities shown in the upload response.
pub const ENTITIES_PREVIEW: usize = 10;

#[derive(Debug, Serialize)]
pub struct UploadedDocument {
    pub id: Uuid,
    pub filename: String,
    pub preview: String,
    pub entities_preview: Vec<EntitySpan>,
}

/// Full ingestion pipeline for one uploaded file: decode, normalize, chunk,
/// recognize, dedup, persist.
///
/// The document node is written before entities attach, so a failure past
/// that point leaves a document without edges — reported as this file's
/// error and safe to re-ingest.
pub async fn process_file(
    store: &dyn GraphStore,
    extractor: &EntityExtractor,
    config: &AppConfig,
    filename: &str,
    data: &[u8],
) -> Result<UploadedDocument, ApiError> {
    let text = decode(filename, data)?;

    let normalized = TextNormalizer::new().normalize(&text);
    let chunker = Chunker::new(ChunkerConfig {
        max_words: config.pipeline.max_words,
    });
    let chunks = chunker.chunk(&normalized);

    let retry = RetryPolicy::from_config(&config.retry);
    let entities = retry
        .retry("entity recognition", || extractor.extract(&chunks))
        .await?;

    let doc_id = store.create_document(filename, &text).await?;
    store.attach_entities(doc_id, &entities).await?;

    info!(
        %doc_id,
        filename,
        chunks = chunks.len(),
        entities = entities.len(),
        "document ingested"
    );

    Ok(UploadedDocument {
        id: doc_id,
        filename: filename.to_string(),
        preview: preview(&text, PREVIEW_CHARS),
        entities_preview: entities.into_iter().take(ENTITIES_PREVIEW).collect(),
    })
}
