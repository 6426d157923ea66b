pub mod memory;
pub mod neo4j;
pub mod records;
pub mod view;

pub use memory::MemoryStore;
pub use neo4j::Neo4jStore;
pub use records::{DocumentGraph, DocumentRow, DocumentSummary, EntityRow, GraphEdge, GraphNode};

use async_trait::async_trait;
use extract::EntitySpan;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    DocumentNotFound(Uuid),
    #[error("graph store error: {0}")]
    Backend(#[from] neo4rs::Error),
    #[error("malformed store record: {0}")]
    Malformed(String),
}

/// Persistence boundary for the document/entity graph.
///
/// Entity identity is global: implementations must guarantee at most one
/// Entity node per (text, label) and at most one HAS_ENTITY edge per
/// (document, entity) pair, even under concurrent ingestion. That atomicity
/// belongs to the store; callers never emulate it with read-then-write.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Allocate a fresh id and persist a Document node. Documents are
    /// immutable once written.
    async fn create_document(&self, filename: &str, content: &str) -> Result<Uuid, StoreError>;

    /// Upsert each entity by (text, label) and merge a HAS_ENTITY edge from
    /// the document. Idempotent; fails with `DocumentNotFound` rather than
    /// writing an orphan edge when the document does not exist.
    async fn attach_entities(
        &self,
        doc_id: Uuid,
        entities: &[EntitySpan],
    ) -> Result<(), StoreError>;

    /// The node/edge view for one document. `DocumentNotFound` only when the
    /// id itself is unknown; a document with no entities yields a single-node
    /// graph.
    async fn document_graph(&self, doc_id: Uuid) -> Result<DocumentGraph, StoreError>;

    /// Every stored document, ordered by filename ascending, ties broken by
    /// id. An empty store yields an empty list.
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, StoreError>;
}
