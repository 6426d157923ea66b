use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use extract::EntitySpan;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::records::{DocumentGraph, DocumentRow, DocumentSummary, EntityRow};
use crate::view;
use crate::{GraphStore, StoreError};

/// In-process store honoring the same merge contract as the Neo4j backend:
/// one Entity node per (text, label), one edge per (document, entity).
///
/// Backs tests and lets the service run without a database.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_node_id: i64,
    documents: Vec<DocumentRow>,
    entities: Vec<EntityRow>,
    entity_ids: HashMap<EntitySpan, i64>,
    edges: HashSet<(i64, i64)>,
}

impl Inner {
    fn alloc_node_id(&mut self) -> i64 {
        let id = self.next_node_id;
        self.next_node_id += 1;
        id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of Entity nodes, for asserting global identity in tests.
    pub async fn entity_count(&self) -> usize {
        self.inner.read().await.entities.len()
    }

    /// Total number of HAS_ENTITY edges.
    pub async fn edge_count(&self) -> usize {
        self.inner.read().await.edges.len()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_document(&self, filename: &str, content: &str) -> Result<Uuid, StoreError> {
        let mut inner = self.inner.write().await;
        let node_id = inner.alloc_node_id();
        let id = Uuid::new_v4();
        inner.documents.push(DocumentRow {
            node_id,
            id,
            filename: filename.to_string(),
            content: content.to_string(),
        });
        Ok(id)
    }

    async fn attach_entities(
        &self,
        doc_id: Uuid,
        entities: &[EntitySpan],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let doc_node = inner
            .documents
            .iter()
            .find(|d| d.id == doc_id)
            .map(|d| d.node_id)
            .ok_or(StoreError::DocumentNotFound(doc_id))?;

        for span in entities {
            let entity_node = if let Some(id) = inner.entity_ids.get(span).copied() {
                id
            } else {
                let id = inner.alloc_node_id();
                inner.entity_ids.insert(span.clone(), id);
                inner.entities.push(EntityRow {
                    node_id: id,
                    text: span.text.clone(),
                    label: span.label.clone(),
                });
                id
            };
            inner.edges.insert((doc_node, entity_node));
        }
        Ok(())
    }

    async fn document_graph(&self, doc_id: Uuid) -> Result<DocumentGraph, StoreError> {
        let inner = self.inner.read().await;
        let doc = inner
            .documents
            .iter()
            .find(|d| d.id == doc_id)
            .ok_or(StoreError::DocumentNotFound(doc_id))?;

        let entities: Vec<EntityRow> = inner
            .entities
            .iter()
            .filter(|e| inner.edges.contains(&(doc.node_id, e.node_id)))
            .cloned()
            .collect();

        Ok(view::assemble(doc, &entities))
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, StoreError> {
        let inner = self.inner.read().await;
        let mut documents: Vec<DocumentSummary> = inner
            .documents
            .iter()
            .map(|d| DocumentSummary {
                id: d.id,
                title: d.filename.clone(),
            })
            .collect();
        documents.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(documents)
    }
}
