use async_trait::async_trait;
use extract::EntitySpan;
use neo4rs::{Graph, query};
use tracing::info;
use uuid::Uuid;

use crate::records::{DocumentGraph, DocumentRow, DocumentSummary, EntityRow};
use crate::view;
use crate::{GraphStore, StoreError};

/// Neo4j-backed graph store.
///
/// Uniqueness of `Document.id` and `(Entity.text, Entity.label)` is enforced
/// by constraints plus single-statement MERGE, so concurrent ingestion of a
/// shared entity cannot create two nodes.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, StoreError> {
        let graph = Graph::new(uri, user, password).await?;
        Ok(Self { graph })
    }

    /// Create the uniqueness constraints the merge semantics rely on.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        self.graph
            .run(query(
                "CREATE CONSTRAINT document_id IF NOT EXISTS \
                 FOR (d:Document) REQUIRE d.id IS UNIQUE",
            ))
            .await?;
        self.graph
            .run(query(
                "CREATE CONSTRAINT entity_identity IF NOT EXISTS \
                 FOR (e:Entity) REQUIRE (e.text, e.label) IS UNIQUE",
            ))
            .await?;
        info!("graph schema constraints ensured");
        Ok(())
    }

    async fn fetch_document(&self, doc_id: Uuid) -> Result<Option<DocumentRow>, StoreError> {
        let mut rows = self
            .graph
            .execute(
                query(
                    "MATCH (d:Document {id: $id}) \
                     RETURN id(d) AS node_id, d.id AS id, \
                            d.filename AS filename, d.content AS content",
                )
                .param("id", doc_id.to_string()),
            )
            .await?;

        match rows.next().await? {
            Some(row) => {
                let id: String = get_column(&row, "id")?;
                Ok(Some(DocumentRow {
                    node_id: get_column(&row, "node_id")?,
                    id: parse_uuid(&id)?,
                    filename: get_column(&row, "filename")?,
                    content: get_column(&row, "content")?,
                }))
            }
            None => Ok(None),
        }
    }

    async fn entity_rows(&self, doc_id: Uuid) -> Result<Vec<EntityRow>, StoreError> {
        let mut rows = self
            .graph
            .execute(
                query(
                    "MATCH (d:Document {id: $id})-[:HAS_ENTITY]->(e:Entity) \
                     RETURN id(e) AS node_id, e.text AS text, e.label AS label",
                )
                .param("id", doc_id.to_string()),
            )
            .await?;

        let mut entities = Vec::new();
        while let Some(row) = rows.next().await? {
            entities.push(EntityRow {
                node_id: get_column(&row, "node_id")?,
                text: get_column(&row, "text")?,
                label: get_column(&row, "label")?,
            });
        }
        Ok(entities)
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.graph.run(query("RETURN 1")).await?;
        Ok(())
    }

    async fn create_document(&self, filename: &str, content: &str) -> Result<Uuid, StoreError> {
        let doc_id = Uuid::new_v4();
        self.graph
            .run(
                query("CREATE (d:Document {id: $id, filename: $filename, content: $content})")
                    .param("id", doc_id.to_string())
                    .param("filename", filename.to_string())
                    .param("content", content.to_string()),
            )
            .await?;
        info!(%doc_id, filename, "document node created");
        Ok(doc_id)
    }

    async fn attach_entities(
        &self,
        doc_id: Uuid,
        entities: &[EntitySpan],
    ) -> Result<(), StoreError> {
        // An edge with a missing source must fail loudly; a bare MATCH would
        // just match nothing and silently drop the whole batch.
        if self.fetch_document(doc_id).await?.is_none() {
            return Err(StoreError::DocumentNotFound(doc_id));
        }

        for entity in entities {
            self.graph
                .run(
                    query(
                        "MATCH (d:Document {id: $doc_id}) \
                         MERGE (e:Entity {text: $text, label: $label}) \
                         MERGE (d)-[:HAS_ENTITY]->(e)",
                    )
                    .param("doc_id", doc_id.to_string())
                    .param("text", entity.text.to_string())
                    .param("label", entity.label.to_string()),
                )
                .await?;
        }
        info!(%doc_id, count = entities.len(), "entities attached");
        Ok(())
    }

    async fn document_graph(&self, doc_id: Uuid) -> Result<DocumentGraph, StoreError> {
        let doc = self
            .fetch_document(doc_id)
            .await?
            .ok_or(StoreError::DocumentNotFound(doc_id))?;
        let entities = self.entity_rows(doc_id).await?;
        Ok(view::assemble(&doc, &entities))
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, StoreError> {
        let mut rows = self
            .graph
            .execute(query(
                "MATCH (d:Document) \
                 RETURN d.id AS id, d.filename AS filename \
                 ORDER BY d.filename, d.id",
            ))
            .await?;

        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            let id: String = get_column(&row, "id")?;
            documents.push(DocumentSummary {
                id: parse_uuid(&id)?,
                title: get_column(&row, "filename")?,
            });
        }
        Ok(documents)
    }
}

fn get_column<T: serde::de::DeserializeOwned>(
    row: &neo4rs::Row,
    name: &str,
) -> Result<T, StoreError> {
    row.get::<T>(name)
        .map_err(|e| StoreError::Malformed(format!("column {name}: {e}")))
}

fn parse_uuid(value: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(value).map_err(|e| StoreError::Malformed(format!("document id: {e}")))
}
