use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Document node as read back from the store.
#[derive(Debug, Clone)]
pub struct DocumentRow {
    pub node_id: i64,
    pub id: Uuid,
    pub filename: String,
    pub content: String,
}

/// An Entity node reachable from a document.
#[derive(Debug, Clone)]
pub struct EntityRow {
    pub node_id: i64,
    pub text: String,
    pub label: String,
}

/// One node of the visualization graph. `id` is the underlying store node
/// identity, not the document UUID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: i64,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: i64,
    pub target: i64,
    pub label: String,
}

/// The node/edge view served to the visualization client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentGraph {
    pub id: Uuid,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Catalog entry: document id plus its display title (the filename).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub title: String,
}
