use std::collections::HashSet;

use ingest::preview;

use crate::records::{DocumentGraph, DocumentRow, EntityRow, GraphEdge, GraphNode};

pub const HAS_ENTITY: &str = "HAS_ENTITY";

const DESCRIPTION_CHARS: usize = 200;

/// Assemble the visualization view for one document.
///
/// Nodes are keyed by store identity: the document node appears exactly once
/// no matter how many edges reference it. An entity-less document yields a
/// single-node graph with no edges.
pub fn assemble(doc: &DocumentRow, entities: &[EntityRow]) -> DocumentGraph {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(entities.len() + 1);
    let mut edges = Vec::with_capacity(entities.len());

    seen.insert(doc.node_id);
    nodes.push(GraphNode {
        id: doc.node_id,
        label: "Document".to_string(),
        description: preview(&doc.content, DESCRIPTION_CHARS),
    });

    for entity in entities {
        if seen.insert(entity.node_id) {
            let label = if entity.label.is_empty() {
                "Entity".to_string()
            } else {
                entity.label.clone()
            };
            nodes.push(GraphNode {
                id: entity.node_id,
                label,
                description: entity.text.clone(),
            });
        }
        edges.push(GraphEdge {
            source: doc.node_id,
            target: entity.node_id,
            label: HAS_ENTITY.to_string(),
        });
    }

    DocumentGraph {
        id: doc.id,
        nodes,
        edges,
    }
}
