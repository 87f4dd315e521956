//! In-memory `GraphStore`, backed by a single `RwLock`-guarded snapshot so a
//! batch either commits in full or leaves the store untouched.

use crate::domain::edge::Edge;
use crate::domain::edge_kind::EdgeKind;
use crate::domain::node::{Node, NodeId};
use crate::domain::node_kind::NodeKind;
use crate::domain::ports::{BatchSummary, GraphOp, GraphStore};
use crate::error::{Result, StorageError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Snapshot {
    nodes: HashMap<NodeId, Node>,
    // keyed by (source, kind) and (target, kind) for cheap outgoing/incoming lookups
    edges: Vec<Edge>,
}

#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    snapshot: RwLock<Snapshot>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every op against the given snapshot without mutating it.
    /// Dangling endpoints are checked against the union of nodes already
    /// present and nodes this same batch is about to upsert, so a file's
    /// nodes and edges can be supplied together regardless of order. A node
    /// upsert colliding with an existing (or earlier-in-batch) id whose
    /// source file differs is rejected as an `IdentifierClash` rather than
    /// silently moving the node to a new file.
    fn validate(snapshot: &Snapshot, ops: &[GraphOp]) -> Result<()> {
        let mut known: std::collections::HashSet<&str> =
            snapshot.nodes.keys().map(String::as_str).collect();
        let mut files: HashMap<&str, &str> = snapshot
            .nodes
            .iter()
            .map(|(id, node)| (id.as_str(), node.file.as_str()))
            .collect();
        for op in ops {
            if let GraphOp::UpsertNode(node) = op {
                if let Some(existing_file) = files.get(node.id.as_str()) {
                    if *existing_file != node.file {
                        return Err(StorageError::IdentifierClash {
                            identifier: node.id.clone(),
                            existing: existing_file.to_string(),
                            new: node.file.clone(),
                        });
                    }
                }
                files.insert(node.id.as_str(), node.file.as_str());
                known.insert(node.id.as_str());
            }
        }
        for op in ops {
            match op {
                GraphOp::UpsertNode(_) => {}
                GraphOp::UpsertEdge(edge) => {
                    if !known.contains(edge.source_id.as_str()) {
                        return Err(StorageError::DanglingEndpoint(edge.source_id.clone()));
                    }
                    if !known.contains(edge.target_id.as_str()) {
                        return Err(StorageError::DanglingEndpoint(edge.target_id.clone()));
                    }
                }
                GraphOp::DeleteFile(_) => {}
                GraphOp::RemoveNode(_) => {}
                GraphOp::RemoveEdge { .. } => {}
            }
        }
        Ok(())
    }

    /// Union-with-overwrite of two metadata maps: `new` wins on key conflict.
    fn merge_metadata(
        existing: HashMap<String, serde_json::Value>,
        new: HashMap<String, serde_json::Value>,
    ) -> HashMap<String, serde_json::Value> {
        let mut merged = existing;
        merged.extend(new);
        merged
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn apply(&self, ops: Vec<GraphOp>) -> Result<BatchSummary> {
        let mut snapshot = self.snapshot.write();
        Self::validate(&snapshot, &ops)?;

        let mut summary = BatchSummary::default();
        for op in ops {
            match op {
                GraphOp::UpsertNode(mut node) => {
                    if let Some(existing) = snapshot.nodes.remove(&node.id) {
                        node.metadata = Self::merge_metadata(existing.metadata, node.metadata);
                    }
                    snapshot.nodes.insert(node.id.clone(), node);
                    summary.nodes_upserted += 1;
                }
                GraphOp::UpsertEdge(mut edge) => {
                    if let Some(existing) = snapshot.edges.iter().position(|e| {
                        e.source_id == edge.source_id
                            && e.target_id == edge.target_id
                            && e.kind == edge.kind
                    }) {
                        let existing = snapshot.edges.remove(existing);
                        edge.metadata = Self::merge_metadata(existing.metadata, edge.metadata);
                    }
                    snapshot.edges.push(edge);
                    summary.edges_upserted += 1;
                }
                GraphOp::DeleteFile(file) => {
                    let removed_ids: Vec<NodeId> = snapshot
                        .nodes
                        .iter()
                        .filter(|(_, n)| n.file == file)
                        .map(|(id, _)| id.clone())
                        .collect();
                    for id in &removed_ids {
                        snapshot.nodes.remove(id);
                    }
                    summary.nodes_removed += removed_ids.len();
                    let before = snapshot.edges.len();
                    let removed_set: std::collections::HashSet<&NodeId> =
                        removed_ids.iter().collect();
                    snapshot.edges.retain(|e| {
                        !removed_set.contains(&e.source_id) && !removed_set.contains(&e.target_id)
                    });
                    summary.edges_removed += before - snapshot.edges.len();
                }
                GraphOp::RemoveNode(id) => {
                    if snapshot.nodes.remove(&id).is_some() {
                        summary.nodes_removed += 1;
                    }
                    let before = snapshot.edges.len();
                    snapshot
                        .edges
                        .retain(|e| e.source_id != id && e.target_id != id);
                    summary.edges_removed += before - snapshot.edges.len();
                }
                GraphOp::RemoveEdge {
                    source_id,
                    target_id,
                    kind,
                } => {
                    let before = snapshot.edges.len();
                    snapshot.edges.retain(|e| {
                        !(e.source_id == source_id && e.target_id == target_id && e.kind == kind)
                    });
                    summary.edges_removed += before - snapshot.edges.len();
                }
            }
        }
        Ok(summary)
    }

    async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        Ok(self.snapshot.read().nodes.get(id).cloned())
    }

    async fn nodes_by_kind(&self, kind: NodeKind) -> Result<Vec<Node>> {
        Ok(self
            .snapshot
            .read()
            .nodes
            .values()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect())
    }

    async fn outgoing(&self, id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>> {
        Ok(self
            .snapshot
            .read()
            .edges
            .iter()
            .filter(|e| e.source_id == id && kind.map_or(true, |k| e.kind == k))
            .cloned()
            .collect())
    }

    async fn incoming(&self, id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>> {
        Ok(self
            .snapshot
            .read()
            .edges
            .iter()
            .filter(|e| e.target_id == id && kind.map_or(true, |k| e.kind == k))
            .cloned()
            .collect())
    }

    async fn all_nodes(&self) -> Result<Vec<Node>> {
        Ok(self.snapshot.read().nodes.values().cloned().collect())
    }

    async fn all_edges(&self) -> Result<Vec<Edge>> {
        Ok(self.snapshot.read().edges.clone())
    }

    async fn node_count(&self) -> Result<usize> {
        Ok(self.snapshot.read().nodes.len())
    }

    async fn edge_count(&self) -> Result<usize> {
        Ok(self.snapshot.read().edges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::Node;
    use crate::domain::rdf_address::RdfAddress;

    fn file_node(project: &str, file: &str) -> Node {
        Node::new(RdfAddress::for_file(project, file), file)
    }

    #[tokio::test]
    async fn rejects_dangling_endpoint_without_mutating_store() {
        let store = InMemoryGraphStore::new();
        let a = file_node("p", "a.ts");
        let err = store
            .apply(vec![GraphOp::UpsertEdge(Edge::new(
                a.id.clone(),
                "p/missing.ts",
                EdgeKind::DependsOn,
            ))])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DanglingEndpoint(_)));
        assert_eq!(store.node_count().await.unwrap(), 0);
        assert_eq!(store.edge_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn batch_upserts_node_and_edge_together() {
        let store = InMemoryGraphStore::new();
        let a = file_node("p", "a.ts");
        let b = file_node("p", "b.ts");
        let edge = Edge::new(a.id.clone(), b.id.clone(), EdgeKind::DependsOn);
        let summary = store
            .apply(vec![
                GraphOp::UpsertNode(a.clone()),
                GraphOp::UpsertNode(b.clone()),
                GraphOp::UpsertEdge(edge),
            ])
            .await
            .unwrap();
        assert_eq!(summary.nodes_upserted, 2);
        assert_eq!(summary.edges_upserted, 1);
        assert_eq!(store.outgoing(&a.id, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_file_cascades_to_edges() {
        let store = InMemoryGraphStore::new();
        let a = file_node("p", "a.ts");
        let b = file_node("p", "b.ts");
        store
            .apply(vec![
                GraphOp::UpsertNode(a.clone()),
                GraphOp::UpsertNode(b.clone()),
                GraphOp::UpsertEdge(Edge::new(a.id.clone(), b.id.clone(), EdgeKind::DependsOn)),
            ])
            .await
            .unwrap();
        let summary = store.delete_file("a.ts").await.unwrap();
        assert_eq!(summary.nodes_removed, 1);
        assert_eq!(summary.edges_removed, 1);
        assert!(store.get_node(&a.id).await.unwrap().is_none());
        assert!(store.get_node(&b.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn reupserted_node_merges_metadata_and_takes_new_name() {
        let store = InMemoryGraphStore::new();
        let mut a = file_node("p", "a.ts");
        a = a.with_metadata("owner", serde_json::json!("alice"));
        store.apply(vec![GraphOp::UpsertNode(a.clone())]).await.unwrap();

        let mut a2 = Node::new(a.address.clone(), "a-renamed");
        a2 = a2.with_metadata("reviewed", serde_json::json!(true));
        store.apply(vec![GraphOp::UpsertNode(a2)]).await.unwrap();

        let stored = store.get_node(&a.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "a-renamed");
        assert_eq!(stored.metadata.get("owner"), Some(&serde_json::json!("alice")));
        assert_eq!(stored.metadata.get("reviewed"), Some(&serde_json::json!(true)));
    }

    #[tokio::test]
    async fn reupserted_node_with_different_source_file_is_identifier_clash() {
        let store = InMemoryGraphStore::new();
        let address = RdfAddress::for_file("p", "a.ts");
        let a = Node::new(address.clone(), "a");
        store.apply(vec![GraphOp::UpsertNode(a.clone())]).await.unwrap();

        let mut moved = Node::new(address, "a");
        moved.file = "b.ts".to_string();
        let err = store.apply(vec![GraphOp::UpsertNode(moved)]).await.unwrap_err();
        assert!(matches!(err, StorageError::IdentifierClash { .. }));
        assert_eq!(store.get_node(&a.id).await.unwrap().unwrap().file, "a.ts");
    }

    #[tokio::test]
    async fn reupserted_edge_merges_metadata() {
        let store = InMemoryGraphStore::new();
        let a = file_node("p", "a.ts");
        let b = file_node("p", "b.ts");
        store
            .apply(vec![GraphOp::UpsertNode(a.clone()), GraphOp::UpsertNode(b.clone())])
            .await
            .unwrap();

        let edge = Edge::new(a.id.clone(), b.id.clone(), EdgeKind::DependsOn)
            .with_metadata("weight", serde_json::json!(1));
        store.apply(vec![GraphOp::UpsertEdge(edge)]).await.unwrap();

        let edge2 = Edge::new(a.id.clone(), b.id.clone(), EdgeKind::DependsOn)
            .with_metadata("confidence", serde_json::json!(0.9));
        store.apply(vec![GraphOp::UpsertEdge(edge2)]).await.unwrap();

        let outgoing = store.outgoing(&a.id, None).await.unwrap();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].metadata.get("weight"), Some(&serde_json::json!(1)));
        assert_eq!(outgoing[0].metadata.get("confidence"), Some(&serde_json::json!(0.9)));
    }
}
