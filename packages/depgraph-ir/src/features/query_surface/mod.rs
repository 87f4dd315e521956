//! The read-only query surface (C9): the public API everything outside the
//! analysis/inference layers programs against to ask questions of the graph.

use crate::errors::{AnalysisError, Result};
use crate::features::inference::family::family_of;
use crate::features::inference::{HierarchicalResult, InferenceEngine, TransitiveResult};
use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::{Edge, EdgeKind, GraphStore, Node, NodeKind};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes_by_kind: Vec<(String, usize)>,
    pub edges_by_kind: Vec<(String, usize)>,
    /// Number of edge kinds registered as `transitive` / `inheritable`, per
    /// the edge-type registry — not a count of edge instances.
    pub transitive: usize,
    pub inheritable: usize,
}

/// A project-relative file path's leading path segment, used as the
/// namespace boundary `cross_namespace` queries span.
fn namespace_of(file: &str) -> &str {
    file.split('/').next().unwrap_or(file)
}

pub struct QuerySurface<'a> {
    store: &'a dyn GraphStore,
    registry: &'a EdgeTypeRegistry,
    inference: &'a InferenceEngine,
}

impl<'a> QuerySurface<'a> {
    pub fn new(store: &'a dyn GraphStore, registry: &'a EdgeTypeRegistry, inference: &'a InferenceEngine) -> Self {
        Self { store, registry, inference }
    }

    pub async fn find_by_rdf_address(&self, address: &str) -> Result<Option<Node>> {
        Ok(self.store.get_node(address).await?)
    }

    pub async fn find_by_kind(&self, kind: NodeKind) -> Result<Vec<Node>> {
        Ok(self.store.nodes_by_kind(kind).await?)
    }

    pub async fn outgoing(&self, node_id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>> {
        Ok(self.store.outgoing(node_id, kind).await?)
    }

    pub async fn incoming(&self, node_id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>> {
        Ok(self.store.incoming(node_id, kind).await?)
    }

    pub async fn transitive(&self, node_id: &str, kind: EdgeKind, max_path_length: u32) -> Result<TransitiveResult> {
        self.inference.transitive(self.store, node_id, kind, max_path_length).await
    }

    pub async fn hierarchical(
        &self,
        node_id: &str,
        kind: EdgeKind,
        max_depth: u32,
        include_children: bool,
        include_parents: bool,
    ) -> Result<HierarchicalResult> {
        self.inference
            .hierarchical(self.store, node_id, kind, max_depth, include_children, include_parents)
            .await
    }

    /// `depends_on`-family edges whose endpoints sit in different top-level
    /// namespaces. Identifiers from different projects are rejected outright
    /// — the graph never links across project boundaries, so comparing
    /// namespaces across two different `project` fields is a caller error
    /// rather than a query this store can answer. Two namespaces that
    /// mutually depend on each other show up as two opposite-direction
    /// results here; detecting the cycle from that pair is the caller's job.
    pub async fn cross_namespace(&self, node_a: &str, node_b: &str) -> Result<Vec<Edge>> {
        let a = self
            .store
            .get_node(node_a)
            .await?
            .ok_or_else(|| AnalysisError::InvalidQuery(format!("unknown node '{node_a}'")))?;
        let b = self
            .store
            .get_node(node_b)
            .await?
            .ok_or_else(|| AnalysisError::InvalidQuery(format!("unknown node '{node_b}'")))?;
        if a.address.project != b.address.project {
            return Err(AnalysisError::InvalidQuery(format!(
                "'{node_a}' and '{node_b}' belong to different projects"
            )));
        }
        if namespace_of(&a.file) == namespace_of(&b.file) {
            return Ok(Vec::new());
        }
        let family = family_of(self.registry, EdgeKind::DependsOn);
        let mut edges = self.store.outgoing(node_a, None).await?;
        edges.retain(|e| e.target_id == node_b && family.contains(&e.kind));
        let mut reverse = self.store.outgoing(node_b, None).await?;
        reverse.retain(|e| e.target_id == node_a && family.contains(&e.kind));
        edges.extend(reverse);
        Ok(edges)
    }

    pub async fn statistics(&self) -> Result<GraphStatistics> {
        let node_count = self.store.node_count().await?;
        let edge_count = self.store.edge_count().await?;
        let mut nodes_by_kind_map = std::collections::HashMap::new();
        for node in self.store.all_nodes().await? {
            *nodes_by_kind_map.entry(node.kind.as_str().to_string()).or_insert(0usize) += 1;
        }
        let mut nodes_by_kind: Vec<(String, usize)> = nodes_by_kind_map.into_iter().collect();
        nodes_by_kind.sort();

        let mut edges_by_kind_map = std::collections::HashMap::new();
        for edge in self.store.all_edges().await? {
            *edges_by_kind_map.entry(edge.kind.as_str().to_string()).or_insert(0usize) += 1;
        }
        let mut edges_by_kind: Vec<(String, usize)> = edges_by_kind_map.into_iter().collect();
        edges_by_kind.sort();

        let registry_stats = self.registry.statistics();
        Ok(GraphStatistics {
            node_count,
            edge_count,
            nodes_by_kind,
            edges_by_kind,
            transitive: registry_stats.transitive,
            inheritable: registry_stats.inheritable,
        })
    }

    pub fn registry(&self) -> &EdgeTypeRegistry {
        self.registry
    }
}
