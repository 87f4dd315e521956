//! The storage port: the trait the analysis/inference/query layers program
//! against, independent of whether the backing store is in-memory or SQLite.

use crate::domain::edge::Edge;
use crate::domain::edge_kind::EdgeKind;
use crate::domain::node::{Node, NodeId};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single mutation against the graph. Collected into batches so a whole
/// file's worth of nodes and edges commits or fails together.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOp {
    UpsertNode(Node),
    UpsertEdge(Edge),
    /// Remove every node whose identifier's file component matches and every
    /// edge touching one of them.
    DeleteFile(String),
    RemoveNode(NodeId),
    RemoveEdge { source_id: NodeId, target_id: NodeId, kind: EdgeKind },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub nodes_upserted: usize,
    pub edges_upserted: usize,
    pub nodes_removed: usize,
    pub edges_removed: usize,
}

/// Object-safe store port. All mutation goes through `apply` so a single
/// batch either commits in full or leaves the store untouched; the
/// convenience methods below are default-implemented single-op batches.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn apply(&self, ops: Vec<GraphOp>) -> Result<BatchSummary>;

    async fn upsert_node(&self, node: Node) -> Result<BatchSummary> {
        self.apply(vec![GraphOp::UpsertNode(node)]).await
    }

    async fn upsert_edge(&self, edge: Edge) -> Result<BatchSummary> {
        self.apply(vec![GraphOp::UpsertEdge(edge)]).await
    }

    async fn delete_file(&self, file: impl Into<String> + Send) -> Result<BatchSummary>
    where
        Self: Sized,
    {
        self.apply(vec![GraphOp::DeleteFile(file.into())]).await
    }

    async fn get_node(&self, id: &str) -> Result<Option<Node>>;

    async fn nodes_by_kind(&self, kind: crate::domain::node_kind::NodeKind) -> Result<Vec<Node>>;

    async fn outgoing(&self, id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>>;

    async fn incoming(&self, id: &str, kind: Option<EdgeKind>) -> Result<Vec<Edge>>;

    async fn all_nodes(&self) -> Result<Vec<Node>>;

    async fn all_edges(&self) -> Result<Vec<Edge>>;

    async fn node_count(&self) -> Result<usize>;

    async fn edge_count(&self) -> Result<usize>;
}
