//! BFS transitive closure over a single edge kind's family, tolerant of
//! cycles (a visited-set guards re-expansion) and deterministic regardless
//! of store iteration order (results sorted by (pathLength, identifier)).

use super::family::family_of;
use crate::errors::{AnalysisError, Result};
use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::{Edge, EdgeKind, GraphStore, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One reachable node at its minimum distance from the query's start node,
/// with the set of edge kinds (drawn from the queried kind's family) whose
/// edges reached it at that distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitiveHit {
    pub target: NodeId,
    pub path_length: u32,
    pub via_kinds: Vec<EdgeKind>,
}

pub struct TransitiveResult {
    pub hits: Vec<TransitiveHit>,
    pub edges: Vec<Edge>,
}

pub async fn transitive_closure(
    store: &dyn GraphStore,
    registry: &EdgeTypeRegistry,
    start: &str,
    kind: EdgeKind,
    max_path_length: u32,
) -> Result<TransitiveResult> {
    if !registry.is_transitive(kind) {
        return Err(AnalysisError::InvalidQuery(format!(
            "'{kind}' does not support transitive closure"
        )));
    }
    let family = family_of(registry, kind);

    if max_path_length == 0 {
        return Ok(TransitiveResult {
            hits: vec![TransitiveHit {
                target: start.to_string(),
                path_length: 0,
                via_kinds: Vec::new(),
            }],
            edges: Vec::new(),
        });
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(start.to_string());
    let mut frontier = vec![start.to_string()];
    let mut collected_edges = Vec::new();
    let mut via_kinds: HashMap<NodeId, HashSet<EdgeKind>> = HashMap::new();
    let mut path_length: HashMap<NodeId, u32> = HashMap::new();
    let mut depth = 0u32;

    while !frontier.is_empty() && depth < max_path_length {
        depth += 1;
        let mut newly_reached = Vec::new();
        for node_id in &frontier {
            let edges = store.outgoing(node_id, None).await?;
            for edge in edges {
                if !family.contains(&edge.kind) {
                    continue;
                }
                let first_visit = visited.insert(edge.target_id.clone());
                if first_visit {
                    newly_reached.push(edge.target_id.clone());
                    path_length.insert(edge.target_id.clone(), depth);
                }
                if path_length.get(&edge.target_id).copied() == Some(depth) {
                    via_kinds.entry(edge.target_id.clone()).or_default().insert(edge.kind);
                }
                collected_edges.push(edge);
            }
        }
        frontier = newly_reached;
    }

    let mut hits: Vec<TransitiveHit> = path_length
        .into_iter()
        .map(|(target, path_length)| {
            let mut via: Vec<EdgeKind> = via_kinds.remove(&target).unwrap_or_default().into_iter().collect();
            via.sort_by_key(|k| k.as_str().to_string());
            TransitiveHit { target, path_length, via_kinds: via }
        })
        .collect();
    hits.sort_by(|a, b| a.path_length.cmp(&b.path_length).then_with(|| a.target.cmp(&b.target)));
    Ok(TransitiveResult { hits, edges: collected_edges })
}
