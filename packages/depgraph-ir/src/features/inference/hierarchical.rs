//! Parent/child traversal over `inheritable` edge kinds — `extends`'s own
//! closure, rather than the family-union the `depends_on` side needs, since
//! class hierarchies don't alias through sibling kinds the way imports do.

use crate::errors::{AnalysisError, Result};
use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::{Edge, EdgeKind, GraphStore, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// `Up` follows a node's own `kind` edges toward what it extends/implements
/// (ancestors); `Down` follows edges that point *at* the node (descendants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub node_id: NodeId,
    pub depth: u32,
    pub direction: Direction,
}

pub struct HierarchicalResult {
    pub entries: Vec<HierarchyEntry>,
    pub edges: Vec<Edge>,
}

async fn walk(
    store: &dyn GraphStore,
    start: &str,
    kind: EdgeKind,
    max_depth: u32,
    direction: Direction,
) -> Result<(Vec<HierarchyEntry>, Vec<Edge>)> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(start.to_string());
    let mut frontier = vec![start.to_string()];
    let mut entries = Vec::new();
    let mut edges = Vec::new();
    let mut depth = 0u32;

    while !frontier.is_empty() && depth < max_depth {
        depth += 1;
        let mut next = Vec::new();
        for node_id in &frontier {
            let (step_edges, neighbor_of): (Vec<Edge>, fn(&Edge) -> NodeId) = match direction {
                // A node's parent is whatever its own `kind` edge targets.
                Direction::Up => (store.outgoing(node_id, Some(kind)).await?, |e| e.target_id.clone()),
                // A node's children are nodes whose `kind` edge targets it.
                Direction::Down => (store.incoming(node_id, Some(kind)).await?, |e| e.source_id.clone()),
            };
            for edge in step_edges {
                let neighbor = neighbor_of(&edge);
                if visited.insert(neighbor.clone()) {
                    entries.push(HierarchyEntry {
                        node_id: neighbor.clone(),
                        depth,
                        direction,
                    });
                    next.push(neighbor);
                }
                edges.push(edge);
            }
        }
        frontier = next;
    }

    Ok((entries, edges))
}

#[allow(clippy::too_many_arguments)]
pub async fn hierarchical(
    store: &dyn GraphStore,
    registry: &EdgeTypeRegistry,
    start: &str,
    kind: EdgeKind,
    max_depth: u32,
    include_children: bool,
    include_parents: bool,
) -> Result<HierarchicalResult> {
    if !registry.is_inheritable(kind) {
        return Err(AnalysisError::InvalidQuery(format!(
            "'{kind}' is not an inheritable kind"
        )));
    }

    let mut entries = Vec::new();
    let mut edges = Vec::new();

    if include_parents {
        let (up_entries, up_edges) = walk(store, start, kind, max_depth, Direction::Up).await?;
        entries.extend(up_entries);
        edges.extend(up_edges);
    }
    if include_children {
        let (down_entries, down_edges) = walk(store, start, kind, max_depth, Direction::Down).await?;
        entries.extend(down_entries);
        edges.extend(down_edges);
    }

    entries.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.node_id.cmp(&b.node_id)));
    Ok(HierarchicalResult { entries, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depgraph_storage::domain::rdf_address::SymbolSegment;
    use depgraph_storage::{InMemoryGraphStore, Node, NodeKind, RdfAddress};

    fn class_node(name: &str) -> Node {
        let address = RdfAddress::for_file("proj", "f.ts")
            .with_segment(SymbolSegment::new(NodeKind::Class, [name]));
        Node::new(address, name)
    }

    #[tokio::test]
    async fn walks_three_level_hierarchy_sorted_by_depth() {
        let store = InMemoryGraphStore::new();
        let a = class_node("A");
        let b = class_node("B");
        let c = class_node("C");
        let (a_id, b_id, c_id) = (a.id.clone(), b.id.clone(), c.id.clone());

        store.upsert_node(a).await.unwrap();
        store.upsert_node(b).await.unwrap();
        store.upsert_node(c).await.unwrap();
        // C extends B extends A
        store
            .upsert_edge(Edge::new(c_id.clone(), b_id.clone(), EdgeKind::Extends))
            .await
            .unwrap();
        store
            .upsert_edge(Edge::new(b_id.clone(), a_id.clone(), EdgeKind::Extends))
            .await
            .unwrap();

        let registry = EdgeTypeRegistry::with_builtins();
        let result = hierarchical(&store, &registry, &a_id, EdgeKind::Extends, 10, true, false)
            .await
            .unwrap();
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].node_id, b_id);
        assert_eq!(result.entries[0].depth, 1);
        assert_eq!(result.entries[0].direction, Direction::Down);
        assert_eq!(result.entries[1].node_id, c_id);
        assert_eq!(result.entries[1].depth, 2);
    }

    #[tokio::test]
    async fn includes_parents_walking_up_from_the_most_derived_class() {
        let store = InMemoryGraphStore::new();
        let a = class_node("A");
        let b = class_node("B");
        let c = class_node("C");
        let (a_id, b_id, c_id) = (a.id.clone(), b.id.clone(), c.id.clone());

        store.upsert_node(a).await.unwrap();
        store.upsert_node(b).await.unwrap();
        store.upsert_node(c).await.unwrap();
        // C extends B extends A
        store
            .upsert_edge(Edge::new(c_id.clone(), b_id.clone(), EdgeKind::Extends))
            .await
            .unwrap();
        store
            .upsert_edge(Edge::new(b_id.clone(), a_id.clone(), EdgeKind::Extends))
            .await
            .unwrap();

        let registry = EdgeTypeRegistry::with_builtins();
        let result = hierarchical(&store, &registry, &c_id, EdgeKind::Extends, 3, false, true)
            .await
            .unwrap();
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].node_id, b_id);
        assert_eq!(result.entries[0].depth, 1);
        assert_eq!(result.entries[0].direction, Direction::Up);
        assert_eq!(result.entries[1].node_id, a_id);
        assert_eq!(result.entries[1].depth, 2);
        assert_eq!(result.entries[1].direction, Direction::Up);
    }
}
