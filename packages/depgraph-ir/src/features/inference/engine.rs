//! The inference engine: caches query results, and tracks a cold/warm/dirty
//! state per node so a changed node's inheritable edges get recomputed
//! incrementally rather than re-deriving the whole graph on every query.

use super::cache::{InferenceCache, InferenceCacheKey};
use super::hierarchical::{hierarchical, HierarchicalResult};
use super::propagation::propagate_inheritable;
use super::transitive::{transitive_closure, TransitiveHit, TransitiveResult};
use crate::errors::{AnalysisError, Result};
use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::{EdgeKind, GraphStore, NodeId};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Cold,
    Warm,
    Dirty,
}

pub struct InferenceEngine {
    registry: EdgeTypeRegistry,
    cache: InferenceCache,
    depth_ceiling: u32,
    state: RwLock<HashMap<NodeId, NodeState>>,
}

impl InferenceEngine {
    pub fn new(registry: EdgeTypeRegistry, cache_capacity: u64, cache_ttl_secs: u64, depth_ceiling: u32) -> Self {
        Self {
            registry,
            cache: InferenceCache::new(cache_capacity, cache_ttl_secs),
            depth_ceiling,
            state: RwLock::new(HashMap::new()),
        }
    }

    fn check_depth(&self, requested: u32) -> Result<u32> {
        if requested > self.depth_ceiling {
            return Err(AnalysisError::DepthExceeded(self.depth_ceiling));
        }
        Ok(requested)
    }

    pub async fn transitive(
        &self,
        store: &dyn GraphStore,
        start: &str,
        kind: EdgeKind,
        max_path_length: u32,
    ) -> Result<TransitiveResult> {
        let max_path_length = self.check_depth(max_path_length)?;
        let key = InferenceCacheKey::new(
            "transitive",
            Some(start),
            Some(kind.as_str()),
            &[("max_path_length", &max_path_length.to_string())],
        );
        if let Some(cached) = self.cache.get(&key) {
            let hits: Vec<TransitiveHit> = serde_json::from_value(cached).unwrap_or_default();
            return Ok(TransitiveResult { hits, edges: Vec::new() });
        }
        let result = transitive_closure(store, &self.registry, start, kind, max_path_length).await?;
        self.cache.insert(key, serde_json::to_value(&result.hits).unwrap_or_default());
        self.mark_warm(start);
        Ok(result)
    }

    pub async fn hierarchical(
        &self,
        store: &dyn GraphStore,
        start: &str,
        kind: EdgeKind,
        max_depth: u32,
        include_children: bool,
        include_parents: bool,
    ) -> Result<HierarchicalResult> {
        let max_depth = self.check_depth(max_depth)?;
        let result = hierarchical(
            store,
            &self.registry,
            start,
            kind,
            max_depth,
            include_children,
            include_parents,
        )
        .await?;
        self.mark_warm(start);
        Ok(result)
    }

    /// Re-derives `propagated` edges for `node_id` after it (or an ancestor)
    /// changed, moving it from `Dirty` back to `Warm`. A `Cold` node is
    /// treated the same as `Dirty` — there's nothing cached to reuse either
    /// way.
    pub async fn execute_incremental_inference(
        &self,
        store: &dyn GraphStore,
        node_id: &str,
        carrier: EdgeKind,
        propagated: EdgeKind,
    ) -> Result<usize> {
        let max_depth = self.depth_ceiling;
        let derived = propagate_inheritable(store, &self.registry, node_id, carrier, propagated, max_depth).await?;
        let count = derived.len();
        if !derived.is_empty() {
            store
                .apply(derived.into_iter().map(depgraph_storage::GraphOp::UpsertEdge).collect())
                .await?;
        }
        self.mark_warm(node_id);
        Ok(count)
    }

    /// Marks a node (and, implicitly, every cached query that might have
    /// traversed it) stale. We don't track per-query node membership, so
    /// this invalidates the whole result cache rather than risk a false hit.
    pub fn mark_node_changed(&self, node_id: &str) {
        self.state.write().unwrap().insert(node_id.to_string(), NodeState::Dirty);
        self.cache.invalidate_all();
    }

    fn mark_warm(&self, node_id: &str) {
        self.state.write().unwrap().insert(node_id.to_string(), NodeState::Warm);
    }

    pub fn is_dirty(&self, node_id: &str) -> bool {
        !matches!(
            self.state.read().unwrap().get(node_id).copied().unwrap_or(NodeState::Cold),
            NodeState::Warm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depgraph_storage::domain::rdf_address::SymbolSegment;
    use depgraph_storage::{Edge, InMemoryGraphStore, Node, NodeKind, RdfAddress};

    fn class_node(name: &str) -> Node {
        let address = RdfAddress::for_file("proj", "f.ts")
            .with_segment(SymbolSegment::new(NodeKind::Class, [name]));
        Node::new(address, name)
    }

    #[tokio::test]
    async fn rejects_query_beyond_depth_ceiling() {
        let engine = InferenceEngine::new(EdgeTypeRegistry::with_builtins(), 10, 30, 4);
        let store = InMemoryGraphStore::new();
        let err = engine
            .transitive(&store, "proj/f.ts#Class:A", EdgeKind::DependsOn, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DepthExceeded(4)));
    }

    #[tokio::test]
    async fn mark_node_changed_then_incremental_inference_converges() {
        let store = InMemoryGraphStore::new();
        let a = class_node("A");
        let b = class_node("B");
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        store.upsert_node(a).await.unwrap();
        store.upsert_node(b).await.unwrap();
        store
            .upsert_edge(Edge::new(b_id.clone(), a_id.clone(), EdgeKind::Extends))
            .await
            .unwrap();

        let engine = InferenceEngine::new(EdgeTypeRegistry::with_builtins(), 100, 30, 64);
        engine.mark_node_changed(&b_id);
        assert!(engine.is_dirty(&b_id));
        let applied = engine
            .execute_incremental_inference(&store, &b_id, EdgeKind::Extends, EdgeKind::Implements)
            .await
            .unwrap();
        assert_eq!(applied, 0);
        assert!(!engine.is_dirty(&b_id));
    }
}
