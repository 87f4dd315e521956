//! Inheritable-edge propagation: derives e.g. `implements` edges a subclass
//! picks up from its ancestors, so a query against the subclass alone
//! returns the interfaces it satisfies transitively. Derived edges are
//! idempotent — re-running propagation over an unchanged graph produces the
//! same set, tagged `derived` so they're distinguishable from extracted ones.

use super::hierarchical::hierarchical;
use crate::errors::Result;
use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::{Edge, EdgeKind, GraphStore};
use std::collections::HashSet;

/// For every node reachable from `start` along `carrier` (typically
/// `extends`), re-derives edges of kind `propagated` (typically
/// `implements`) that `start`'s ancestors declared directly, attaching them
/// to `start` as `derived` edges. Returns the edges that would be upserted;
/// callers decide whether to apply them.
pub async fn propagate_inheritable(
    store: &dyn GraphStore,
    registry: &EdgeTypeRegistry,
    start: &str,
    carrier: EdgeKind,
    propagated: EdgeKind,
    max_depth: u32,
) -> Result<Vec<Edge>> {
    let ancestry = hierarchical(store, registry, start, carrier, max_depth, false, true).await?;
    let mut ancestors: Vec<String> = ancestry.entries.iter().map(|e| e.node_id.clone()).collect();
    ancestors.push(start.to_string());

    let mut seen_targets = HashSet::new();
    let mut derived = Vec::new();
    for ancestor in &ancestors {
        for edge in store.outgoing(ancestor, Some(propagated)).await? {
            if ancestor == start {
                // Directly declared on `start` itself; nothing to derive.
                continue;
            }
            if seen_targets.insert(edge.target_id.clone()) {
                derived.push(
                    Edge::new(start.to_string(), edge.target_id.clone(), propagated).derived(),
                );
            }
        }
    }
    Ok(derived)
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

    fn interface_node(name: &str) -> Node {
        let address = RdfAddress::for_file("proj", "f.ts")
            .with_segment(SymbolSegment::new(NodeKind::Interface, [name]));
        Node::new(address, name)
    }

    #[tokio::test]
    async fn subclass_inherits_ancestors_implements_edge() {
        let store = InMemoryGraphStore::new();
        let base = class_node("Base");
        let derived_class = class_node("Derived");
        let iface = interface_node("Serializable");
        let (base_id, derived_id, iface_id) =
            (base.id.clone(), derived_class.id.clone(), iface.id.clone());

        store.upsert_node(base).await.unwrap();
        store.upsert_node(derived_class).await.unwrap();
        store.upsert_node(iface).await.unwrap();
        store
            .upsert_edge(Edge::new(derived_id.clone(), base_id.clone(), EdgeKind::Extends))
            .await
            .unwrap();
        store
            .upsert_edge(Edge::new(base_id.clone(), iface_id.clone(), EdgeKind::Implements))
            .await
            .unwrap();

        let registry = EdgeTypeRegistry::with_builtins();
        let derived_edges = propagate_inheritable(
            &store,
            &registry,
            &derived_id,
            EdgeKind::Extends,
            EdgeKind::Implements,
            10,
        )
        .await
        .unwrap();

        assert_eq!(derived_edges.len(), 1);
        assert_eq!(derived_edges[0].target_id, iface_id);
        assert!(derived_edges[0].derived);
    }
}
