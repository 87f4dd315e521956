//! Resolves an edge kind to its "family": itself plus every kind that is-a
//! it through the edge-type registry's `parent` chain (`imports` is-a
//! `depends_on`, so a `depends_on` closure must also walk `imports` edges).

use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::EdgeKind;
use std::collections::HashSet;

pub fn family_of(registry: &EdgeTypeRegistry, kind: EdgeKind) -> HashSet<EdgeKind> {
    let mut family = HashSet::new();
    family.insert(kind);
    for candidate in EdgeKind::ALL {
        if is_descendant(registry, candidate, kind) {
            family.insert(candidate);
        }
    }
    family
}

fn is_descendant(registry: &EdgeTypeRegistry, candidate: EdgeKind, ancestor: EdgeKind) -> bool {
    let mut current = candidate;
    for _ in 0..EdgeKind::ALL.len() {
        let Ok(descriptor) = registry.get(current) else {
            return false;
        };
        match descriptor.parent {
            Some(parent) if parent == ancestor => return true,
            Some(parent) => current = parent,
            None => return false,
        }
    }
    false
}
