//! The edge-type registry: algebraic flags attached to each `EdgeKind`,
//! consulted by the query surface when computing transitive closures and
//! inheritable propagation rather than hard-coding kind checks everywhere.

use crate::domain::edge_kind::EdgeKind;
use crate::error::{Result, StorageError};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeKindDescriptor {
    pub kind: EdgeKind,
    /// Whether reachability through this kind composes (A->B->C implies A->C).
    pub transitive: bool,
    /// Whether edges of this kind propagate down a `parent` chain (e.g. a
    /// subclass inherits its superclass's `implements` edges).
    pub inheritable: bool,
    /// Edges of this kind are read from source to target, never the reverse.
    pub directed: bool,
    /// Whether a node may hold this edge to itself.
    pub reflexive: bool,
    /// The edge kind whose chain this one rides when propagating
    /// (`Implements` propagates along `Extends`, for instance).
    pub parent: Option<EdgeKind>,
    /// Ordinal used to break ties when multiple descriptors could apply.
    pub priority: u8,
}

impl EdgeKindDescriptor {
    fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            transitive: false,
            inheritable: false,
            directed: true,
            reflexive: false,
            parent: None,
            priority: 0,
        }
    }

    fn transitive(mut self) -> Self {
        self.transitive = true;
        self
    }

    fn inheritable(mut self) -> Self {
        self.inheritable = true;
        self
    }

    fn reflexive(mut self) -> Self {
        self.reflexive = true;
        self
    }

    fn parent(mut self, parent: EdgeKind) -> Self {
        self.parent = Some(parent);
        self
    }

    fn priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// Registry of edge-kind descriptors. Construct with `with_builtins()` to get
/// the closed vocabulary's default flags; `register` allows call sites that
/// need to assert consistent overrides without silently clobbering one
/// another.
#[derive(Debug, Clone)]
pub struct EdgeTypeRegistry {
    descriptors: HashMap<EdgeKind, EdgeKindDescriptor>,
}

impl EdgeTypeRegistry {
    pub fn empty() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for descriptor in builtin_descriptors() {
            registry
                .register(descriptor)
                .expect("builtin descriptors never collide");
        }
        registry
    }

    pub fn register(&mut self, descriptor: EdgeKindDescriptor) -> Result<()> {
        match self.descriptors.get(&descriptor.kind) {
            Some(existing) if *existing != descriptor => {
                Err(StorageError::InconsistentEdgeKind(descriptor.kind.to_string()))
            }
            Some(_) => Ok(()),
            None => {
                self.descriptors.insert(descriptor.kind, descriptor);
                Ok(())
            }
        }
    }

    pub fn get(&self, kind: EdgeKind) -> Result<&EdgeKindDescriptor> {
        self.descriptors
            .get(&kind)
            .ok_or_else(|| StorageError::UnregisteredEdgeKind(kind.to_string()))
    }

    pub fn is_transitive(&self, kind: EdgeKind) -> bool {
        self.descriptors.get(&kind).map_or(false, |d| d.transitive)
    }

    pub fn is_inheritable(&self, kind: EdgeKind) -> bool {
        self.descriptors.get(&kind).map_or(false, |d| d.inheritable)
    }

    pub fn allows_self_loop(&self, kind: EdgeKind) -> bool {
        self.descriptors.get(&kind).map_or(false, |d| d.reflexive)
    }

    pub fn statistics(&self) -> EdgeRegistryStatistics {
        EdgeRegistryStatistics {
            total: self.descriptors.len(),
            transitive: self.descriptors.values().filter(|d| d.transitive).count(),
            inheritable: self.descriptors.values().filter(|d| d.inheritable).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRegistryStatistics {
    pub total: usize,
    pub transitive: usize,
    pub inheritable: usize,
}

impl Default for EdgeTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn builtin_descriptors() -> Vec<EdgeKindDescriptor> {
    vec![
        // Structural
        EdgeKindDescriptor::new(EdgeKind::Contains).priority(1),
        EdgeKindDescriptor::new(EdgeKind::Declares),
        EdgeKindDescriptor::new(EdgeKind::BelongsTo),
        // Dependency: `imports`/`imports_library`/`imports_file`/`exports_to`
        // are-a `depends_on` per spec, so they ride its transitive closure.
        EdgeKindDescriptor::new(EdgeKind::DependsOn)
            .transitive()
            .priority(1),
        EdgeKindDescriptor::new(EdgeKind::Imports)
            .transitive()
            .parent(EdgeKind::DependsOn),
        EdgeKindDescriptor::new(EdgeKind::ImportsLibrary)
            .transitive()
            .parent(EdgeKind::DependsOn),
        EdgeKindDescriptor::new(EdgeKind::ImportsFile)
            .transitive()
            .parent(EdgeKind::DependsOn),
        EdgeKindDescriptor::new(EdgeKind::ExportsTo)
            .transitive()
            .parent(EdgeKind::DependsOn),
        // Execution
        EdgeKindDescriptor::new(EdgeKind::Calls),
        EdgeKindDescriptor::new(EdgeKind::Instantiates),
        EdgeKindDescriptor::new(EdgeKind::Uses),
        EdgeKindDescriptor::new(EdgeKind::Accesses),
        // Type system: `extends` is both transitive (A extends B extends C)
        // and inheritable (propagates down the contains/extends backbone);
        // `implements` is inheritable and rides the `extends` chain, so a
        // subclass picks up its ancestors' interfaces.
        EdgeKindDescriptor::new(EdgeKind::Extends)
            .transitive()
            .inheritable(),
        EdgeKindDescriptor::new(EdgeKind::Implements)
            .inheritable()
            .parent(EdgeKind::Extends),
        EdgeKindDescriptor::new(EdgeKind::HasType),
        EdgeKindDescriptor::new(EdgeKind::Returns),
        EdgeKindDescriptor::new(EdgeKind::Throws),
        // Modification
        EdgeKindDescriptor::new(EdgeKind::Overrides).parent(EdgeKind::Extends),
        EdgeKindDescriptor::new(EdgeKind::Shadows),
        EdgeKindDescriptor::new(EdgeKind::AssignsTo),
        // Documentation. `md-hashtag` is explicitly left non-transitive.
        EdgeKindDescriptor::new(EdgeKind::MdLink),
        EdgeKindDescriptor::new(EdgeKind::MdImage),
        EdgeKindDescriptor::new(EdgeKind::MdWikilink),
        EdgeKindDescriptor::new(EdgeKind::MdSymbolRef),
        EdgeKindDescriptor::new(EdgeKind::MdInclude),
        EdgeKindDescriptor::new(EdgeKind::MdCodeRef),
        EdgeKindDescriptor::new(EdgeKind::MdAnchor),
        EdgeKindDescriptor::new(EdgeKind::MdHashtag),
        EdgeKindDescriptor::new(EdgeKind::MdContainsHeading),
        // Meta
        EdgeKindDescriptor::new(EdgeKind::AnnotatedWith),
        EdgeKindDescriptor::new(EdgeKind::References),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_cover_every_kind() {
        let registry = EdgeTypeRegistry::with_builtins();
        for kind in EdgeKind::ALL {
            assert!(registry.get(kind).is_ok(), "missing descriptor for {kind}");
        }
    }

    #[test]
    fn depends_on_family_is_transitive() {
        let registry = EdgeTypeRegistry::with_builtins();
        assert!(registry.is_transitive(EdgeKind::DependsOn));
        assert!(registry.is_transitive(EdgeKind::Imports));
        assert!(registry.is_transitive(EdgeKind::ExportsTo));
        assert!(!registry.is_transitive(EdgeKind::Calls));
    }

    #[test]
    fn extends_and_implements_are_inheritable() {
        let registry = EdgeTypeRegistry::with_builtins();
        assert!(registry.is_inheritable(EdgeKind::Extends));
        assert!(registry.is_inheritable(EdgeKind::Implements));
        assert_eq!(
            registry.get(EdgeKind::Implements).unwrap().parent,
            Some(EdgeKind::Extends)
        );
    }

    #[test]
    fn md_hashtag_is_not_transitive() {
        let registry = EdgeTypeRegistry::with_builtins();
        assert!(!registry.is_transitive(EdgeKind::MdHashtag));
    }

    #[test]
    fn statistics_count_total_transitive_and_inheritable() {
        let registry = EdgeTypeRegistry::with_builtins();
        let stats = registry.statistics();
        assert_eq!(stats.total, EdgeKind::ALL.len());
        assert!(stats.transitive >= 5);
        assert!(stats.inheritable >= 2);
    }

    #[test]
    fn register_rejects_conflicting_redefinition() {
        let mut registry = EdgeTypeRegistry::empty();
        registry
            .register(EdgeKindDescriptor::new(EdgeKind::Calls))
            .unwrap();
        let conflicting = EdgeKindDescriptor::new(EdgeKind::Calls).transitive();
        assert!(matches!(
            registry.register(conflicting),
            Err(StorageError::InconsistentEdgeKind(_))
        ));
    }
}
