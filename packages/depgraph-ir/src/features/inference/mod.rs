pub mod cache;
pub mod engine;
pub mod family;
pub mod hierarchical;
pub mod propagation;
pub mod transitive;

pub use cache::{InferenceCache, InferenceCacheKey};
pub use engine::InferenceEngine;
pub use hierarchical::{Direction, HierarchicalResult, HierarchyEntry};
pub use propagation::propagate_inheritable;
pub use transitive::{TransitiveHit, TransitiveResult};
