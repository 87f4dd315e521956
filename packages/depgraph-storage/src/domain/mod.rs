pub mod edge;
pub mod edge_kind;
pub mod edge_registry;
pub mod node;
pub mod node_kind;
pub mod ports;
pub mod rdf_address;
pub mod span;

pub use edge::Edge;
pub use edge_kind::EdgeKind;
pub use edge_registry::{EdgeKindDescriptor, EdgeRegistryStatistics, EdgeTypeRegistry};
pub use node::{Node, NodeId};
pub use node_kind::NodeKind;
pub use ports::{BatchSummary, GraphOp, GraphStore};
pub use rdf_address::{RdfAddress, SymbolSegment};
pub use span::{Location, Span};
