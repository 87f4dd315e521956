//! Graph storage: the node/edge domain model, the closed node-kind and
//! edge-kind vocabularies, the edge-type registry, and the `GraphStore` port
//! with in-memory and SQLite-backed implementations.
//!
//! Every mutation goes through `GraphStore::apply`, which takes a batch of
//! `GraphOp`s and commits them atomically — a file's nodes and edges either
//! all land or none do, so a crashed extraction pass never leaves the graph
//! half-updated.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Result, StorageError};

pub use domain::{
    BatchSummary, Edge, EdgeKind, EdgeKindDescriptor, EdgeRegistryStatistics, EdgeTypeRegistry,
    GraphOp, GraphStore, Location, Node, NodeId, NodeKind, RdfAddress, Span, SymbolSegment,
};

pub use infrastructure::InMemoryGraphStore;

#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteGraphStore;
