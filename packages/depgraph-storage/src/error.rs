//! Error taxonomy for the graph store.
//!
//! Mirrors the store-level kinds from the analysis pipeline's error design:
//! recoverable plugin-level errors never reach this crate, only the
//! store/registry failures that must be surfaced to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("identifier clash for {identifier}: existing source file {existing:?}, new {new:?}")]
    IdentifierClash {
        identifier: String,
        existing: String,
        new: String,
    },

    #[error("dangling endpoint: node {0} does not exist")]
    DanglingEndpoint(String),

    #[error("edge kind '{0}' is not registered")]
    UnregisteredEdgeKind(String),

    #[error("edge kind '{kind}' does not allow self-loops")]
    IllegalSelfLoop { kind: String },

    #[error("schema version mismatch: store was written with '{store}', registry is '{registry}'")]
    SchemaVersionMismatch { store: String, registry: String },

    #[error("invalid RDF address '{0}': {1}")]
    InvalidIdentifier(String, String),

    #[error("duplicate edge-kind descriptor for '{0}'")]
    DuplicateEdgeKind(String),

    #[error("edge-kind descriptors for '{0}' disagree on algebraic flags")]
    InconsistentEdgeKind(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
