//! Multi-language static analysis: parse, extract, and interpret a file into
//! a dependency/identifier graph, then answer structural queries over it.
//!
//! Feature-first hexagonal layout: each `features/` module owns its
//! domain/port/infrastructure split; `system.rs` wires the features and the
//! `depgraph-storage` graph store together into the one value a caller
//! constructs.

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;
pub mod system;

pub use config::AnalysisConfig;
pub use errors::{AnalysisError, Result};
pub use system::AnalysisSystem;
