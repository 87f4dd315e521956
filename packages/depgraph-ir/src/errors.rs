//! Error taxonomy for the analysis pipeline.
//!
//! Parse/extractor/interpreter failures are recoverable — they attach to an
//! `AnalysisResult` rather than aborting a batch — but still need a typed
//! shape wherever a single-file call surfaces them directly (e.g. the
//! analysis engine's own return type before it's folded into a result).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unsupported language for '{0}'")]
    UnsupportedLanguage(String),

    #[error("parse error in '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("extractor '{extractor}' failed on '{path}': {message}")]
    ExtractorError {
        path: String,
        extractor: String,
        message: String,
    },

    #[error("interpreter '{interpreter}' failed on '{path}': {message}")]
    InterpreterError {
        path: String,
        interpreter: String,
        message: String,
    },

    #[error("analysis of '{path}' exceeded its {timeout_ms}ms budget")]
    Timeout { path: String, timeout_ms: u64 },

    #[error("analysis was cancelled")]
    Cancelled,

    #[error("depth ceiling of {0} exceeded")]
    DepthExceeded(u32),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] depgraph_storage::StorageError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    RdfAddress(#[from] depgraph_storage::domain::rdf_address::RdfAddressError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
