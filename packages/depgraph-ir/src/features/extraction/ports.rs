//! The extractor port: a pure mapping from a parsed tree to typed records.

use crate::features::parsing::LanguageId;
use tree_sitter::Tree;

pub struct ExtractionContext<'a> {
    pub path: &'a str,
    pub language: LanguageId,
    pub source: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Extractors are pure functions of `(tree, context)` — no mutation of the
/// tree, no I/O. `extract` is free to return a partial result; `validate`
/// reports on an already-produced result without raising.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &str;
    fn version(&self) -> &str {
        "1.0.0"
    }
    fn supports(&self, language: LanguageId) -> bool;
    fn extract(&self, tree: &Tree, ctx: &ExtractionContext<'_>) -> serde_json::Value;
    fn validate(&self, _result: &serde_json::Value) -> ValidationReport {
        ValidationReport::default()
    }
}
