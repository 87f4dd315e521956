//! Dependency extractor: import/require-family edges with a resolution kind
//! the path resolver (C4) will later turn into a concrete target.

use crate::features::extraction::language_kinds::symbol_kinds;
use crate::features::extraction::ports::{ExtractionContext, Extractor};
use crate::features::extraction::walk::{first_string_literal_text, for_each_node, location_of};
use crate::features::parsing::LanguageId;
use serde::{Deserialize, Serialize};
use tree_sitter::Tree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub source: String,
    pub dependency_type: String,
    pub location: crate::shared::models::ErrorLocation,
}

pub struct DependencyExtractor;

impl Extractor for DependencyExtractor {
    fn name(&self) -> &str {
        "dependency"
    }

    fn supports(&self, language: LanguageId) -> bool {
        !matches!(language, LanguageId::Markdown | LanguageId::External | LanguageId::Unknown)
    }

    fn extract(&self, tree: &Tree, ctx: &ExtractionContext<'_>) -> serde_json::Value {
        let kinds = symbol_kinds(ctx.language);
        let mut records = Vec::new();
        for_each_node(tree.root_node(), |node| {
            if kinds.import.contains(&node.kind()) {
                if let Some(source) = first_string_literal_text(node, ctx.source) {
                    records.push(DependencyRecord {
                        source,
                        dependency_type: "import".to_string(),
                        location: location_of(node),
                    });
                }
            }
        });
        serde_json::to_value(records).unwrap_or(serde_json::Value::Null)
    }
}
