//! Complexity extractor: cyclomatic score per file, base 1 plus one per
//! decision point (branches, loops, catch clauses, short-circuit operators).

use crate::features::extraction::language_kinds::symbol_kinds;
use crate::features::extraction::ports::{ExtractionContext, Extractor};
use crate::features::extraction::walk::for_each_node;
use crate::features::parsing::LanguageId;
use serde::{Deserialize, Serialize};
use tree_sitter::Tree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityRecord {
    pub cyclomatic: u32,
    pub decision_points: u32,
}

pub struct ComplexityExtractor;

impl Extractor for ComplexityExtractor {
    fn name(&self) -> &str {
        "complexity"
    }

    fn supports(&self, language: LanguageId) -> bool {
        !matches!(language, LanguageId::Markdown | LanguageId::External | LanguageId::Unknown)
    }

    fn extract(&self, tree: &Tree, ctx: &ExtractionContext<'_>) -> serde_json::Value {
        let kinds = symbol_kinds(ctx.language);
        let mut decision_points = 0u32;
        for_each_node(tree.root_node(), |node| {
            if kinds.decision_points.contains(&node.kind()) {
                if node.kind() == "binary_expression" {
                    let is_logical = node
                        .child_by_field_name("operator")
                        .and_then(|op| op.utf8_text(ctx.source.as_bytes()).ok())
                        .map(|op| op == "&&" || op == "||")
                        .unwrap_or(false);
                    if is_logical {
                        decision_points += 1;
                    }
                } else {
                    decision_points += 1;
                }
            }
        });
        serde_json::to_value(ComplexityRecord {
            cyclomatic: decision_points + 1,
            decision_points,
        })
        .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageDispatcher;

    #[test]
    fn counts_branches() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let source = "function f(x) {\n  if (x) {\n    return 1;\n  }\n  while (x) {\n    x -= 1;\n  }\n  return 0;\n}\n";
        let parsed = dispatcher.parse(LanguageId::JavaScript, source).unwrap();
        let tree = parsed.tree.unwrap();
        let ctx = ExtractionContext {
            path: "a.js",
            language: LanguageId::JavaScript,
            source,
        };
        let value = ComplexityExtractor.extract(&tree, &ctx);
        let record: ComplexityRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.cyclomatic, 3);
    }
}
