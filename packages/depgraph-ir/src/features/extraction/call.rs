//! Call extractor: call-expression sites and the callee they name — the
//! basis for `calls` edges once the interpreter resolves callee names
//! against declared symbols.

use crate::features::extraction::language_kinds::{symbol_kinds, SymbolKinds};
use crate::features::extraction::ports::{ExtractionContext, Extractor};
use crate::features::extraction::walk::{first_named_child, for_each_node, location_of};
use crate::features::parsing::LanguageId;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Name of the enclosing function/method/constructor the call occurs
    /// in, if any — a call at module scope (no enclosing callable) has no
    /// clear "from" symbol and is left unattributed.
    #[serde(default)]
    pub caller: Option<String>,
    /// Receiver name for a `receiver.method()` call (e.g. `B` in `B.n()`),
    /// `None` for a bare `name()` call.
    #[serde(default)]
    pub receiver: Option<String>,
    pub callee: String,
    pub location: crate::shared::models::ErrorLocation,
}

pub struct CallExtractor;

impl CallExtractor {
    /// Name of the nearest ancestor function/method/constructor declaration.
    fn enclosing_callable_name(node: Node<'_>, ctx: &ExtractionContext<'_>, kinds: &SymbolKinds) -> Option<String> {
        let mut current = node.parent();
        while let Some(ancestor) = current {
            let ancestor_kind = ancestor.kind();
            if kinds.method.contains(&ancestor_kind)
                || kinds.function.contains(&ancestor_kind)
                || kinds.constructor.contains(&ancestor_kind)
            {
                let name_node = first_named_child(ancestor, kinds.name_child_kinds)?;
                return name_node.utf8_text(ctx.source.as_bytes()).ok().map(str::to_string);
            }
            current = ancestor.parent();
        }
        None
    }

    /// `(receiver, method)` for a call node, using tree-sitter field names
    /// rather than per-grammar node-kind strings so the same logic covers
    /// `object.property` (JS/TS), `object.attribute` (Python), and
    /// `operand.field` (Go selector expressions). Java's `method_invocation`
    /// carries `object`/`name` directly on the call node rather than behind
    /// a separate function child.
    fn callee_of(node: Node<'_>, ctx: &ExtractionContext<'_>, language: LanguageId) -> Option<(Option<String>, String)> {
        if language == LanguageId::Java {
            let name_node = node.child_by_field_name("name")?;
            let method = name_node.utf8_text(ctx.source.as_bytes()).ok()?.to_string();
            let receiver = node
                .child_by_field_name("object")
                .and_then(|o| o.utf8_text(ctx.source.as_bytes()).ok())
                .map(str::to_string);
            return Some((receiver, method));
        }

        let function = node.child_by_field_name("function")?;
        let object = function
            .child_by_field_name("object")
            .or_else(|| function.child_by_field_name("operand"));
        match object {
            Some(object) => {
                let method_node = function
                    .child_by_field_name("property")
                    .or_else(|| function.child_by_field_name("attribute"))
                    .or_else(|| function.child_by_field_name("field"))?;
                let receiver = object.utf8_text(ctx.source.as_bytes()).ok()?.to_string();
                let method = method_node.utf8_text(ctx.source.as_bytes()).ok()?.to_string();
                Some((Some(receiver), method))
            }
            None => {
                let method = function.utf8_text(ctx.source.as_bytes()).ok()?.to_string();
                Some((None, method))
            }
        }
    }
}

impl Extractor for CallExtractor {
    fn name(&self) -> &str {
        "call"
    }

    fn supports(&self, language: LanguageId) -> bool {
        !symbol_kinds(language).call.is_empty()
    }

    fn extract(&self, tree: &Tree, ctx: &ExtractionContext<'_>) -> serde_json::Value {
        let kinds = symbol_kinds(ctx.language);
        let mut records = Vec::new();

        for_each_node(tree.root_node(), |node| {
            if !kinds.call.contains(&node.kind()) {
                return;
            }
            let Some((receiver, callee)) = Self::callee_of(node, ctx, ctx.language) else {
                return;
            };
            records.push(CallRecord {
                caller: Self::enclosing_callable_name(node, ctx, &kinds),
                receiver,
                callee,
                location: location_of(node),
            });
        });

        serde_json::to_value(records).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageDispatcher;

    fn records(language: LanguageId, path: &str, source: &'static str) -> Vec<CallRecord> {
        let dispatcher = LanguageDispatcher::with_builtins();
        let parsed = dispatcher.parse(language, source).unwrap();
        let tree = parsed.tree.unwrap();
        let ctx = ExtractionContext { path, language, source };
        let value = CallExtractor.extract(&tree, &ctx);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn finds_method_call_on_a_receiver() {
        let records = records(
            LanguageId::TypeScript,
            "a.ts",
            "class A {\n  m() {\n    return B.n();\n  }\n}\n",
        );
        let call = records.iter().find(|r| r.callee == "n").unwrap();
        assert_eq!(call.receiver, Some("B".to_string()));
        assert_eq!(call.caller, Some("m".to_string()));
    }

    #[test]
    fn finds_bare_function_call() {
        let records = records(LanguageId::TypeScript, "a.ts", "function f() {\n  g();\n}\n");
        let call = records.iter().find(|r| r.callee == "g").unwrap();
        assert_eq!(call.receiver, None);
        assert_eq!(call.caller, Some("f".to_string()));
    }

    #[test]
    fn python_attribute_call_is_captured() {
        let records = records(LanguageId::Python, "a.py", "def f():\n    obj.run()\n");
        let call = records.iter().find(|r| r.callee == "run").unwrap();
        assert_eq!(call.receiver, Some("obj".to_string()));
        assert_eq!(call.caller, Some("f".to_string()));
    }
}
