//! Identifier extractor: the declared symbols in a file and their kinds —
//! the basis for the `Class`/`Function`/`Method`/… nodes the graph builder
//! upserts.

use crate::features::extraction::language_kinds::symbol_kinds;
use crate::features::extraction::ports::{ExtractionContext, Extractor};
use crate::features::extraction::walk::{first_named_child, for_each_node, location_of};
use crate::features::parsing::LanguageId;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierRecord {
    pub kind: String,
    pub name: String,
    pub location: crate::shared::models::ErrorLocation,
    /// Extra relations this declaration implies beyond its own node, e.g.
    /// Python decorators (`annotated_with`) or Go package membership
    /// (`belongs_to`) — kept as loose JSON so the interpreter decides.
    pub annotations: Vec<String>,
    /// Name of the enclosing class/interface, if this symbol is nested —
    /// the graph builder turns this into a `contains` edge from that symbol
    /// instead of a `declares` edge from the file.
    #[serde(default)]
    pub parent: Option<String>,
    /// Superclass/base-class names from a class or interface's `extends`
    /// header.
    #[serde(default)]
    pub extends: Vec<String>,
    /// Interface names from a class's `implements` header.
    #[serde(default)]
    pub implements: Vec<String>,
}

pub struct IdentifierExtractor;

impl IdentifierExtractor {
    fn go_type_kind(node: Node<'_>) -> Option<&'static str> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "struct_type" => return Some("Class"),
                "interface_type" => return Some("Interface"),
                _ => {}
            }
        }
        None
    }

    fn decorators_for(node: Node<'_>, ctx: &ExtractionContext<'_>, decorator_kinds: &[&str]) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(parent) = node.parent() {
            let mut cursor = parent.walk();
            for sibling in parent.children(&mut cursor) {
                if sibling.id() == node.id() {
                    break;
                }
                if decorator_kinds.contains(&sibling.kind()) {
                    if let Ok(text) = sibling.utf8_text(ctx.source.as_bytes()) {
                        names.push(text.trim_start_matches('@').trim().to_string());
                    }
                }
            }
        }
        names
    }

    /// Name of the nearest ancestor class/interface declaration, if any.
    fn enclosing_symbol_name(
        node: Node<'_>,
        ctx: &ExtractionContext<'_>,
        kinds: &crate::features::extraction::language_kinds::SymbolKinds,
    ) -> Option<String> {
        let mut current = node.parent();
        while let Some(ancestor) = current {
            let ancestor_kind = ancestor.kind();
            if kinds.class.contains(&ancestor_kind) || kinds.interface.contains(&ancestor_kind) {
                let name_node = first_named_child(ancestor, kinds.name_child_kinds)?;
                return name_node.utf8_text(ctx.source.as_bytes()).ok().map(str::to_string);
            }
            current = ancestor.parent();
        }
        None
    }

    /// Names referenced under any of `clause_kinds` among `node`'s direct
    /// children — the superclass/interface list out of a heritage clause.
    fn heritage_names(node: Node<'_>, ctx: &ExtractionContext<'_>, clause_kinds: &[&str]) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if clause_kinds.contains(&child.kind()) {
                for_each_node(child, |n| {
                    if matches!(n.kind(), "identifier" | "type_identifier" | "property_identifier") {
                        if let Ok(text) = n.utf8_text(ctx.source.as_bytes()) {
                            names.push(text.to_string());
                        }
                    }
                });
            }
        }
        names
    }
}

impl Extractor for IdentifierExtractor {
    fn name(&self) -> &str {
        "identifier"
    }

    fn supports(&self, language: LanguageId) -> bool {
        !matches!(language, LanguageId::Markdown | LanguageId::External | LanguageId::Unknown)
    }

    fn extract(&self, tree: &Tree, ctx: &ExtractionContext<'_>) -> serde_json::Value {
        let kinds = symbol_kinds(ctx.language);
        let mut records = Vec::new();

        for_each_node(tree.root_node(), |node| {
            let node_kind = node.kind();

            if kinds.package.contains(&node_kind) {
                if let Some(name_node) = first_named_child(node, kinds.name_child_kinds) {
                    if let Ok(name) = name_node.utf8_text(ctx.source.as_bytes()) {
                        records.push(IdentifierRecord {
                            kind: "Package".to_string(),
                            name: name.to_string(),
                            location: location_of(node),
                            annotations: Vec::new(),
                            parent: None,
                            extends: Vec::new(),
                            implements: Vec::new(),
                        });
                    }
                }
                return;
            }

            let declared_kind = if kinds.class.contains(&node_kind) {
                if ctx.language == LanguageId::Go {
                    Self::go_type_kind(node)
                } else {
                    Some("Class")
                }
            } else if kinds.interface.contains(&node_kind) && ctx.language != LanguageId::Go {
                Some("Interface")
            } else if kinds.function.contains(&node_kind) {
                Some("Function")
            } else if kinds.method.contains(&node_kind) {
                Some("Method")
            } else if kinds.field.contains(&node_kind) {
                Some("Field")
            } else if kinds.constructor.contains(&node_kind) {
                Some("Constructor")
            } else if kinds.enum_decl.contains(&node_kind) {
                Some("Enum")
            } else if kinds.enum_member.contains(&node_kind) {
                Some("EnumMember")
            } else if kinds.constant.contains(&node_kind) {
                Some("Constant")
            } else if kinds.variable.contains(&node_kind) {
                Some("Variable")
            } else {
                None
            };

            let Some(declared_kind) = declared_kind else {
                return;
            };

            if let Some(name_node) = first_named_child(node, kinds.name_child_kinds) {
                if let Ok(name) = name_node.utf8_text(ctx.source.as_bytes()) {
                    let resolved_kind = if declared_kind == "Method" && name == "constructor" {
                        "Constructor"
                    } else {
                        declared_kind
                    };
                    let (extends, implements) = if resolved_kind == "Class" || resolved_kind == "Interface" {
                        (
                            Self::heritage_names(node, ctx, kinds.heritage_extends),
                            Self::heritage_names(node, ctx, kinds.heritage_implements),
                        )
                    } else {
                        (Vec::new(), Vec::new())
                    };
                    records.push(IdentifierRecord {
                        kind: resolved_kind.to_string(),
                        name: name.to_string(),
                        location: location_of(node),
                        annotations: Self::decorators_for(node, ctx, kinds.decorator),
                        parent: Self::enclosing_symbol_name(node, ctx, &kinds),
                        extends,
                        implements,
                    });
                }
            }
        });

        serde_json::to_value(records).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageDispatcher;

    #[test]
    fn finds_typescript_class_and_method() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let source = "class A {\n  m() {\n    return 1;\n  }\n}\n";
        let parsed = dispatcher.parse(LanguageId::TypeScript, source).unwrap();
        let tree = parsed.tree.unwrap();
        let ctx = ExtractionContext {
            path: "a.ts",
            language: LanguageId::TypeScript,
            source,
        };
        let value = IdentifierExtractor.extract(&tree, &ctx);
        let records: Vec<IdentifierRecord> = serde_json::from_value(value).unwrap();
        assert!(records.iter().any(|r| r.kind == "Class" && r.name == "A"));
        assert!(records.iter().any(|r| r.kind == "Method" && r.name == "m"));
    }

    #[test]
    fn finds_python_decorator_annotation() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let source = "@staticmethod\ndef f():\n    pass\n";
        let parsed = dispatcher.parse(LanguageId::Python, source).unwrap();
        let tree = parsed.tree.unwrap();
        let ctx = ExtractionContext {
            path: "a.py",
            language: LanguageId::Python,
            source,
        };
        let value = IdentifierExtractor.extract(&tree, &ctx);
        let records: Vec<IdentifierRecord> = serde_json::from_value(value).unwrap();
        let f = records.iter().find(|r| r.name == "f").unwrap();
        assert_eq!(f.annotations, vec!["staticmethod".to_string()]);
    }

    #[test]
    fn method_is_nested_under_its_class() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let source = "class A {\n  m() {\n    return 1;\n  }\n}\n";
        let parsed = dispatcher.parse(LanguageId::TypeScript, source).unwrap();
        let tree = parsed.tree.unwrap();
        let ctx = ExtractionContext {
            path: "a.ts",
            language: LanguageId::TypeScript,
            source,
        };
        let value = IdentifierExtractor.extract(&tree, &ctx);
        let records: Vec<IdentifierRecord> = serde_json::from_value(value).unwrap();
        let class = records.iter().find(|r| r.kind == "Class").unwrap();
        let method = records.iter().find(|r| r.kind == "Method").unwrap();
        assert_eq!(class.parent, None);
        assert_eq!(method.parent, Some("A".to_string()));
    }

    #[test]
    fn class_extends_and_implements_are_captured() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let source = "class A extends B implements C {}\n";
        let parsed = dispatcher.parse(LanguageId::TypeScript, source).unwrap();
        let tree = parsed.tree.unwrap();
        let ctx = ExtractionContext {
            path: "a.ts",
            language: LanguageId::TypeScript,
            source,
        };
        let value = IdentifierExtractor.extract(&tree, &ctx);
        let records: Vec<IdentifierRecord> = serde_json::from_value(value).unwrap();
        let class = records.iter().find(|r| r.kind == "Class" && r.name == "A").unwrap();
        assert_eq!(class.extends, vec!["B".to_string()]);
        assert_eq!(class.implements, vec!["C".to_string()]);
    }

    #[test]
    fn go_package_clause_is_recorded() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let source = "package main\n\nfunc f() {}\n";
        let parsed = dispatcher.parse(LanguageId::Go, source).unwrap();
        let tree = parsed.tree.unwrap();
        let ctx = ExtractionContext {
            path: "main.go",
            language: LanguageId::Go,
            source,
        };
        let value = IdentifierExtractor.extract(&tree, &ctx);
        let records: Vec<IdentifierRecord> = serde_json::from_value(value).unwrap();
        assert!(records.iter().any(|r| r.kind == "Package" && r.name == "main"));
    }
}
