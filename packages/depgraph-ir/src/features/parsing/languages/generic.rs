//! Shared tree-sitter plumbing every language adapter wraps.

use crate::features::parsing::domain::LanguageId;
use crate::features::parsing::ports::{error_from_node, LanguageParser, RawParse};
use std::time::Instant;
use tree_sitter::{Language, Parser};

pub struct TreeSitterParser {
    language_id: LanguageId,
    grammar: Language,
}

impl TreeSitterParser {
    pub fn new(language_id: LanguageId, grammar: Language) -> Self {
        Self { language_id, grammar }
    }

    fn collect_errors(tree: &tree_sitter::Tree) -> Vec<crate::shared::models::ParseErrorRecord> {
        let mut errors = Vec::new();
        let mut cursor = tree.walk();
        let mut reached_root = false;
        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                errors.push(error_from_node(
                    node,
                    if node.is_missing() {
                        format!("missing {}", node.kind())
                    } else {
                        "syntax error".to_string()
                    },
                ));
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    reached_root = true;
                    break;
                }
            }
            if reached_root {
                break;
            }
        }
        errors
    }
}

impl LanguageParser for TreeSitterParser {
    fn supports(&self, language: LanguageId) -> bool {
        language == self.language_id
    }

    fn parse(&self, content: &str) -> RawParse {
        let started = Instant::now();
        let mut parser = Parser::new();
        let tree = match parser.set_language(&self.grammar) {
            Ok(()) => parser.parse(content, None),
            Err(_) => None,
        };
        let parse_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        match tree {
            Some(tree) => {
                let errors = Self::collect_errors(&tree);
                RawParse {
                    tree: Some(tree),
                    language: self.language_id,
                    parse_time_ms,
                    errors,
                }
            }
            None => RawParse {
                tree: None,
                language: self.language_id,
                parse_time_ms,
                errors: vec![crate::shared::models::ParseErrorRecord {
                    kind: "ParseError".to_string(),
                    message: "parser produced no tree".to_string(),
                    location: crate::shared::models::ErrorLocation {
                        line: 1,
                        column: 0,
                        end_line: None,
                        end_column: None,
                    },
                }],
            },
        }
    }
}
