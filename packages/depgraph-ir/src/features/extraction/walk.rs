//! Generic pre-order tree walking shared by the extractors.

use crate::shared::models::ErrorLocation;
use tree_sitter::Node;

pub fn for_each_node<'a>(root: Node<'a>, mut visit: impl FnMut(Node<'a>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

pub fn location_of(node: Node<'_>) -> ErrorLocation {
    let start = node.start_position();
    let end = node.end_position();
    ErrorLocation {
        line: start.row as u32 + 1,
        column: start.column as u32,
        end_line: Some(end.row as u32 + 1),
        end_column: Some(end.column as u32),
    }
}

/// First descendant (including self's direct children) whose kind matches
/// one of `name_kinds` — used to pull a declaration's name out of its node.
pub fn first_named_child<'a>(node: Node<'a>, name_kinds: &[&str]) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|child| name_kinds.contains(&child.kind()))
}

/// First string-literal-shaped descendant's unquoted text, used to pull an
/// import's source path out of an import statement subtree.
pub fn first_string_literal_text<'a>(node: Node<'a>, source: &'a str) -> Option<String> {
    let mut found = None;
    for_each_node(node, |n| {
        if found.is_some() {
            return;
        }
        if matches!(n.kind(), "string" | "interpreted_string_literal" | "raw_string_literal") {
            if let Ok(text) = n.utf8_text(source.as_bytes()) {
                found = Some(text.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string());
            }
        }
    });
    found
}
