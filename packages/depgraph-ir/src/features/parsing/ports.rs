//! The port every language adapter implements.

use crate::features::parsing::domain::LanguageId;
use crate::shared::models::{ErrorLocation, ParseErrorRecord};
use tree_sitter::Tree;

/// A parse, including the tree itself — internal to the parsing feature,
/// never exposed past the analysis engine boundary (callers see
/// `shared::models::ParseResult`, which drops the tree).
pub struct RawParse {
    pub tree: Option<Tree>,
    pub language: LanguageId,
    pub parse_time_ms: f64,
    pub errors: Vec<ParseErrorRecord>,
}

pub struct SyntaxResult {
    pub valid: bool,
    pub errors: Vec<ParseErrorRecord>,
}

/// One adapter per supported language. `parse` is total: it never panics or
/// returns `Err`, only a `RawParse` with an empty/partial tree and an error
/// list on failure.
pub trait LanguageParser: Send + Sync {
    fn supports(&self, language: LanguageId) -> bool;
    fn parse(&self, content: &str) -> RawParse;
    fn validate_syntax(&self, content: &str) -> SyntaxResult {
        let parsed = self.parse(content);
        SyntaxResult {
            valid: parsed.errors.is_empty(),
            errors: parsed.errors,
        }
    }
}

pub(crate) fn error_from_node(node: tree_sitter::Node<'_>, message: impl Into<String>) -> ParseErrorRecord {
    let start = node.start_position();
    let end = node.end_position();
    ParseErrorRecord {
        kind: "ParseError".to_string(),
        message: message.into(),
        location: ErrorLocation {
            line: start.row as u32 + 1,
            column: start.column as u32,
            end_line: Some(end.row as u32 + 1),
            end_column: Some(end.column as u32),
        },
    }
}
