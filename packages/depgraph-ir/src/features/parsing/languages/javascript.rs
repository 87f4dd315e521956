use super::TreeSitterParser;
use crate::features::parsing::domain::LanguageId;

pub fn adapter() -> TreeSitterParser {
    TreeSitterParser::new(LanguageId::JavaScript, tree_sitter_javascript::language())
}
