use super::TreeSitterParser;
use crate::features::parsing::domain::LanguageId;

pub fn adapter() -> TreeSitterParser {
    TreeSitterParser::new(LanguageId::Go, tree_sitter_go::language())
}
