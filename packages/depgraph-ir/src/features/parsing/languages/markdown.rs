use super::TreeSitterParser;
use crate::features::parsing::domain::LanguageId;

pub fn adapter() -> TreeSitterParser {
    TreeSitterParser::new(LanguageId::Markdown, tree_sitter_md::language())
}
