use super::TreeSitterParser;
use crate::features::parsing::domain::LanguageId;

pub fn adapter() -> TreeSitterParser {
    TreeSitterParser::new(LanguageId::Java, tree_sitter_java::language())
}
