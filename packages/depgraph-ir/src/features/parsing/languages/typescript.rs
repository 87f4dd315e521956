use super::TreeSitterParser;
use crate::features::parsing::domain::LanguageId;

pub fn adapter() -> TreeSitterParser {
    TreeSitterParser::new(LanguageId::TypeScript, tree_sitter_typescript::language_typescript())
}

pub fn tsx_adapter() -> TreeSitterParser {
    TreeSitterParser::new(LanguageId::Tsx, tree_sitter_typescript::language_tsx())
}
