//! Picks the adapter for a detected language and runs it.

use crate::features::parsing::domain::LanguageId;
use crate::features::parsing::languages;
use crate::features::parsing::ports::{LanguageParser, RawParse};

pub struct LanguageDispatcher {
    adapters: Vec<Box<dyn LanguageParser>>,
}

impl LanguageDispatcher {
    pub fn with_builtins() -> Self {
        Self {
            adapters: vec![
                Box::new(languages::typescript::adapter()),
                Box::new(languages::typescript::tsx_adapter()),
                Box::new(languages::javascript::adapter()),
                Box::new(languages::java::adapter()),
                Box::new(languages::python::adapter()),
                Box::new(languages::go::adapter()),
                Box::new(languages::markdown::adapter()),
            ],
        }
    }

    pub fn detect(&self, path: &str, content: Option<&str>) -> LanguageId {
        LanguageId::detect(path, content)
    }

    /// Parse `content` whose language was already detected as `language`.
    /// Returns `None` for `External`/`Unknown`, which have no adapter.
    pub fn parse(&self, language: LanguageId, content: &str) -> Option<RawParse> {
        self.adapters
            .iter()
            .find(|a| a.supports(language))
            .map(|a| a.parse(content))
    }
}

impl Default for LanguageDispatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typescript_source() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let lang = dispatcher.detect("src/a.ts", None);
        assert_eq!(lang, LanguageId::TypeScript);
        let parsed = dispatcher.parse(lang, "const x: number = 1;").unwrap();
        assert!(parsed.tree.is_some());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn surfaces_syntax_errors_without_failing() {
        let dispatcher = LanguageDispatcher::with_builtins();
        let lang = dispatcher.detect("src/a.ts", None);
        let parsed = dispatcher.parse(lang, "class {{{").unwrap();
        assert!(!parsed.errors.is_empty());
    }

    #[test]
    fn unknown_language_has_no_adapter() {
        let dispatcher = LanguageDispatcher::with_builtins();
        assert!(dispatcher.parse(LanguageId::Unknown, "").is_none());
    }
}
