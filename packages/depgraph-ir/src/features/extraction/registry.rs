//! Maps extractor name to instance; runs every applicable extractor over a
//! tree and folds per-extractor failures into the caller's error list
//! instead of aborting the rest.

use crate::features::extraction::ports::Extractor;
use crate::features::parsing::LanguageId;
use std::collections::HashMap;
use tree_sitter::Tree;

use super::ports::ExtractionContext;

pub struct ExtractorRegistry {
    extractors: HashMap<String, Box<dyn Extractor>>,
}

pub struct ExtractorRunOutcome {
    pub extracted: HashMap<String, serde_json::Value>,
    pub errors: Vec<(String, String)>,
}

impl ExtractorRegistry {
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(super::dependency::DependencyExtractor));
        registry.register(Box::new(super::identifier::IdentifierExtractor));
        registry.register(Box::new(super::complexity::ComplexityExtractor));
        registry.register(Box::new(super::markdown_link::MarkdownLinkExtractor));
        registry.register(Box::new(super::call::CallExtractor));
        registry
    }

    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.insert(extractor.name().to_string(), extractor);
    }

    pub fn run_all(&self, tree: &Tree, ctx: &ExtractionContext<'_>) -> ExtractorRunOutcome {
        let mut extracted = HashMap::new();
        let mut errors = Vec::new();
        for (name, extractor) in &self.extractors {
            if !extractor.supports(ctx.language) {
                continue;
            }
            let value = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                extractor.extract(tree, ctx)
            }));
            match value {
                Ok(value) => {
                    extracted.insert(name.clone(), value);
                }
                Err(_) => {
                    errors.push((name.clone(), "extractor panicked".to_string()));
                }
            }
        }
        ExtractorRunOutcome { extracted, errors }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
