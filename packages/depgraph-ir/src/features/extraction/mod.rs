pub mod call;
pub mod complexity;
pub mod dependency;
pub mod identifier;
pub mod language_kinds;
pub mod markdown_link;
pub mod ports;
pub mod registry;
pub mod walk;

pub use ports::{ExtractionContext, Extractor, ValidationReport};
pub use registry::{ExtractorRegistry, ExtractorRunOutcome};
