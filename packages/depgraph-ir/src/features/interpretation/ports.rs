//! The interpreter port: extractor output plus file context in, analysis
//! records out.

use crate::features::parsing::LanguageId;
use std::collections::{HashMap, HashSet};

pub struct InterpretationContext<'a> {
    pub file_path: &'a str,
    pub language: LanguageId,
    pub project_root: Option<&'a str>,
    pub path_aliases: &'a HashMap<String, String>,
    pub package_dependencies: &'a HashSet<String>,
    pub options: &'a HashMap<String, String>,
}

pub trait Interpreter: Send + Sync {
    fn name(&self) -> &str;
    /// Which extractor's output (by extractor name) this interpreter reads.
    fn supports(&self, extractor_name: &str) -> bool;
    fn interpret(
        &self,
        input: &serde_json::Value,
        ctx: &InterpretationContext<'_>,
    ) -> Result<serde_json::Value, String>;
}
