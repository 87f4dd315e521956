//! Maps interpreter name to instance; chains interpreters whose `supports`
//! matches either an extractor's name or a prior interpreter's name, so a
//! pipeline like dependency -> path_resolver -> dependency_summary can be
//! expressed without the engine hard-coding the chain.

use crate::features::interpretation::ports::Interpreter;
use std::collections::HashMap;

pub struct InterpreterRegistry {
    interpreters: Vec<Box<dyn Interpreter>>,
}

pub struct InterpreterRunOutcome {
    pub interpreted: HashMap<String, serde_json::Value>,
    pub errors: Vec<(String, String)>,
}

impl InterpreterRegistry {
    pub fn empty() -> Self {
        Self { interpreters: Vec::new() }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(super::path_resolver::PathResolverInterpreter));
        registry.register(Box::new(super::dependency_summary::DependencySummaryInterpreter));
        registry.register(Box::new(super::identifier_analysis::IdentifierAnalysisInterpreter));
        registry
    }

    pub fn register(&mut self, interpreter: Box<dyn Interpreter>) {
        self.interpreters.push(interpreter);
    }

    /// Runs every interpreter whose `supports` matches a name already present
    /// in `sources` (extracted or already-interpreted data), repeating until
    /// a pass adds nothing new so chained interpreters converge.
    pub fn run_all(
        &self,
        sources: &HashMap<String, serde_json::Value>,
        ctx: &super::ports::InterpretationContext<'_>,
    ) -> InterpreterRunOutcome {
        let mut interpreted: HashMap<String, serde_json::Value> = HashMap::new();
        let mut errors = Vec::new();
        let mut available: HashMap<String, serde_json::Value> = sources.clone();

        loop {
            let mut added = false;
            for interpreter in &self.interpreters {
                let name = interpreter.name().to_string();
                if interpreted.contains_key(&name) {
                    continue;
                }
                let input = available
                    .iter()
                    .find(|(source_name, _)| interpreter.supports(source_name));
                let Some((_, input_value)) = input else {
                    continue;
                };
                match interpreter.interpret(input_value, ctx) {
                    Ok(value) => {
                        interpreted.insert(name.clone(), value.clone());
                        available.insert(name, value);
                        added = true;
                    }
                    Err(message) => {
                        errors.push((name, message));
                    }
                }
            }
            if !added {
                break;
            }
        }

        InterpreterRunOutcome { interpreted, errors }
    }
}

impl Default for InterpreterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extraction::dependency::DependencyRecord;
    use crate::features::parsing::LanguageId;
    use crate::shared::models::ErrorLocation;
    use std::collections::HashSet;

    #[test]
    fn chains_path_resolver_into_dependency_summary() {
        let dep_records = vec![DependencyRecord {
            source: "lodash".to_string(),
            dependency_type: "import".to_string(),
            location: ErrorLocation { line: 1, column: 0, end_line: None, end_column: None },
        }];
        let mut sources = HashMap::new();
        sources.insert("dependency".to_string(), serde_json::to_value(dep_records).unwrap());

        let aliases = HashMap::new();
        let mut packages = HashSet::new();
        packages.insert("lodash".to_string());
        let options = HashMap::new();
        let ctx = super::super::ports::InterpretationContext {
            file_path: "src/a.ts",
            language: LanguageId::TypeScript,
            project_root: None,
            path_aliases: &aliases,
            package_dependencies: &packages,
            options: &options,
        };

        let registry = InterpreterRegistry::with_builtins();
        let outcome = registry.run_all(&sources, &ctx);
        assert!(outcome.interpreted.contains_key("path_resolver"));
        assert!(outcome.interpreted.contains_key("dependency_summary"));
        let summary: super::super::dependency_summary::DependencySummary =
            serde_json::from_value(outcome.interpreted["dependency_summary"].clone()).unwrap();
        assert_eq!(summary.package, 1);
    }
}
