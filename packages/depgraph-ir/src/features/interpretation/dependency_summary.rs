//! Dependency Summary interpreter: rolls the path resolver's per-import
//! records up into totals a caller can act on without re-walking the list.

use crate::features::interpretation::path_resolver::ResolvedDependency;
use crate::features::interpretation::ports::{InterpretationContext, Interpreter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencySummary {
    pub total: usize,
    pub relative: usize,
    pub alias: usize,
    pub package: usize,
    pub builtin: usize,
    pub external: usize,
    pub missing: usize,
}

pub struct DependencySummaryInterpreter;

impl Interpreter for DependencySummaryInterpreter {
    fn name(&self) -> &str {
        "dependency_summary"
    }

    fn supports(&self, extractor_name: &str) -> bool {
        extractor_name == "path_resolver"
    }

    fn interpret(
        &self,
        input: &serde_json::Value,
        _ctx: &InterpretationContext<'_>,
    ) -> Result<serde_json::Value, String> {
        let resolved: Vec<ResolvedDependency> =
            serde_json::from_value(input.clone()).map_err(|e| e.to_string())?;

        let mut summary = DependencySummary {
            total: resolved.len(),
            ..Default::default()
        };
        for dep in &resolved {
            match dep.resolution.as_str() {
                "relative" => summary.relative += 1,
                "alias" => summary.alias += 1,
                "package" => summary.package += 1,
                "builtin" => summary.builtin += 1,
                "external" => summary.external += 1,
                "missing-file" => summary.missing += 1,
                _ => {}
            }
        }

        serde_json::to_value(summary).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageId;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn counts_each_resolution_kind() {
        let resolved = vec![
            ResolvedDependency {
                source: "./a".to_string(),
                resolved_path: "a".to_string(),
                resolution: "relative".to_string(),
            },
            ResolvedDependency {
                source: "lodash".to_string(),
                resolved_path: "package:lodash".to_string(),
                resolution: "package".to_string(),
            },
            ResolvedDependency {
                source: "left-pad".to_string(),
                resolved_path: "external:left-pad".to_string(),
                resolution: "external".to_string(),
            },
        ];
        let input = serde_json::to_value(resolved).unwrap();
        let aliases = HashMap::new();
        let packages = HashSet::new();
        let options = HashMap::new();
        let ctx = InterpretationContext {
            file_path: "src/a.ts",
            language: LanguageId::TypeScript,
            project_root: None,
            path_aliases: &aliases,
            package_dependencies: &packages,
            options: &options,
        };
        let value = DependencySummaryInterpreter.interpret(&input, &ctx).unwrap();
        let summary: DependencySummary = serde_json::from_value(value).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.relative, 1);
        assert_eq!(summary.package, 1);
        assert_eq!(summary.external, 1);
    }
}
