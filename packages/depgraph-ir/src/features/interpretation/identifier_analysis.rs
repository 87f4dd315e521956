//! Identifier Analysis interpreter: rolls declared symbols up by kind and
//! surfaces which ones carry annotations, without re-walking the tree.

use crate::features::extraction::identifier::IdentifierRecord;
use crate::features::interpretation::ports::{InterpretationContext, Interpreter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentifierAnalysis {
    pub total: usize,
    pub by_kind: HashMap<String, usize>,
    pub annotated: Vec<String>,
}

pub struct IdentifierAnalysisInterpreter;

impl Interpreter for IdentifierAnalysisInterpreter {
    fn name(&self) -> &str {
        "identifier_analysis"
    }

    fn supports(&self, extractor_name: &str) -> bool {
        extractor_name == "identifier"
    }

    fn interpret(
        &self,
        input: &serde_json::Value,
        _ctx: &InterpretationContext<'_>,
    ) -> Result<serde_json::Value, String> {
        let records: Vec<IdentifierRecord> =
            serde_json::from_value(input.clone()).map_err(|e| e.to_string())?;

        let mut analysis = IdentifierAnalysis {
            total: records.len(),
            ..Default::default()
        };
        for record in &records {
            *analysis.by_kind.entry(record.kind.to_string()).or_insert(0) += 1;
            if !record.annotations.is_empty() {
                analysis.annotated.push(record.name.clone());
            }
        }

        serde_json::to_value(analysis).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageId;
    use crate::shared::models::ErrorLocation;
    use std::collections::{HashMap as Map, HashSet};

    #[test]
    fn rolls_up_kinds_and_flags_annotated() {
        let records = vec![
            IdentifierRecord {
                kind: "Class".to_string(),
                name: "A".to_string(),
                location: ErrorLocation { line: 1, column: 0, end_line: None, end_column: None },
                annotations: vec![],
                parent: None,
                extends: vec![],
                implements: vec![],
            },
            IdentifierRecord {
                kind: "Method".to_string(),
                name: "m".to_string(),
                location: ErrorLocation { line: 2, column: 0, end_line: None, end_column: None },
                annotations: vec!["override".to_string()],
                parent: Some("A".to_string()),
                extends: vec![],
                implements: vec![],
            },
        ];
        let input = serde_json::to_value(records).unwrap();
        let aliases = Map::new();
        let packages = HashSet::new();
        let options = Map::new();
        let ctx = InterpretationContext {
            file_path: "src/a.ts",
            language: LanguageId::TypeScript,
            project_root: None,
            path_aliases: &aliases,
            package_dependencies: &packages,
            options: &options,
        };
        let value = IdentifierAnalysisInterpreter.interpret(&input, &ctx).unwrap();
        let analysis: IdentifierAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(analysis.total, 2);
        assert_eq!(analysis.by_kind.get("Class"), Some(&1));
        assert_eq!(analysis.annotated, vec!["m".to_string()]);
    }
}
