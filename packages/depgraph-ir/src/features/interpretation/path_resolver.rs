//! Path Resolver interpreter: turns each dependency's raw source string into
//! a resolved on-disk path, or `external`/`missing-file`.

use crate::features::extraction::dependency::DependencyRecord;
use crate::features::interpretation::ports::{Interpreter, InterpretationContext};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

const BUILTIN_MODULES: &[&str] = &[
    "fs", "path", "os", "sys", "io", "net", "http", "json", "time", "math", "crypto",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedDependency {
    pub source: String,
    pub resolved_path: String,
    pub resolution: String,
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

pub struct PathResolverInterpreter;

impl Interpreter for PathResolverInterpreter {
    fn name(&self) -> &str {
        "path_resolver"
    }

    fn supports(&self, extractor_name: &str) -> bool {
        extractor_name == "dependency"
    }

    fn interpret(
        &self,
        input: &serde_json::Value,
        ctx: &InterpretationContext<'_>,
    ) -> Result<serde_json::Value, String> {
        let records: Vec<DependencyRecord> =
            serde_json::from_value(input.clone()).map_err(|e| e.to_string())?;
        let file_dir = Path::new(ctx.file_path).parent().unwrap_or_else(|| Path::new(""));

        let mut resolved = Vec::with_capacity(records.len());
        for record in records {
            let source = record.source;
            if source.starts_with('.') {
                let joined = normalize(&file_dir.join(&source));
                let joined_str = joined.to_string_lossy().to_string();
                let on_disk = match ctx.project_root {
                    Some(root) => Path::new(root).join(&joined).exists(),
                    None => Path::new(&joined_str).exists(),
                };
                resolved.push(ResolvedDependency {
                    source,
                    resolved_path: joined_str,
                    resolution: if on_disk { "relative" } else { "missing-file" }.to_string(),
                });
                continue;
            }

            if let Some((prefix, target)) = ctx
                .path_aliases
                .iter()
                .find(|(alias, _)| source.starts_with(alias.as_str()))
            {
                let rest = source.strip_prefix(prefix.as_str()).unwrap_or("");
                resolved.push(ResolvedDependency {
                    source: source.clone(),
                    resolved_path: format!("{target}{rest}"),
                    resolution: "alias".to_string(),
                });
                continue;
            }

            let package_name = source.split('/').next().unwrap_or(&source);
            if ctx.package_dependencies.contains(package_name) {
                resolved.push(ResolvedDependency {
                    source: source.clone(),
                    resolved_path: format!("package:{source}"),
                    resolution: "package".to_string(),
                });
                continue;
            }

            if BUILTIN_MODULES.contains(&package_name) {
                resolved.push(ResolvedDependency {
                    source: source.clone(),
                    resolved_path: format!("builtin:{source}"),
                    resolution: "builtin".to_string(),
                });
                continue;
            }

            resolved.push(ResolvedDependency {
                source: source.clone(),
                resolved_path: format!("external:{source}"),
                resolution: "external".to_string(),
            });
        }

        serde_json::to_value(resolved).map_err(|e| e.to_string())
    }
}
