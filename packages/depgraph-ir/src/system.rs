//! Wires the analysis pipeline to a concrete graph store: the one value a
//! caller constructs to parse files, fold their extracted/interpreted data
//! into the graph as a single atomic batch, and query the result.

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::analysis_engine::{AnalysisEngine, AnalysisOptions, FileInput};
use crate::features::extraction::call::CallRecord;
use crate::features::extraction::identifier::IdentifierRecord;
use crate::features::inference::InferenceEngine;
use crate::features::interpretation::path_resolver::ResolvedDependency;
use crate::features::query_surface::QuerySurface;
use crate::shared::models::AnalysisResult;
use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::domain::rdf_address::SymbolSegment;
use depgraph_storage::domain::span::Span;
use depgraph_storage::{Edge, EdgeKind, GraphOp, GraphStore, Node, NodeKind, RdfAddress};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// The value a caller constructs: an analysis engine, the graph store it
/// ingests into, and the edge registry / inference engine the query surface
/// reads through. A single fixed `project` name scopes every RDF address
/// this system produces, per the single-project assumption in DESIGN.md.
pub struct AnalysisSystem {
    pub engine: Arc<AnalysisEngine>,
    store: Arc<dyn GraphStore>,
    registry: EdgeTypeRegistry,
    inference: InferenceEngine,
    project: String,
    /// Callable-name -> node id, accumulated as files are ingested so a call
    /// site in one file can resolve a callee declared in another. Keyed by
    /// bare name (`"n"`) and, when the callable has an enclosing class, also
    /// by qualified name (`"B.n"`); the qualified key is tried first so two
    /// same-named methods on different classes don't collide. Best-effort:
    /// a callee not yet ingested at the time its caller is ingested is left
    /// unlinked, the same simplification already accepted for same-file-only
    /// extends/implements resolution.
    symbol_index: RwLock<HashMap<String, String>>,
}

impl AnalysisSystem {
    pub fn new(config: AnalysisConfig, project: impl Into<String>, store: Arc<dyn GraphStore>) -> Self {
        let inference = InferenceEngine::new(
            EdgeTypeRegistry::with_builtins(),
            config.inference_cache_capacity,
            config.inference_cache_ttl_secs,
            config.inference_depth_ceiling,
        );
        Self {
            engine: Arc::new(AnalysisEngine::new(config)),
            store,
            registry: EdgeTypeRegistry::with_builtins(),
            inference,
            project: project.into(),
            symbol_index: RwLock::new(HashMap::new()),
        }
    }

    pub fn query(&self) -> QuerySurface<'_> {
        QuerySurface::new(self.store.as_ref(), &self.registry, &self.inference)
    }

    pub fn registry(&self) -> &EdgeTypeRegistry {
        &self.registry
    }

    pub fn inference(&self) -> &InferenceEngine {
        &self.inference
    }

    /// Analyzes one file and folds its extracted/interpreted data into the
    /// graph store as a single batch — a crashed ingest never leaves the
    /// graph with only some of a file's nodes or edges. Marks the file node
    /// dirty afterward so a subsequent inheritable-propagation query
    /// recomputes rather than serving a stale cached result.
    pub async fn analyze_and_ingest(
        &self,
        input: FileInput,
        opts: &AnalysisOptions,
    ) -> Result<AnalysisResult> {
        let result = self.engine.analyze_file(&input, opts).await;
        let file_id = self.file_address(&result.file_path).to_string();
        let ops = self.build_graph_ops(&result);
        if !ops.is_empty() {
            self.store.apply(ops).await?;
        }
        self.inference.mark_node_changed(&file_id);
        Ok(result)
    }

    fn file_address(&self, file: &str) -> RdfAddress {
        RdfAddress::for_file(self.project.clone(), file.to_string())
    }

    fn build_graph_ops(&self, result: &AnalysisResult) -> Vec<GraphOp> {
        let mut ops = Vec::new();
        let file_address = self.file_address(&result.file_path);
        let file_id = file_address.to_string();
        ops.push(GraphOp::UpsertNode(Node::new(file_address, &result.file_path)));

        if let Some(identifiers) = result.extracted_data.get("identifier") {
            self.ingest_identifiers(identifiers, &result.file_path, &file_id, &mut ops);
        }
        if let Some(resolved) = result.interpreted_data.get("path_resolver") {
            self.ingest_dependencies(resolved, &file_id, &mut ops);
        }
        if let Some(calls) = result.extracted_data.get("call") {
            self.ingest_calls(calls, &mut ops);
        }
        ops
    }

    fn ingest_identifiers(
        &self,
        identifiers: &serde_json::Value,
        file: &str,
        file_id: &str,
        ops: &mut Vec<GraphOp>,
    ) {
        let records: Vec<IdentifierRecord> = match serde_json::from_value(identifiers.clone()) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "identifier extractor output did not match IdentifierRecord shape");
                return;
            }
        };

        // First pass: upsert every declared symbol (and Go/Java package
        // nodes) so the second pass's contains/extends/implements edges
        // always point at an id already present in this same batch.
        let mut resolved = Vec::with_capacity(records.len());
        let mut by_name: std::collections::HashMap<String, String> = std::collections::HashMap::new();
        for record in &records {
            if record.kind == "Package" {
                let address = RdfAddress::for_file(self.project.clone(), "<external>".to_string())
                    .with_segment(SymbolSegment::new(NodeKind::Package, [record.name.clone()]));
                let package_id = address.to_string();
                ops.push(GraphOp::UpsertNode(Node::new(address, &record.name)));
                ops.push(GraphOp::UpsertEdge(Edge::new(
                    file_id.to_string(),
                    package_id,
                    EdgeKind::BelongsTo,
                )));
                continue;
            }

            let Ok(kind) = record.kind.parse::<NodeKind>() else {
                warn!(kind = %record.kind, "unrecognized identifier kind, skipping");
                continue;
            };
            let address = self
                .file_address(file)
                .with_segment(SymbolSegment::new(kind, [record.name.clone()]));
            let symbol_id = address.to_string();
            let node = Node::new(address, &record.name).with_location(Span::new(
                record.location.line,
                record.location.column,
                record.location.end_line.unwrap_or(record.location.line),
                record.location.end_column.unwrap_or(record.location.column),
            ));
            ops.push(GraphOp::UpsertNode(node));

            if matches!(kind, NodeKind::Class | NodeKind::Interface) {
                by_name.insert(record.name.clone(), symbol_id.clone());
            }

            if matches!(kind, NodeKind::Method | NodeKind::Function | NodeKind::Constructor) {
                let mut index = self.symbol_index.write().unwrap();
                index.insert(record.name.clone(), symbol_id.clone());
                if let Some(parent) = &record.parent {
                    index.insert(format!("{parent}.{}", record.name), symbol_id.clone());
                }
            }

            for annotation in &record.annotations {
                let annotation_address = self
                    .file_address(file)
                    .with_segment(SymbolSegment::new(NodeKind::Symbol, [annotation.clone()]));
                let annotation_id = annotation_address.to_string();
                ops.push(GraphOp::UpsertNode(Node::new(annotation_address, annotation)));
                ops.push(GraphOp::UpsertEdge(Edge::new(
                    symbol_id.clone(),
                    annotation_id,
                    EdgeKind::AnnotatedWith,
                )));
            }

            resolved.push((record, symbol_id));
        }

        // Second pass: contains from the enclosing class when a symbol is
        // nested, declares from the file otherwise; extends/implements
        // resolved against same-file class/interface names only — a
        // supertype declared in another file is left unlinked rather than
        // guessed at.
        for (record, symbol_id) in &resolved {
            match record.parent.as_ref().and_then(|name| by_name.get(name)) {
                Some(parent_id) => ops.push(GraphOp::UpsertEdge(Edge::new(
                    parent_id.clone(),
                    symbol_id.clone(),
                    EdgeKind::Contains,
                ))),
                None => ops.push(GraphOp::UpsertEdge(Edge::new(
                    file_id.to_string(),
                    symbol_id.clone(),
                    EdgeKind::Declares,
                ))),
            }
            for target in &record.extends {
                if let Some(target_id) = by_name.get(target) {
                    ops.push(GraphOp::UpsertEdge(Edge::new(
                        symbol_id.clone(),
                        target_id.clone(),
                        EdgeKind::Extends,
                    )));
                }
            }
            for target in &record.implements {
                if let Some(target_id) = by_name.get(target) {
                    ops.push(GraphOp::UpsertEdge(Edge::new(
                        symbol_id.clone(),
                        target_id.clone(),
                        EdgeKind::Implements,
                    )));
                }
            }
        }
    }

    /// Resolves call sites against `symbol_index`: a `receiver.method()`
    /// call prefers the qualified `receiver.method` key, falling back to a
    /// bare lookup so a receiver that's an instance (not a class name) still
    /// resolves when the method name is unambiguous. A call with no
    /// resolvable caller or callee is dropped rather than guessed at.
    fn ingest_calls(&self, calls: &serde_json::Value, ops: &mut Vec<GraphOp>) {
        let records: Vec<CallRecord> = match serde_json::from_value(calls.clone()) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "call extractor output did not match CallRecord shape");
                return;
            }
        };

        let index = self.symbol_index.read().unwrap();
        for record in &records {
            let Some(caller_name) = &record.caller else {
                continue;
            };
            let Some(caller_id) = index.get(caller_name.as_str()) else {
                continue;
            };
            let callee_id = record
                .receiver
                .as_ref()
                .and_then(|receiver| index.get(&format!("{receiver}.{}", record.callee)))
                .or_else(|| index.get(record.callee.as_str()));
            let Some(callee_id) = callee_id else {
                continue;
            };
            ops.push(GraphOp::UpsertEdge(Edge::new(
                caller_id.clone(),
                callee_id.clone(),
                EdgeKind::Calls,
            )));
        }
    }

    fn ingest_dependencies(&self, resolved: &serde_json::Value, file_id: &str, ops: &mut Vec<GraphOp>) {
        let records: Vec<ResolvedDependency> = match serde_json::from_value(resolved.clone()) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "path resolver output did not match ResolvedDependency shape");
                return;
            }
        };
        for dep in records {
            let (target, kind) = match dep.resolution {
                "relative" | "alias" => {
                    let address = self.file_address(&dep.resolved_path);
                    (Node::new(address, &dep.resolved_path), EdgeKind::ImportsFile)
                }
                "missing-file" => {
                    let address = self
                        .file_address(&dep.resolved_path)
                        .with_segment(SymbolSegment::new(NodeKind::MissingFile, [dep.resolved_path.clone()]));
                    (Node::new(address, &dep.resolved_path), EdgeKind::ImportsFile)
                }
                "package" | "builtin" => {
                    let address = RdfAddress::for_file(self.project.clone(), "<external>".to_string())
                        .with_segment(SymbolSegment::new(NodeKind::Library, [dep.source.clone()]));
                    (Node::new(address, &dep.source), EdgeKind::ImportsLibrary)
                }
                _ => {
                    let address = RdfAddress::for_file(self.project.clone(), "<external>".to_string())
                        .with_segment(SymbolSegment::new(NodeKind::ExternalResource, [dep.source.clone()]));
                    (Node::new(address, &dep.source), EdgeKind::Imports)
                }
            };
            let target_id = target.id.clone();
            ops.push(GraphOp::UpsertNode(target));
            ops.push(GraphOp::UpsertEdge(Edge::new(file_id.to_string(), target_id, kind)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depgraph_storage::{InMemoryGraphStore, NodeKind as StorageNodeKind};

    fn system() -> AnalysisSystem {
        AnalysisSystem::new(
            AnalysisConfig::default(),
            "proj",
            Arc::new(InMemoryGraphStore::new()),
        )
    }

    #[tokio::test]
    async fn ingests_a_file_with_a_class_and_relative_import() {
        let system = system();
        let input = FileInput {
            path: "src/a.ts".to_string(),
            content: "import {B} from \"./b\";\nclass A { m() { return 1; } }\n".to_string(),
        };
        let opts = AnalysisOptions::default();
        let result = system.analyze_and_ingest(input, &opts).await.unwrap();
        assert!(result.errors.is_empty());

        let query = system.query();
        let classes = query.find_by_kind(StorageNodeKind::Class).await.unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "A");

        let file_id = RdfAddress::for_file("proj", "src/a.ts").to_string();
        let outgoing = query.outgoing(&file_id, Some(EdgeKind::ImportsFile)).await.unwrap();
        assert_eq!(outgoing.len(), 1);
    }

    #[tokio::test]
    async fn marks_file_dirty_after_ingest() {
        let system = system();
        let input = FileInput {
            path: "src/a.ts".to_string(),
            content: "class A {}".to_string(),
        };
        let opts = AnalysisOptions::default();
        system.analyze_and_ingest(input, &opts).await.unwrap();
        let file_id = RdfAddress::for_file("proj", "src/a.ts").to_string();
        assert!(system.inference().is_dirty(&file_id));
    }

    #[tokio::test]
    async fn method_is_contained_by_its_class_not_declared_by_the_file() {
        let system = system();
        let input = FileInput {
            path: "src/a.ts".to_string(),
            content: "class A extends B { m() { return 1; } }\nclass B {}\n".to_string(),
        };
        let opts = AnalysisOptions::default();
        system.analyze_and_ingest(input, &opts).await.unwrap();

        let query = system.query();
        let classes = query.find_by_kind(StorageNodeKind::Class).await.unwrap();
        let a = classes.iter().find(|n| n.name == "A").unwrap();
        let b = classes.iter().find(|n| n.name == "B").unwrap();
        let methods = query.find_by_kind(StorageNodeKind::Method).await.unwrap();
        let m = &methods[0];

        let contains = query.outgoing(&a.id, Some(EdgeKind::Contains)).await.unwrap();
        assert_eq!(contains.len(), 1);
        assert_eq!(contains[0].target_id, m.id);

        let file_id = RdfAddress::for_file("proj", "src/a.ts").to_string();
        let declares = query.outgoing(&file_id, Some(EdgeKind::Declares)).await.unwrap();
        assert!(declares.iter().any(|e| e.target_id == a.id));
        assert!(!declares.iter().any(|e| e.target_id == m.id));

        let extends = query.outgoing(&a.id, Some(EdgeKind::Extends)).await.unwrap();
        assert_eq!(extends.len(), 1);
        assert_eq!(extends[0].target_id, b.id);
    }

    #[tokio::test]
    async fn cross_file_call_resolves_once_the_callee_is_ingested() {
        let system = system();
        let opts = AnalysisOptions::default();

        let b = FileInput {
            path: "src/b.ts".to_string(),
            content: "export class B { n() { return 2; } }\n".to_string(),
        };
        system.analyze_and_ingest(b, &opts).await.unwrap();

        let a = FileInput {
            path: "src/a.ts".to_string(),
            content: "import {B} from \"./b\";\nclass A { m() { return B.n(); } }\n".to_string(),
        };
        system.analyze_and_ingest(a, &opts).await.unwrap();

        let query = system.query();
        let methods = query.find_by_kind(StorageNodeKind::Method).await.unwrap();
        let m = methods.iter().find(|n| n.name == "m").unwrap();
        let n = methods.iter().find(|n| n.name == "n").unwrap();

        let calls = query.outgoing(&m.id, Some(EdgeKind::Calls)).await.unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target_id, n.id);
    }
}
