//! Integration tests seeding the six concrete end-to-end scenarios the
//! analysis/inference/store layers are built against.

use depgraph_ir::config::AnalysisConfig;
use depgraph_ir::errors::AnalysisError;
use depgraph_ir::features::analysis_engine::{AnalysisEngine, AnalysisOptions, FileInput};
use depgraph_ir::features::inference::InferenceEngine;
use depgraph_ir::shared::models::AnalysisResult;
use depgraph_ir::system::AnalysisSystem;
use depgraph_storage::domain::edge_registry::EdgeTypeRegistry;
use depgraph_storage::domain::rdf_address::SymbolSegment;
use depgraph_storage::{Edge, EdgeKind, GraphOp, GraphStore, InMemoryGraphStore, Node, NodeKind, RdfAddress};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn class_node(project: &str, file: &str, name: &str) -> Node {
    let address = RdfAddress::for_file(project, file).with_segment(SymbolSegment::new(NodeKind::Class, [name]));
    Node::new(address, name)
}

/// Scenario 1: a file importing another and declaring a class with a
/// method that calls a method on the imported class yields a file node, a
/// class node, a method node, an `imports_file` edge to the imported file,
/// and a `calls` edge from the calling method to the called one, once both
/// files are analyzed. `b.ts` is analyzed first so `B.n` is already in the
/// symbol index by the time `a.ts`'s call site resolves against it.
#[tokio::test]
async fn single_file_import_and_class_method_graph() {
    let system = AnalysisSystem::new(AnalysisConfig::default(), "project", Arc::new(InMemoryGraphStore::new()));
    let opts = AnalysisOptions {
        project_root: Some(".".to_string()),
        ..Default::default()
    };

    let b = FileInput {
        path: "src/b.ts".to_string(),
        content: "export class B { n() { return 2; } }\n".to_string(),
    };
    system.analyze_and_ingest(b, &opts).await.unwrap();

    let a = FileInput {
        path: "src/a.ts".to_string(),
        content: "import {B} from \"./b\";\nclass A { m() { return B.n(); } }\n".to_string(),
    };
    let result_a = system.analyze_and_ingest(a, &opts).await.unwrap();
    assert!(result_a.errors.is_empty());

    let query = system.query();
    let classes = query.find_by_kind(NodeKind::Class).await.unwrap();
    assert_eq!(classes.len(), 2);
    let methods = query.find_by_kind(NodeKind::Method).await.unwrap();
    assert_eq!(methods.len(), 2);

    let a_id = RdfAddress::for_file("project", "src/a.ts").to_string();
    let b_id = RdfAddress::for_file("project", "src/b.ts").to_string();
    let imports = query.outgoing(&a_id, Some(EdgeKind::ImportsFile)).await.unwrap();
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].target_id, b_id);

    let declares = query.outgoing(&a_id, Some(EdgeKind::Declares)).await.unwrap();
    assert_eq!(declares.len(), 1);

    let m = methods.iter().find(|n| n.name == "m").unwrap();
    let n = methods.iter().find(|n| n.name == "n").unwrap();
    let calls = query.outgoing(&m.id, Some(EdgeKind::Calls)).await.unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target_id, n.id);
}

/// Scenario 2: a syntax error is reported with its location, extractors
/// still run against the partial tree, and the second call with identical
/// content is a cache hit.
#[tokio::test]
async fn syntax_error_reported_then_second_parse_is_cache_hit() {
    let engine = Arc::new(AnalysisEngine::new(AnalysisConfig::default()));
    let input = FileInput {
        path: "src/broken.ts".to_string(),
        content: "class {{{\n\n\n".to_string(),
    };
    let opts = AnalysisOptions::default();

    let first = engine.analyze_file(&input, &opts).await;
    assert!(!first.errors.is_empty());
    assert_eq!(first.errors[0].kind, "ParseError");
    assert!(!first.cache_hit);

    let stats_before = engine.cache_stats();
    let second = engine.analyze_file(&input, &opts).await;
    let stats_after = engine.cache_stats();
    assert_eq!(stats_before.size, stats_after.size);
    assert_eq!(first.errors, second.errors);
    assert!(second.cache_hit);
}

/// Scenario 3: a cycle `n1 -> n2 -> n3 -> n1` under a transitive kind
/// returns exactly `{n2: 1, n3: 2}`, excluding the start node.
#[tokio::test]
async fn transitive_closure_over_a_cycle_excludes_start() {
    let store = InMemoryGraphStore::new();
    let registry = EdgeTypeRegistry::with_builtins();
    let inference = InferenceEngine::new(EdgeTypeRegistry::with_builtins(), 10, 30, 64);

    let n1 = Node::new(RdfAddress::for_file("proj", "n1.ts"), "n1");
    let n2 = Node::new(RdfAddress::for_file("proj", "n2.ts"), "n2");
    let n3 = Node::new(RdfAddress::for_file("proj", "n3.ts"), "n3");
    let (id1, id2, id3) = (n1.id.clone(), n2.id.clone(), n3.id.clone());
    store.upsert_node(n1).await.unwrap();
    store.upsert_node(n2).await.unwrap();
    store.upsert_node(n3).await.unwrap();
    store.upsert_edge(Edge::new(id1.clone(), id2.clone(), EdgeKind::DependsOn)).await.unwrap();
    store.upsert_edge(Edge::new(id2.clone(), id3.clone(), EdgeKind::DependsOn)).await.unwrap();
    store.upsert_edge(Edge::new(id3.clone(), id1.clone(), EdgeKind::DependsOn)).await.unwrap();

    let result = inference.transitive(&store, &id1, EdgeKind::DependsOn, 10).await.unwrap();
    assert_eq!(result.hits.len(), 2);
    assert!(!result.hits.iter().any(|h| h.target == id1));
    let n2_hit = result.hits.iter().find(|h| h.target == id2).unwrap();
    assert_eq!(n2_hit.path_length, 1);
    let n3_hit = result.hits.iter().find(|h| h.target == id3).unwrap();
    assert_eq!(n3_hit.path_length, 2);
    let _ = registry;
}

/// Scenario 4: `C extends B extends A` under an inheritable `extends`
/// kind, queried from `C` with `includeParents=true`, walks up two levels
/// to `{B: 1, A: 2}`, each tagged `direction = "up"`.
#[tokio::test]
async fn hierarchical_walk_over_three_level_class_chain() {
    let store = InMemoryGraphStore::new();
    let registry = EdgeTypeRegistry::with_builtins();
    let inference = InferenceEngine::new(EdgeTypeRegistry::with_builtins(), 10, 30, 64);

    let a = class_node("proj", "f.ts", "A");
    let b = class_node("proj", "f.ts", "B");
    let c = class_node("proj", "f.ts", "C");
    let (a_id, b_id, c_id) = (a.id.clone(), b.id.clone(), c.id.clone());
    store.upsert_node(a).await.unwrap();
    store.upsert_node(b).await.unwrap();
    store.upsert_node(c).await.unwrap();
    store.upsert_edge(Edge::new(c_id.clone(), b_id.clone(), EdgeKind::Extends)).await.unwrap();
    store.upsert_edge(Edge::new(b_id.clone(), a_id.clone(), EdgeKind::Extends)).await.unwrap();

    let result = inference
        .hierarchical(&store, &c_id, EdgeKind::Extends, 3, false, true)
        .await
        .unwrap();
    assert_eq!(result.entries.len(), 2);
    assert_eq!(result.entries[0].node_id, b_id);
    assert_eq!(result.entries[0].depth, 1);
    assert_eq!(result.entries[0].direction.as_str(), "up");
    assert_eq!(result.entries[1].node_id, a_id);
    assert_eq!(result.entries[1].depth, 2);
    assert_eq!(result.entries[1].direction.as_str(), "up");
    let _ = registry;
}

/// Scenario 5: upserting an edge to a node that doesn't exist is rejected
/// and rolled back — a follow-up read of the source's outgoing edges
/// doesn't see it.
#[tokio::test]
async fn upsert_edge_to_missing_node_is_rejected_and_rolled_back() {
    let store = InMemoryGraphStore::new();
    let n1 = Node::new(RdfAddress::for_file("proj", "n1.ts"), "n1");
    let n1_id = n1.id.clone();
    store.upsert_node(n1).await.unwrap();

    let missing_id = RdfAddress::for_file("proj", "missing.ts").to_string();
    let err = store
        .apply(vec![GraphOp::UpsertEdge(Edge::new(n1_id.clone(), missing_id, EdgeKind::ImportsFile))])
        .await
        .unwrap_err();
    assert!(matches!(err, depgraph_storage::StorageError::DanglingEndpoint(_)));

    let edges = store.outgoing(&n1_id, None).await.unwrap();
    assert!(edges.is_empty());
}

/// Scenario 6: a batch preserves input order across every file, and a
/// timed-out file's result carries exactly one `Timeout` error with no
/// extracted data — exercised directly since reliably forcing a real
/// 15s-scale timeout inside a fast test suite would be nondeterministic.
#[tokio::test]
async fn batch_of_one_hundred_files_preserves_order() {
    let engine = Arc::new(AnalysisEngine::new(AnalysisConfig::default()));
    let inputs: Vec<FileInput> = (0..100)
        .map(|i| FileInput {
            path: format!("src/f{i}.ts"),
            content: format!("const x{i} = {i};"),
        })
        .collect();
    let opts = Arc::new(AnalysisOptions::default());
    let results = engine
        .analyze_batch(inputs.clone(), opts, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(results.len(), 100);
    for (input, result) in inputs.iter().zip(results.iter()) {
        assert_eq!(input.path, result.file_path);
    }
}

#[test]
fn timed_out_file_result_has_exactly_one_timeout_error_and_no_data() {
    let result = AnalysisResult::empty_for_timeout("src/slow.ts", 15_000);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, "Timeout");
    assert!(result.extracted_data.is_empty());
    assert!(result.interpreted_data.is_empty());
}

#[tokio::test]
async fn depth_ceiling_is_enforced_as_depth_exceeded() {
    let store = InMemoryGraphStore::new();
    let inference = InferenceEngine::new(EdgeTypeRegistry::with_builtins(), 10, 30, 4);
    let err = inference
        .transitive(&store, "proj/f.ts", EdgeKind::DependsOn, 100)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::DepthExceeded(4)));
}
