//! The analysis engine (C5): the single entry point that turns a file's
//! bytes into an `AnalysisResult`, and fans a batch of files out across a
//! bounded worker pool while preserving input order.

use crate::config::AnalysisConfig;
use crate::errors::{AnalysisError, Result};
use crate::features::ast_cache::{AstCache, CacheStats};
use crate::features::extraction::{ExtractionContext, ExtractorRegistry};
use crate::features::interpretation::{InterpretationContext, InterpreterRegistry};
use crate::features::parsing::{LanguageDispatcher, LanguageId};
use crate::shared::models::{
    AnalysisErrorRecord, AnalysisResult, ErrorLocation, PerformanceMetrics,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct FileInput {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub project_root: Option<String>,
    pub path_aliases: HashMap<String, String>,
    pub package_dependencies: HashSet<String>,
    pub options: HashMap<String, String>,
}

pub struct AnalysisEngine {
    config: AnalysisConfig,
    cache: AstCache,
    dispatcher: LanguageDispatcher,
    extractors: RwLock<ExtractorRegistry>,
    interpreters: RwLock<InterpreterRegistry>,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        let cache = AstCache::new(config.ast_cache_capacity, config.ast_cache_ttl_secs);
        Self {
            config,
            cache,
            dispatcher: LanguageDispatcher::with_builtins(),
            extractors: RwLock::new(ExtractorRegistry::with_builtins()),
            interpreters: RwLock::new(InterpreterRegistry::with_builtins()),
        }
    }

    pub fn register_extractor(&self, extractor: Box<dyn crate::features::extraction::Extractor>) {
        self.extractors.write().unwrap().register(extractor);
    }

    pub fn register_interpreter(&self, interpreter: Box<dyn crate::features::interpretation::Interpreter>) {
        self.interpreters.write().unwrap().register(interpreter);
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub async fn analyze_file(&self, input: &FileInput, opts: &AnalysisOptions) -> AnalysisResult {
        let timeout = Duration::from_secs(self.config.per_file_timeout_secs);
        match tokio::time::timeout(timeout, self.analyze_file_inner(input, opts)).await {
            Ok(result) => result,
            Err(_) => AnalysisResult::empty_for_timeout(
                input.path.clone(),
                self.config.per_file_timeout_secs * 1000,
            ),
        }
    }

    async fn analyze_file_inner(&self, input: &FileInput, opts: &AnalysisOptions) -> AnalysisResult {
        let started = Instant::now();
        let mut errors = Vec::new();

        let language = self.dispatcher.detect(&input.path, Some(&input.content));
        if matches!(language, LanguageId::External | LanguageId::Unknown) {
            return AnalysisResult::unsupported_language(input.path.clone());
        }

        let content_hash = AstCache::content_hash(&input.content);
        let (tree, cache_hit, parse_time_ms, parse_errors) =
            match self.cache.get(&input.path, &content_hash) {
                Some(cached) => (cached.tree, true, cached.parse_time_ms, cached.errors),
                None => match self.dispatcher.parse(language, &input.content) {
                    Some(raw) => {
                        let parse_time_ms = raw.parse_time_ms;
                        let parse_errors = raw.errors.clone();
                        match self.cache.insert(&input.path, &content_hash, raw) {
                            Some(cached) => (cached.tree, false, parse_time_ms, parse_errors),
                            None => {
                                errors.push(parse_failure_record(&input.path, "no syntax tree produced"));
                                return self.finish(
                                    input,
                                    language,
                                    started,
                                    HashMap::new(),
                                    HashMap::new(),
                                    errors,
                                    PerformanceMetrics {
                                        parse_time_ms,
                                        ..Default::default()
                                    },
                                    false,
                                );
                            }
                        }
                    }
                    None => {
                        return AnalysisResult::unsupported_language(input.path.clone());
                    }
                },
            };

        for e in &parse_errors {
            errors.push(AnalysisErrorRecord {
                kind: e.kind.clone(),
                message: e.message.clone(),
                file_path: Some(input.path.clone()),
                location: Some(e.location.clone()),
            });
        }

        let extraction_started = Instant::now();
        let extraction_ctx = ExtractionContext {
            path: &input.path,
            language,
            source: &input.content,
        };
        let extraction_outcome = self.extractors.read().unwrap().run_all(&tree, &extraction_ctx);
        for (extractor, message) in &extraction_outcome.errors {
            errors.push(AnalysisErrorRecord {
                kind: "ExtractorError".to_string(),
                message: format!("{extractor}: {message}"),
                file_path: Some(input.path.clone()),
                location: None,
            });
        }
        let extraction_time_ms = extraction_started.elapsed().as_secs_f64() * 1000.0;

        let interpretation_started = Instant::now();
        let interpretation_ctx = InterpretationContext {
            file_path: &input.path,
            language,
            project_root: opts.project_root.as_deref(),
            path_aliases: &opts.path_aliases,
            package_dependencies: &opts.package_dependencies,
            options: &opts.options,
        };
        let interpretation_outcome = self
            .interpreters
            .read()
            .unwrap()
            .run_all(&extraction_outcome.extracted, &interpretation_ctx);
        for (interpreter, message) in &interpretation_outcome.errors {
            errors.push(AnalysisErrorRecord {
                kind: "InterpreterError".to_string(),
                message: format!("{interpreter}: {message}"),
                file_path: Some(input.path.clone()),
                location: None,
            });
        }
        let interpretation_time_ms = interpretation_started.elapsed().as_secs_f64() * 1000.0;

        let metrics = PerformanceMetrics {
            parse_time_ms,
            extraction_time_ms,
            interpretation_time_ms,
            total_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            memory_usage_bytes: 0,
        };

        self.finish(
            input,
            language,
            started,
            extraction_outcome.extracted,
            interpretation_outcome.interpreted,
            errors,
            metrics,
            cache_hit,
        )
    }

    fn finish(
        &self,
        input: &FileInput,
        language: LanguageId,
        _started: Instant,
        extracted_data: HashMap<String, serde_json::Value>,
        interpreted_data: HashMap<String, serde_json::Value>,
        errors: Vec<AnalysisErrorRecord>,
        performance_metrics: PerformanceMetrics,
        cache_hit: bool,
    ) -> AnalysisResult {
        AnalysisResult {
            file_path: input.path.clone(),
            language: language.name().to_string(),
            extracted_data,
            interpreted_data,
            performance_metrics,
            errors,
            cache_hit,
        }
    }

    /// Analyzes a batch of files with bounded parallelism, preserving the
    /// order of `inputs` in the returned `Vec`. Cancelling `cancel` stops
    /// scheduling new work; in-flight files still complete or time out.
    pub async fn analyze_batch(
        self: &Arc<Self>,
        inputs: Vec<FileInput>,
        opts: Arc<AnalysisOptions>,
        cancel: CancellationToken,
    ) -> Result<Vec<AnalysisResult>> {
        let semaphore = Arc::new(Semaphore::new(self.config.worker_pool_size));
        let mut handles = Vec::with_capacity(inputs.len());

        for input in inputs {
            let engine = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            let opts = Arc::clone(&opts);
            let cancel = cancel.clone();
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return AnalysisResult::unsupported_language(input.path.clone()),
                };
                if cancel.is_cancelled() {
                    return AnalysisResult {
                        file_path: input.path.clone(),
                        language: "unknown".to_string(),
                        extracted_data: HashMap::new(),
                        interpreted_data: HashMap::new(),
                        performance_metrics: PerformanceMetrics::default(),
                        errors: vec![AnalysisErrorRecord {
                            kind: "Cancelled".to_string(),
                            message: "analysis was cancelled before this file started".to_string(),
                            file_path: None,
                            location: None,
                        }],
                        cache_hit: false,
                    };
                }
                engine.analyze_file(&input, &opts).await
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(_) => return Err(AnalysisError::Cancelled),
            }
        }
        Ok(results)
    }
}

fn parse_failure_record(path: &str, message: &str) -> AnalysisErrorRecord {
    AnalysisErrorRecord {
        kind: "ParseError".to_string(),
        message: message.to_string(),
        file_path: Some(path.to_string()),
        location: Some(ErrorLocation {
            line: 1,
            column: 0,
            end_line: None,
            end_column: None,
        }),
    }
}
