//! Shared result schemas crossing feature boundaries (§6 of the external
//! interface contract: parse result, analysis result, performance metrics).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseErrorRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub location: ErrorLocation,
}

/// The tree itself is opaque outside the parsing feature; this is the
/// externally visible shape of a parse, minus the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub language: String,
    pub parse_time_ms: f64,
    pub cache_hit: bool,
    pub errors: Vec<ParseErrorRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisErrorRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub file_path: Option<String>,
    pub location: Option<ErrorLocation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub parse_time_ms: f64,
    pub extraction_time_ms: f64,
    pub interpretation_time_ms: f64,
    pub total_time_ms: f64,
    pub memory_usage_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_path: String,
    pub language: String,
    pub extracted_data: HashMap<String, serde_json::Value>,
    pub interpreted_data: HashMap<String, serde_json::Value>,
    pub performance_metrics: PerformanceMetrics,
    pub errors: Vec<AnalysisErrorRecord>,
    /// Whether the underlying parse was served from the AST cache.
    pub cache_hit: bool,
}

impl AnalysisResult {
    pub fn empty_for_timeout(file_path: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            file_path: file_path.into(),
            language: "unknown".to_string(),
            extracted_data: HashMap::new(),
            interpreted_data: HashMap::new(),
            performance_metrics: PerformanceMetrics::default(),
            errors: vec![AnalysisErrorRecord {
                kind: "Timeout".to_string(),
                message: format!("analysis exceeded {timeout_ms}ms"),
                file_path: None,
                location: None,
            }],
            cache_hit: false,
        }
    }

    pub fn unsupported_language(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            language: "unknown".to_string(),
            extracted_data: HashMap::new(),
            interpreted_data: HashMap::new(),
            performance_metrics: PerformanceMetrics::default(),
            errors: vec![AnalysisErrorRecord {
                kind: "UnsupportedLanguage".to_string(),
                message: "no parser adapter registered for this file's language".to_string(),
                file_path: None,
                location: None,
            }],
            cache_hit: false,
        }
    }
}
