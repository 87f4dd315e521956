pub mod models;

pub use models::{
    AnalysisErrorRecord, AnalysisResult, ErrorLocation, ParseErrorRecord, ParseResult,
    PerformanceMetrics,
};
