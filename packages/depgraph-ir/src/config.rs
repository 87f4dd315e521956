//! Tunables for the analysis pipeline. Every field has a spec-mandated
//! default; construction validates them so a bad config fails fast instead
//! of producing confusing behavior three layers down.

use crate::errors::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub ast_cache_capacity: u64,
    pub ast_cache_ttl_secs: u64,
    pub inference_cache_capacity: u64,
    pub inference_cache_ttl_secs: u64,
    pub worker_pool_size: usize,
    pub per_file_timeout_secs: u64,
    pub inference_depth_ceiling: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ast_cache_capacity: 1000,
            ast_cache_ttl_secs: 300,
            inference_cache_capacity: 1000,
            inference_cache_ttl_secs: 30,
            worker_pool_size: num_cpus::get(),
            per_file_timeout_secs: 15,
            inference_depth_ceiling: 64,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(self) -> Result<Self> {
        if self.ast_cache_capacity == 0 {
            return Err(AnalysisError::Config("ast_cache_capacity must be > 0".into()));
        }
        if self.inference_cache_capacity == 0 {
            return Err(AnalysisError::Config(
                "inference_cache_capacity must be > 0".into(),
            ));
        }
        if self.worker_pool_size == 0 {
            return Err(AnalysisError::Config("worker_pool_size must be > 0".into()));
        }
        if self.per_file_timeout_secs == 0 {
            return Err(AnalysisError::Config(
                "per_file_timeout_secs must be > 0".into(),
            ));
        }
        if self.inference_depth_ceiling == 0 {
            return Err(AnalysisError::Config(
                "inference_depth_ceiling must be > 0".into(),
            ));
        }
        Ok(self)
    }
}
