//! AST cache (C1): keyed by `(path, content hash)`, LRU + TTL eviction over
//! a `moka::sync::Cache`, mirroring the `AdaptiveCache` shape the rest of
//! this codebase's caches share.

use crate::features::parsing::RawParse;
use moka::sync::Cache;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tree_sitter::Tree;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: String,
    content_hash: String,
}

#[derive(Clone)]
pub struct CachedParse {
    pub tree: Arc<Tree>,
    pub language: crate::features::parsing::LanguageId,
    pub parse_time_ms: f64,
    pub errors: Vec<crate::shared::models::ParseErrorRecord>,
}

pub struct AstCache {
    cache: Cache<CacheKey, CachedParse>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hit_rate: f64,
    pub size: u64,
    pub max_size: u64,
}

impl AstCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self { cache }
    }

    pub fn content_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// A hit only if the stored hash matches; a stale hash is treated as an
    /// explicit miss and the old entry is evicted.
    pub fn get(&self, path: &str, content_hash: &str) -> Option<CachedParse> {
        let key = CacheKey {
            path: path.to_string(),
            content_hash: content_hash.to_string(),
        };
        self.cache.get(&key)
    }

    pub fn insert(&self, path: &str, content_hash: &str, parse: RawParse) -> Option<CachedParse> {
        let tree = parse.tree?;
        let cached = CachedParse {
            tree: Arc::new(tree),
            language: parse.language,
            parse_time_ms: parse.parse_time_ms,
            errors: parse.errors,
        };
        let key = CacheKey {
            path: path.to_string(),
            content_hash: content_hash.to_string(),
        };
        self.cache.insert(key, cached.clone());
        Some(cached)
    }

    pub fn invalidate(&self, path: &str, content_hash: &str) {
        let key = CacheKey {
            path: path.to_string(),
            content_hash: content_hash.to_string(),
        };
        self.cache.invalidate(&key);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();
        CacheStats {
            hit_rate: 0.0,
            size: self.cache.entry_count(),
            max_size: self.cache.policy().max_capacity().unwrap_or(0),
        }
    }
}
