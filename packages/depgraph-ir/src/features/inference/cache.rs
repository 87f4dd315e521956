//! Inference result cache: short-TTL LRU over query shape, not over the
//! graph's content — a `markNodeChanged` call invalidates rather than
//! waiting for TTL expiry, so staleness is bounded by whichever is sooner.

use moka::sync::Cache;
use std::hash::{Hash, Hasher};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InferenceCacheKey {
    pub query_family: &'static str,
    pub start: Option<String>,
    pub kind: Option<String>,
    pub options_hash: u64,
}

impl InferenceCacheKey {
    pub fn new(
        query_family: &'static str,
        start: Option<&str>,
        kind: Option<&str>,
        options: &[(&str, &str)],
    ) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for (k, v) in options {
            k.hash(&mut hasher);
            v.hash(&mut hasher);
        }
        Self {
            query_family,
            start: start.map(str::to_string),
            kind: kind.map(str::to_string),
            options_hash: hasher.finish(),
        }
    }
}

pub struct InferenceCache {
    cache: Cache<InferenceCacheKey, serde_json::Value>,
}

impl InferenceCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    pub fn get(&self, key: &InferenceCacheKey) -> Option<serde_json::Value> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: InferenceCacheKey, value: serde_json::Value) {
        self.cache.insert(key, value);
    }

    /// Drops every cached result touching `node_id` — we don't track which
    /// queries traversed which nodes, so a changed node invalidates the
    /// whole cache rather than risk serving a stale path through it.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_options_produce_distinct_keys() {
        let a = InferenceCacheKey::new("transitive", Some("n1"), Some("depends_on"), &[("max", "5")]);
        let b = InferenceCacheKey::new("transitive", Some("n1"), Some("depends_on"), &[("max", "10")]);
        assert_ne!(a, b);
    }

    #[test]
    fn insert_then_get_round_trips() {
        let cache = InferenceCache::new(10, 30);
        let key = InferenceCacheKey::new("transitive", Some("n1"), Some("depends_on"), &[]);
        cache.insert(key.clone(), serde_json::json!(["n2", "n3"]));
        assert!(cache.get(&key).is_some());
        cache.invalidate_all();
        assert!(cache.get(&key).is_none());
    }
}
