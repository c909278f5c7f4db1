//! In-memory TTL cache for upstream JSON responses.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry {
    data: Value,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() > self.ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default TTL in seconds
    pub default_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: 300,
        }
    }
}

/// In-memory cache for upstream responses, keyed by resolved URL.
///
/// Thread-safe. Expiry is checked when an entry is read; nothing runs in the
/// background, so stale entries stay resident until overwritten, removed, or
/// swept by [`ResponseCache::cleanup_expired`].
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    config: CacheConfig,
}

impl ResponseCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// TTL applied by [`ResponseCache::set`].
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.config.default_ttl_seconds)
    }

    /// Gets a fresh cached payload for a URL.
    ///
    /// Returns None if not cached or expired.
    pub fn get(&self, url: &str) -> Option<Value> {
        let entries = self.entries.read();
        entries.get(url).and_then(|e| {
            if e.is_expired() {
                None
            } else {
                Some(e.data.clone())
            }
        })
    }

    /// Caches a payload with the default TTL.
    pub fn set(&self, url: &str, data: Value) {
        self.set_with_ttl(url, data, self.default_ttl());
    }

    /// Caches a payload with a custom TTL, replacing any previous entry.
    pub fn set_with_ttl(&self, url: &str, data: Value, ttl: Duration) {
        self.entries.write().insert(
            url.to_string(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Removes a cached entry. Returns whether one was present.
    pub fn remove(&self, url: &str) -> bool {
        self.entries.write().remove(url).is_some()
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries. Returns how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired());
        before - entries.len()
    }

    /// Returns the number of cached entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired()).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const UU_URL: &str = "https://api.npoint.io/abc";
    const PERATURAN_URL: &str = "https://api.npoint.io/def";

    #[test]
    fn test_cache_set_get() {
        let cache = ResponseCache::new();
        cache.set(UU_URL, json!([{"id": 1}]));
        assert_eq!(cache.get(UU_URL), Some(json!([{"id": 1}])));
    }

    #[test]
    fn test_cache_keys_are_exact() {
        let cache = ResponseCache::new();
        cache.set(UU_URL, json!({}));
        assert!(cache.get("https://api.npoint.io/ABC").is_none());
        assert!(cache.get("https://api.npoint.io/abc/").is_none());
    }

    #[test]
    fn test_cache_miss() {
        let cache = ResponseCache::new();
        assert!(cache.get(UU_URL).is_none());
    }

    #[test]
    fn test_cache_overwrite() {
        let cache = ResponseCache::new();
        cache.set(UU_URL, json!({"rev": 1}));
        cache.set(UU_URL, json!({"rev": 2}));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(UU_URL), Some(json!({"rev": 2})));
    }

    #[test]
    fn test_cache_overwrite_refreshes_ttl() {
        let cache = ResponseCache::new();
        cache.set_with_ttl(UU_URL, json!({"rev": 1}), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.get(UU_URL).is_none());

        cache.set(UU_URL, json!({"rev": 2}));
        assert_eq!(cache.get(UU_URL), Some(json!({"rev": 2})));
    }

    #[test]
    fn test_cache_remove() {
        let cache = ResponseCache::new();
        cache.set(UU_URL, json!([]));
        cache.set(PERATURAN_URL, json!([]));

        assert!(cache.remove(UU_URL));
        assert!(!cache.remove(UU_URL));

        assert!(cache.get(UU_URL).is_none());
        assert!(cache.get(PERATURAN_URL).is_some());
    }

    #[test]
    fn test_cache_clear() {
        let cache = ResponseCache::new();
        cache.set(UU_URL, json!([]));
        cache.set(PERATURAN_URL, json!([]));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_ttl_expiration() {
        let cache = ResponseCache::new();
        cache.set_with_ttl(UU_URL, json!([]), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.get(UU_URL).is_none());
    }

    #[test]
    fn test_expired_entry_stays_resident_until_swept() {
        let cache = ResponseCache::new();
        cache.set_with_ttl(UU_URL, json!([]), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(10));

        assert!(cache.get(UU_URL).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_default_ttl_from_config() {
        let cache = ResponseCache::with_config(CacheConfig {
            default_ttl_seconds: 60,
        });
        assert_eq!(cache.default_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_cache_stats() {
        let cache = ResponseCache::new();
        cache.set_with_ttl(UU_URL, json!([]), Duration::from_millis(1));
        cache.set(PERATURAN_URL, json!([]));
        std::thread::sleep(Duration::from_millis(10));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.expired_entries, 1);
    }

    #[test]
    fn test_cache_cleanup_expired() {
        let cache = ResponseCache::new();
        cache.set_with_ttl(UU_URL, json!([]), Duration::from_millis(1));
        cache.set(PERATURAN_URL, json!([]));
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(PERATURAN_URL).is_some());
    }
}
