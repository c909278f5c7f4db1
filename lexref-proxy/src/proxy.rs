//! Cached reference proxy.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use lexref_cache::{CacheConfig, CacheStats, ResponseCache};
use lexref_core::constants::{DEFAULT_BASE_URL, DEFAULT_PROBE_ENDPOINT, DEFAULT_TTL_SECONDS};
use lexref_core::error::{LexrefError, Result};
use lexref_core::traits::Upstream;
use lexref_core::types::{FetchOptions, HealthReport};
use lexref_upstream::{HttpUpstream, UpstreamConfig};

use crate::endpoints::{has_scheme, EndpointTable};

/// Proxy configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Base URL that endpoint paths are appended to
    pub base_url: String,
    /// TTL for cached responses when the caller gives none
    pub default_ttl_seconds: u64,
    /// Endpoint key fetched by the health probe
    pub probe_endpoint: String,
    /// Upstream HTTP client configuration
    pub upstream: UpstreamConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
            probe_endpoint: DEFAULT_PROBE_ENDPOINT.into(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Creates a config pointing at the given base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Overrides the default TTL.
    pub fn ttl_seconds(mut self, seconds: u64) -> Self {
        self.default_ttl_seconds = seconds;
        self
    }

    /// Overrides the health probe endpoint.
    pub fn probe(mut self, endpoint: impl Into<String>) -> Self {
        self.probe_endpoint = endpoint.into();
        self
    }
}

/// Cached proxy over the upstream reference store.
///
/// Each instance owns its cache and endpoint table; nothing is shared
/// process-wide. Fetches:
/// 1. Resolve the key or URL to a full upstream URL
/// 2. Return the cached payload for that URL if fresh and caching is allowed
/// 3. Otherwise GET it from upstream
/// 4. On success, store it under the resolved URL and return it
///
/// Failures are returned as-is and never touch the cache. Concurrent misses
/// for the same URL each go upstream; the last write wins.
pub struct ReferenceProxy {
    base_url: String,
    probe_endpoint: String,
    endpoints: EndpointTable,
    cache: ResponseCache,
    upstream: Arc<dyn Upstream>,
}

impl ReferenceProxy {
    /// Creates a proxy that fetches through the given upstream.
    pub fn new(config: ProxyConfig, upstream: Arc<dyn Upstream>) -> Self {
        let cache = ResponseCache::with_config(CacheConfig {
            default_ttl_seconds: config.default_ttl_seconds,
        });

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            probe_endpoint: config.probe_endpoint,
            endpoints: EndpointTable::with_defaults(),
            cache,
            upstream,
        }
    }

    /// Creates a proxy backed by the reqwest upstream client.
    pub fn from_config(config: ProxyConfig) -> Result<Self> {
        if !has_scheme(&config.base_url) {
            return Err(LexrefError::ConfigError(format!(
                "base URL must be absolute, got '{}'",
                config.base_url
            )));
        }
        let upstream = HttpUpstream::with_config(config.upstream.clone())?;
        Ok(Self::new(config, Arc::new(upstream)))
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// TTL applied when a fetch gives none.
    pub fn default_ttl(&self) -> Duration {
        self.cache.default_ttl()
    }

    /// Endpoint key used by the health probe.
    pub fn probe_endpoint(&self) -> &str {
        &self.probe_endpoint
    }

    /// Resolves an endpoint key, base-relative path, or absolute URL.
    ///
    /// - `https://...` (any `<scheme>://`) is returned unchanged
    /// - `/path` is appended to the base URL
    /// - anything else is looked up in the endpoint table
    pub fn resolve(&self, key_or_url: &str) -> Result<String> {
        if has_scheme(key_or_url) {
            return Ok(key_or_url.to_string());
        }
        if key_or_url.starts_with('/') {
            return Ok(format!("{}{}", self.base_url, key_or_url));
        }
        self.endpoints
            .get(key_or_url)
            .map(|path| format!("{}{}", self.base_url, path))
            .ok_or_else(|| LexrefError::UnknownEndpoint(key_or_url.to_string()))
    }

    /// Fetches reference data, serving from cache when allowed and fresh.
    #[instrument(skip(self, options), fields(use_cache = options.use_cache))]
    pub async fn fetch(&self, key_or_url: &str, options: FetchOptions) -> Result<Value> {
        let url = self.resolve(key_or_url).map_err(|e| {
            warn!(key = key_or_url, error = %e, "Could not resolve endpoint");
            e
        })?;

        if options.use_cache {
            if let Some(data) = self.cache.get(&url) {
                debug!(url = %url, "Cache hit");
                return Ok(data);
            }
            debug!(url = %url, "Cache miss, fetching upstream");
        } else {
            debug!(url = %url, "Cache bypassed, fetching upstream");
        }

        let data = match self.upstream.get_json(&url).await {
            Ok(data) => data,
            Err(e) => {
                warn!(url = %url, kind = e.kind(), error = %e, "Upstream fetch failed");
                return Err(e);
            }
        };

        let ttl = options.ttl.unwrap_or_else(|| self.default_ttl());
        self.cache.set_with_ttl(&url, data.clone(), ttl);
        info!(url = %url, ttl_seconds = ttl.as_secs(), "Fetched and cached reference data");

        Ok(data)
    }

    /// Drops one cached entry (by re-resolving `key`) or, with `None`, all of them.
    #[instrument(skip(self))]
    pub fn invalidate(&self, key: Option<&str>) -> Result<()> {
        match key {
            Some(key) => {
                let url = self.resolve(key)?;
                let removed = self.cache.remove(&url);
                info!(url = %url, removed, "Invalidated cache entry");
            }
            None => {
                let count = self.cache.len();
                self.cache.clear();
                info!(count, "Cleared reference cache");
            }
        }
        Ok(())
    }

    /// Inserts or overwrites an endpoint. Returns the previous path, if any.
    pub fn register_endpoint(&self, key: impl Into<String>, path: impl Into<String>) -> Option<String> {
        let key = key.into();
        let previous = self.endpoints.register(key.clone(), path);
        if previous.is_some() {
            info!(key = %key, "Replaced endpoint");
        } else {
            info!(key = %key, "Registered endpoint");
        }
        previous
    }

    /// Snapshot of the endpoint table.
    pub fn list_endpoints(&self) -> BTreeMap<String, String> {
        self.endpoints.snapshot()
    }

    /// Probes upstream with a cache-bypassing fetch of the probe endpoint.
    ///
    /// Any failure reports `false`; use [`ReferenceProxy::health_report`] to
    /// see why.
    pub async fn health_check(&self) -> bool {
        self.health_report().await.healthy
    }

    /// Probes upstream and reports the outcome with failure details.
    #[instrument(skip(self))]
    pub async fn health_report(&self) -> HealthReport {
        let url = match self.resolve(&self.probe_endpoint) {
            Ok(url) => url,
            Err(e) => {
                warn!(probe = %self.probe_endpoint, error = %e, "Health probe endpoint not resolvable");
                return HealthReport::unhealthy(None, &e);
            }
        };

        match self.fetch(&url, FetchOptions::bypass_cache()).await {
            Ok(_) => HealthReport::healthy(url),
            Err(e) => {
                warn!(url = %url, kind = e.kind(), "Health probe failed");
                HealthReport::unhealthy(Some(url), &e)
            }
        }
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops expired cache entries. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let removed = self.cache.cleanup_expired();
        debug!(removed, "Swept expired cache entries");
        removed
    }
}
