//! App state: proxy instance and config.

use std::time::Instant;

use lexref_core::constants::{
    DEFAULT_BASE_URL, DEFAULT_PROBE_ENDPOINT, DEFAULT_TIMEOUT_SECONDS, DEFAULT_TTL_SECONDS,
};
use lexref_core::error::Result;
use lexref_proxy::{ProxyConfig, ReferenceProxy};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL of the upstream reference store
    pub base_url: String,
    /// Default cache TTL in seconds
    pub cache_ttl_seconds: u64,
    /// Upstream HTTP timeout in seconds
    pub timeout_seconds: u64,
    /// Endpoint key fetched by the upstream health probe
    pub probe_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            cache_ttl_seconds: DEFAULT_TTL_SECONDS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            probe_endpoint: DEFAULT_PROBE_ENDPOINT.into(),
        }
    }
}

impl ApiConfig {
    /// Loads `.env` if present, then reads `LEGAL_API_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// Unset, blank, or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            base_url: get("LEGAL_API_BASE_URL").unwrap_or(defaults.base_url),
            cache_ttl_seconds: get("LEGAL_API_CACHE_TTL_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cache_ttl_seconds),
            timeout_seconds: get("LEGAL_API_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_seconds),
            probe_endpoint: get("LEGAL_API_PROBE_ENDPOINT").unwrap_or(defaults.probe_endpoint),
        }
    }

    /// Translates into the proxy's configuration.
    pub fn proxy_config(&self) -> ProxyConfig {
        let mut config = ProxyConfig::with_base_url(&self.base_url)
            .ttl_seconds(self.cache_ttl_seconds)
            .probe(&self.probe_endpoint);
        config.upstream = config.upstream.with_timeout(self.timeout_seconds);
        config
    }
}

/// Shared state behind every handler.
pub struct AppState {
    /// Active configuration
    pub config: ApiConfig,
    /// The reference proxy
    pub proxy: ReferenceProxy,
    started_at: Instant,
}

impl AppState {
    /// Builds the proxy from config.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let proxy = ReferenceProxy::from_config(config.proxy_config())?;
        Ok(Self::with_proxy(config, proxy))
    }

    /// Wraps an already-constructed proxy.
    pub fn with_proxy(config: ApiConfig, proxy: ReferenceProxy) -> Self {
        Self {
            config,
            proxy,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
