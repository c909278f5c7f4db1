//! DTOs for API requests and responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lexref_core::types::HealthFailure;

/// Query flag shared by the fetch routes.
#[derive(Debug, Default, Deserialize)]
pub struct CacheQuery {
    /// Present (and not "false"/"0") to bypass the cache
    pub no_cache: Option<String>,
}

impl CacheQuery {
    /// Whether the caller asked to bypass the cache.
    pub fn bypass(&self) -> bool {
        no_cache_flag(self.no_cache.as_deref())
    }
}

/// Query for fetching an arbitrary URL.
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    /// Absolute upstream URL
    pub url: Option<String>,
    /// Cache bypass flag
    pub no_cache: Option<String>,
}

impl ProxyQuery {
    /// Whether the caller asked to bypass the cache.
    pub fn bypass(&self) -> bool {
        no_cache_flag(self.no_cache.as_deref())
    }
}

/// `?no_cache`, `?no_cache=true`, `?no_cache=1` bypass; `=false`/`=0` do not.
fn no_cache_flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => false,
        Some(v) => !(v.eq_ignore_ascii_case("false") || v == "0"),
    }
}

/// Request to register an endpoint.
#[derive(Debug, Deserialize)]
pub struct AddEndpointRequest {
    /// Logical endpoint key
    pub key: Option<String>,
    /// Path fragment under the base URL
    pub path: Option<String>,
}

/// Generic acknowledgement.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    /// Whether the operation took effect
    pub success: bool,
    /// What happened
    pub message: String,
}

impl AckResponse {
    /// Successful acknowledgement.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Endpoint table listing.
#[derive(Debug, Serialize)]
pub struct EndpointsResponse {
    /// Base URL paths are appended to
    pub base_url: String,
    /// Logical key → path
    pub endpoints: BTreeMap<String, String>,
}

/// Cache statistics.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    /// Entries held, stale included
    pub total_entries: usize,
    /// Entries still fresh
    pub valid_entries: usize,
    /// Entries past their TTL
    pub expired_entries: usize,
    /// Default TTL in seconds
    pub default_ttl_seconds: u64,
}

/// Upstream health probe result.
#[derive(Debug, Serialize)]
pub struct UpstreamHealthResponse {
    /// Whether the probe fetch succeeded
    pub healthy: bool,
    /// When the probe ran
    pub timestamp: DateTime<Utc>,
    /// URL that was probed
    pub probe_url: Option<String>,
    /// Failure details when unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<HealthFailure>,
}

/// Service liveness.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since startup
    pub uptime_seconds: u64,
}
