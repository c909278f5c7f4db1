//! Shared request and report types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LexrefError;

/// Per-call options for a proxied fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Serve a fresh cached copy when one exists.
    pub use_cache: bool,
    /// TTL for the stored entry. `None` falls back to the proxy default.
    pub ttl: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            ttl: None,
        }
    }
}

impl FetchOptions {
    /// Always go upstream, then refresh the cache on success.
    pub fn bypass_cache() -> Self {
        Self {
            use_cache: false,
            ttl: None,
        }
    }

    /// Sets the TTL for the entry written on success.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Builds options from an API-style `no_cache` flag.
    pub fn from_no_cache(no_cache: bool) -> Self {
        Self {
            use_cache: !no_cache,
            ttl: None,
        }
    }
}

/// Why the health probe failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthFailure {
    /// Error kind, see [`LexrefError::kind`].
    pub kind: String,
    /// Upstream HTTP status, if a response was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Human-readable error message.
    pub message: String,
}

impl From<&LexrefError> for HealthFailure {
    fn from(err: &LexrefError) -> Self {
        Self {
            kind: err.kind().to_string(),
            status: err.upstream_status(),
            message: err.to_string(),
        }
    }
}

/// Result of probing the upstream store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthReport {
    /// Whether the probe fetch succeeded.
    pub healthy: bool,
    /// When the probe ran.
    pub checked_at: DateTime<Utc>,
    /// Resolved probe URL, if the probe key resolved.
    pub probe_url: Option<String>,
    /// Failure details when unhealthy.
    pub failure: Option<HealthFailure>,
}

impl HealthReport {
    /// A passing report.
    pub fn healthy(probe_url: impl Into<String>) -> Self {
        Self {
            healthy: true,
            checked_at: Utc::now(),
            probe_url: Some(probe_url.into()),
            failure: None,
        }
    }

    /// A failing report.
    pub fn unhealthy(probe_url: Option<String>, err: &LexrefError) -> Self {
        Self {
            healthy: false,
            checked_at: Utc::now(),
            probe_url,
            failure: Some(HealthFailure::from(err)),
        }
    }
}
