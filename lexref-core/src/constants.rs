//! Defaults for LEXREF.
//!
//! The upstream store is a public JSON bin service. Each legal reference set
//! lives in its own document, addressed by a path under the base URL.

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Default base URL of the upstream JSON document store.
pub const DEFAULT_BASE_URL: &str = "https://api.npoint.io";

/// Default HTTP timeout for upstream requests, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live for cached upstream responses, in seconds (5 minutes).
pub const DEFAULT_TTL_SECONDS: u64 = 300;

// ═══════════════════════════════════════════════════════════════════════════════
// ENDPOINT TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Statutes (undang-undang).
pub const ENDPOINT_UU: &str = "uu";

/// Government and ministerial regulations (peraturan).
pub const ENDPOINT_PERATURAN: &str = "peraturan";

/// Legal articles and commentary.
pub const ENDPOINT_ARTIKEL_HUKUM: &str = "artikel-hukum";

/// Built-in endpoint table: logical key to path under the base URL.
///
/// Restored on every process start; runtime registrations are not persisted.
pub const DEFAULT_ENDPOINTS: &[(&str, &str)] = &[
    (ENDPOINT_UU, "/6b3a1f2e9c4d7e8a0f15"),
    (ENDPOINT_PERATURAN, "/0d9e4c7b2a51f83e6c42"),
    (ENDPOINT_ARTIKEL_HUKUM, "/a47f2c9e1b6d08e35f7c"),
];

/// Endpoint key fetched by the health probe.
pub const DEFAULT_PROBE_ENDPOINT: &str = ENDPOINT_UU;
