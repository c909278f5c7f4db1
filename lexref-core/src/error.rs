//! Error types for LEXREF.
//!
//! Every failure the proxy can surface falls into a small taxonomy: the caller
//! asked for something that does not exist, the upstream store answered badly,
//! or the upstream store could not be reached at all.

use thiserror::Error;

/// Result type alias using `LexrefError`.
pub type Result<T> = std::result::Result<T, LexrefError>;

/// Main error type for all LEXREF operations.
#[derive(Debug, Error)]
pub enum LexrefError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CLIENT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A bare endpoint key has no entry in the endpoint table.
    #[error("Unknown endpoint: '{0}' not found in endpoint table")]
    UnknownEndpoint(String),

    /// An endpoint registration request was missing its key or path.
    #[error("Invalid endpoint registration: {0}")]
    InvalidRegistration(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Upstream answered, but not with a usable success response.
    #[error("Upstream error from {url}{}: {message}", fmt_status(.status))]
    UpstreamError {
        /// Resolved URL that was requested
        url: String,
        /// HTTP status, when one was received
        status: Option<u16>,
        /// Response body excerpt or failure description
        message: String,
    },

    /// No response was received from upstream (DNS, timeout, connection reset,
    /// or a URL the client cannot send to).
    #[error("Upstream unavailable at {url}: {reason}")]
    TransportFailure {
        /// Resolved URL that was requested
        url: String,
        /// Why no response arrived
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

impl LexrefError {
    /// Returns true if the caller is at fault (bad key or bad registration).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LexrefError::UnknownEndpoint(_)
                | LexrefError::InvalidRegistration(_)
        )
    }

    /// Returns true if the upstream store is at fault.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            LexrefError::UpstreamError { .. } | LexrefError::TransportFailure { .. }
        )
    }

    /// Upstream HTTP status, when one was received.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            LexrefError::UpstreamError { status, .. } => *status,
            _ => None,
        }
    }

    /// Stable snake_case name of the error kind, for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LexrefError::UnknownEndpoint(_) => "unknown_endpoint",
            LexrefError::InvalidRegistration(_) => "invalid_registration",
            LexrefError::UpstreamError { .. } => "upstream_error",
            LexrefError::TransportFailure { .. } => "transport_failure",
            LexrefError::JsonError(_) => "json_error",
            LexrefError::ConfigError(_) => "config_error",
        }
    }
}
