//! Common traits for LEXREF.
//!
//! The proxy never talks to the network directly. It goes through an
//! [`Upstream`], so the HTTP client can be swapped for an in-memory stub.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Source of upstream JSON documents.
///
/// Implementations must translate their failures into the LEXREF taxonomy:
/// [`LexrefError::UpstreamError`](crate::LexrefError::UpstreamError) when a
/// response arrived but was unusable, and
/// [`LexrefError::TransportFailure`](crate::LexrefError::TransportFailure)
/// when none arrived.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Performs a GET against a fully-resolved URL and decodes the JSON body.
    async fn get_json(&self, url: &str) -> Result<Value>;
}
