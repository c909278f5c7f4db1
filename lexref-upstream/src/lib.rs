//! HTTP client for the upstream legal reference store.
//!
//! Implements [`lexref_core::Upstream`] over reqwest and maps transport and
//! status failures into the LEXREF error taxonomy.

mod http;

pub use http::{HttpUpstream, UpstreamConfig};
