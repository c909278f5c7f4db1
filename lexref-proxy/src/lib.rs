//! # LEXREF Proxy
//!
//! Cached access to a third-party legal reference store.
//!
//! Callers ask for a logical key (`uu`, `peraturan`, `artikel-hukum`), a
//! base-relative path, or an absolute URL. The proxy resolves it, serves a
//! fresh cached copy when it has one, and otherwise fetches upstream and
//! caches the result under the resolved URL.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lexref_proxy::{ReferenceProxy, ProxyConfig};
//! use lexref_core::FetchOptions;
//!
//! let proxy = ReferenceProxy::from_config(ProxyConfig::default())?;
//! let statutes = proxy.fetch("uu", FetchOptions::default()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod endpoints;
mod proxy;

pub use endpoints::{has_scheme, EndpointTable};
pub use proxy::{ProxyConfig, ReferenceProxy};
