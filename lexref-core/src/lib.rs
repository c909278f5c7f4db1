//! # LEXREF Core
//!
//! Core types, errors, and traits for the LEXREF legal reference proxy.
//!
//! This crate provides the foundational building blocks used by all other LEXREF crates:
//!
//! - **Errors**: The failure taxonomy shared by the proxy, its upstream client and the API
//! - **Constants**: Default base URL, TTL, and the built-in endpoint table
//! - **Types**: Fetch options and health reports
//! - **Traits**: The [`Upstream`] seam the proxy fetches through
//!
//! ## Example
//!
//! ```rust
//! use lexref_core::{FetchOptions, LexrefError};
//!
//! let opts = FetchOptions::bypass_cache();
//! assert!(!opts.use_cache);
//!
//! let err = LexrefError::UnknownEndpoint("kuhp".into());
//! assert!(err.is_client_error());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{LexrefError, Result};
pub use traits::*;
pub use types::*;
