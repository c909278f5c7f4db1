//! TTL cache for LEXREF upstream responses.
//!
//! In-memory, keyed by resolved URL, with lazy expiry on read.

mod cache;

pub use cache::{CacheConfig, CacheStats, ResponseCache};
