//! Time-bounded store of previously computed scores
//!
//! Scores are kept in a single JSON document keyed by `owner/repo`. Entries older
//! than the configured TTL are ignored, and the document keeps at most a fixed
//! number of entries, dropping the oldest first. Writers hold an advisory file
//! lock so concurrent invocations do not lose each other's entries.

mod cache_lock;
mod score_cache;

pub use score_cache::{CacheStats, ScoreCache};
