//! Cache statistics model.

// Author: kelexine (https://github.com/kelexine)

use serde::Serialize;

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    /// Number of successful cache hits.
    pub hits: u64,
    /// Number of cache misses (including expired entries).
    pub misses: u64,
    /// Number of responses written to the cache.
    pub stores: u64,
    /// Entries currently held.
    pub entries: usize,
}
