// In-process response cache - LRU bounded, TTL driven
// Author: kelexine (https://github.com/kelexine)

use super::key::CacheKey;
use super::models::CacheStats;
use super::store::{CachedResponse, ResponseCache};
use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::Instant;
use tracing::debug;

struct Entry {
    response: CachedResponse,
    expires_at: Instant,
}

struct Inner {
    entries: LruCache<CacheKey, Entry>,
    stats: CacheStats,
}

/// Response cache living inside the gateway process.
///
/// Each entry expires according to the TTL directive of the response it
/// holds; responses without one are not stored. The LRU bound only caps
/// memory.
pub struct MemoryCache {
    inner: Mutex<Inner>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.entries.len(),
            ..inner.stats.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
        debug!("Cache cleared");
    }

    fn insert_until(&self, key: CacheKey, response: CachedResponse, expires_at: Instant) {
        let mut inner = self.inner.lock();
        if let Some((evicted, _)) = inner.entries.push(key.clone(), Entry { response, expires_at }) {
            if evicted != key {
                debug!("Evicted least recently used entry: {}", evicted);
            }
        }
        inner.stats.stores += 1;
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<CachedResponse> {
        let mut inner = self.inner.lock();
        let now = Instant::now();

        let (hit, expired) = match inner.entries.get(key) {
            Some(entry) if entry.expires_at > now => (Some(entry.response.clone()), false),
            Some(_) => (None, true),
            None => (None, false),
        };

        if expired {
            inner.entries.pop(key);
            debug!("Expired entry dropped: {}", key);
        }

        if hit.is_some() {
            inner.stats.hits += 1;
        } else {
            inner.stats.misses += 1;
        }
        hit
    }

    async fn put(&self, key: CacheKey, response: CachedResponse) {
        match response.ttl() {
            Some(ttl) if !ttl.is_zero() => {
                debug!("Caching {} for {:?}", key, ttl);
                self.insert_until(key, response, Instant::now() + ttl);
            }
            _ => debug!("Not caching {}: no positive TTL", key),
        }
    }
}
