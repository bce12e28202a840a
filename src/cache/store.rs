// Response cache contract and stored response snapshot
// Author: kelexine (https://github.com/kelexine)

use super::key::CacheKey;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use std::time::Duration;

/// A finished HTTP response, frozen so it can be replayed.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CachedResponse {
    /// How long shared caches may reuse this response, read from the
    /// `s-maxage` (or, failing that, `max-age`) directive.
    pub fn ttl(&self) -> Option<Duration> {
        let value = self.headers.get(header::CACHE_CONTROL)?.to_str().ok()?;
        let mut max_age = None;

        for directive in value.split(',').map(str::trim) {
            let Some((name, secs)) = directive.split_once('=') else {
                continue;
            };
            let Ok(secs) = secs.trim().parse::<u64>() else {
                continue;
            };
            match name.trim().to_ascii_lowercase().as_str() {
                "s-maxage" => return Some(Duration::from_secs(secs)),
                "max-age" => max_age = Some(Duration::from_secs(secs)),
                _ => {}
            }
        }

        max_age
    }
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Shared store of full responses, keyed by [`CacheKey`].
///
/// A miss is never an error: cold start, expiry, and eviction all look the
/// same. Implementations must tolerate concurrent `put`s for one key (last
/// write wins).
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Option<CachedResponse>;

    /// Store `response` for as long as its own TTL directive allows.
    async fn put(&self, key: CacheKey, response: CachedResponse);
}

/// Cache that never holds anything. Used when caching is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl ResponseCache for NoopCache {
    async fn get(&self, _key: &CacheKey) -> Option<CachedResponse> {
        None
    }

    async fn put(&self, _key: CacheKey, _response: CachedResponse) {}
}
