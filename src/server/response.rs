// Response construction: JSON rows, error envelopes, redirect
// Author: kelexine (https://github.com/kelexine)

use crate::cache::CachedResponse;
use crate::error::Result;
use crate::translation::Row;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::json;

/// Request headers browsers may send cross-origin.
pub const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers
}

/// 200 with the rows as a JSON array and `Cache-Control: s-maxage={ttl}`.
pub fn success(rows: &[Row], ttl_seconds: u64) -> Result<CachedResponse> {
    let body = serde_json::to_vec(rows)?;

    let mut headers = base_headers();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_str(&format!("s-maxage={}", ttl_seconds))
            .map_err(|e| crate::error::GatewayError::Internal(e.to_string()))?,
    );

    Ok(CachedResponse {
        status: StatusCode::OK,
        headers,
        body: Bytes::from(body),
    })
}

/// `{"error": message}` with CORS headers and no cache directive.
pub fn error(message: &str, status: StatusCode) -> CachedResponse {
    CachedResponse {
        status,
        headers: base_headers(),
        body: Bytes::from(json!({ "error": message }).to_string()),
    }
}

/// 302 to the documentation page.
pub fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
