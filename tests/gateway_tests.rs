// Dispatcher tests against the full router with fake collaborators
// Author: kelexine (https://github.com/kelexine)

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use opensheet::cache::{CacheKey, CachedResponse, ResponseCache};
use opensheet::config::AppConfig;
use opensheet::error::{GatewayError, Result};
use opensheet::server::{create_router, response};
use opensheet::sheets::{SheetSource, SpreadsheetResponse};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::ServiceExt;

/// Upstream fake that counts calls and replays one canned reply.
struct CountingSource {
    calls: AtomicUsize,
    requested: Mutex<Vec<(String, String)>>,
    reply: Reply,
}

enum Reply {
    Document(Value),
    ApiError(&'static str),
    Fault,
}

impl CountingSource {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            reply,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetSource for CountingSource {
    async fn fetch_range(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<SpreadsheetResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .push((spreadsheet_id.to_string(), sheet_name.to_string()));

        match &self.reply {
            Reply::Document(doc) => Ok(serde_json::from_value(doc.clone())?),
            Reply::ApiError(message) => Err(GatewayError::Upstream(message.to_string())),
            Reply::Fault => Err(GatewayError::Internal("connection reset".to_string())),
        }
    }
}

/// Cache fake that records puts. With a gate, `put` blocks until released.
#[derive(Default)]
struct RecordingCache {
    entries: Mutex<HashMap<CacheKey, CachedResponse>>,
    puts_started: AtomicUsize,
    gate: Option<Arc<Notify>>,
    started: Notify,
    stored: Notify,
}

impl RecordingCache {
    fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            gate: Some(gate),
            ..Default::default()
        })
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().map(|k| k.to_string()).collect()
    }
}

#[async_trait]
impl ResponseCache for RecordingCache {
    async fn get(&self, key: &CacheKey) -> Option<CachedResponse> {
        self.entries.lock().get(key).cloned()
    }

    async fn put(&self, key: CacheKey, response: CachedResponse) {
        self.puts_started.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.entries.lock().insert(key, response);
        self.stored.notify_one();
    }
}

fn sample_document() -> Value {
    json!({
        "sheets": [{"data": [{"rowData": [
            {"values": [
                {"userEnteredValue": {"stringValue": "A1"}},
                {"userEnteredValue": {"numberValue": 42}}
            ]}
        ]}]}]
    })
}

fn router(upstream: Arc<CountingSource>, cache: Arc<RecordingCache>) -> Router {
    create_router(AppConfig::default(), upstream, cache)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    send(app, Method::GET, uri).await
}

#[tokio::test]
async fn test_root_redirects_to_docs() {
    let upstream = CountingSource::new(Reply::Fault);
    let app = router(upstream.clone(), Arc::new(RecordingCache::default()));

    let (status, headers, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(
        headers[header::LOCATION],
        "https://github.com/benborgers/opensheet#readme"
    );
    assert!(body.is_empty());
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_wrong_segment_counts_are_404() {
    let upstream = CountingSource::new(Reply::Fault);
    let app = router(upstream.clone(), Arc::new(RecordingCache::default()));

    for uri in ["/abc", "/a/b/c", "/a/b/c/d", "/abc/"] {
        let (status, headers, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri {uri}");
        assert_eq!(body, r#"{"error":"URL format is /spreadsheet_id/sheet_name"}"#);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.get(header::CACHE_CONTROL).is_none());
    }
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_miss_fetches_translates_and_stores() {
    let upstream = CountingSource::new(Reply::Document(sample_document()));
    let cache = Arc::new(RecordingCache::default());
    let app = router(upstream.clone(), cache.clone());

    let (status, headers, body) = get(&app, "/1abc/Sheet1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([[{"value": "A1"}, {"value": 42}]]));
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::CACHE_CONTROL], "s-maxage=30");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Origin, X-Requested-With, Content-Type, Accept"
    );
    assert_eq!(upstream.calls(), 1);

    tokio::time::timeout(Duration::from_secs(1), cache.stored.notified())
        .await
        .expect("store should complete in the background");
    assert_eq!(cache.puts_started.load(Ordering::SeqCst), 1);
    assert_eq!(cache.keys(), vec!["https://opensheet.elk.sh/1abc/Sheet1".to_string()]);
}

#[tokio::test]
async fn test_hit_skips_upstream() {
    let upstream = CountingSource::new(Reply::Fault);
    let cache = Arc::new(RecordingCache::default());
    let stored = response::success(&[], 30).unwrap();
    cache.entries.lock().insert(
        CacheKey::new("https://opensheet.elk.sh/", "1abc", "Sheet1"),
        stored,
    );
    let app = router(upstream.clone(), cache.clone());

    let (status, headers, body) = get(&app, "/1abc/Sheet1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
    assert_eq!(headers[header::CACHE_CONTROL], "s-maxage=30");
    assert_eq!(upstream.calls(), 0);
    assert_eq!(cache.puts_started.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let upstream = CountingSource::new(Reply::Document(sample_document()));
    let cache = Arc::new(RecordingCache::default());
    let app = router(upstream.clone(), cache.clone());

    let (_, _, first) = get(&app, "/1abc/Sheet1").await;
    cache.stored.notified().await;
    let (status, _, second) = get(&app, "/1abc/Sheet1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_response_does_not_wait_for_store() {
    let gate = Arc::new(Notify::new());
    let upstream = CountingSource::new(Reply::Document(sample_document()));
    let cache = RecordingCache::gated(gate.clone());
    let app = router(upstream.clone(), cache.clone());

    // With the gate closed, a handler that awaited the store would hang.
    let (status, _, _) = tokio::time::timeout(Duration::from_secs(1), get(&app, "/1abc/Sheet1"))
        .await
        .expect("response must not wait for the cache write");
    assert_eq!(status, StatusCode::OK);

    cache.started.notified().await;
    assert_eq!(cache.puts_started.load(Ordering::SeqCst), 1);
    assert!(cache.keys().is_empty());

    gate.notify_one();
    cache.stored.notified().await;
    assert_eq!(cache.keys().len(), 1);
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_upstream_error_becomes_envelope() {
    let upstream = CountingSource::new(Reply::ApiError("Requested entity was not found."));
    let cache = Arc::new(RecordingCache::default());
    let app = router(upstream.clone(), cache.clone());

    let (status, headers, body) = get(&app, "/missing/Sheet1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Requested entity was not found."}"#);
    assert!(headers.get(header::CACHE_CONTROL).is_none());

    tokio::task::yield_now().await;
    assert_eq!(cache.puts_started.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_sheet_becomes_envelope() {
    for document in [
        json!({"sheets": [{"data": [{"rowData": []}]}]}),
        json!({"sheets": [{"data": [{}]}]}),
        json!({}),
    ] {
        let upstream = CountingSource::new(Reply::Document(document));
        let cache = Arc::new(RecordingCache::default());
        let app = router(upstream, cache.clone());

        let (status, _, body) = get(&app, "/1abc/Empty").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"No data found in the specified sheet."}"#);
        assert!(cache.keys().is_empty());
    }
}

#[tokio::test]
async fn test_fault_has_no_envelope() {
    let upstream = CountingSource::new(Reply::Fault);
    let app = router(upstream, Arc::new(RecordingCache::default()));

    let (status, headers, body) = get(&app, "/1abc/Sheet1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_sheet_name_decoded_upstream_but_raw_in_key() {
    let upstream = CountingSource::new(Reply::Document(sample_document()));
    let cache = Arc::new(RecordingCache::default());
    let app = router(upstream.clone(), cache.clone());

    get(&app, "/1abc/My%20Sheet").await;
    cache.stored.notified().await;
    get(&app, "/1abc/My+Sheet").await;
    cache.stored.notified().await;

    let requested = upstream.requested.lock().clone();
    assert_eq!(
        requested,
        vec![
            ("1abc".to_string(), "My Sheet".to_string()),
            ("1abc".to_string(), "My Sheet".to_string()),
        ]
    );

    let mut keys = cache.keys();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "https://opensheet.elk.sh/1abc/My%2520Sheet".to_string(),
            "https://opensheet.elk.sh/1abc/My%2BSheet".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_any_method_is_dispatched() {
    let upstream = CountingSource::new(Reply::Document(sample_document()));
    let app = router(upstream.clone(), Arc::new(RecordingCache::default()));

    let (status, _, _) = send(&app, Method::POST, "/1abc/Sheet1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let upstream = CountingSource::new(Reply::Fault);
    let app = router(upstream, Arc::new(RecordingCache::default()));

    let (_, headers, _) = get(&app, "/abc").await;

    assert!(headers.get("x-request-id").is_some());
}
