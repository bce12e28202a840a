// Admin listener: Prometheus metrics and health
// Author: kelexine (https://github.com/kelexine)

use crate::cache::{CacheStats, MemoryCache};
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AdminState {
    /// `None` when caching is disabled.
    pub cache: Option<Arc<MemoryCache>>,
    pub started_at: Instant,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
    pub timestamp: String,
}

/// Router for the admin address. Kept off the gateway listener so every
/// two-segment path there stays a sheet lookup.
pub fn create_admin_router(cache: Option<Arc<MemoryCache>>) -> Router {
    let state = AdminState {
        cache,
        started_at: Instant::now(),
    };

    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

pub async fn health_handler(State(state): State<AdminState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cache: state.cache.as_ref().map(|c| c.stats()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
