// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::response;
use super::routes::AppState;
use crate::cache::{CacheKey, CachedResponse, ResponseCache};
use crate::error::Result;
use crate::sheets::SheetReference;
use crate::translation::translate_rows;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Entry point for every request, whatever the method.
///
/// `/` redirects to the docs; everything else goes through the sheet
/// pipeline. The path is read from the raw URI so the sheet segment keeps
/// its original percent-encoding.
pub async fn dispatch(State(state): State<AppState>, uri: Uri) -> Response {
    let start = Instant::now();
    let path = uri.path();

    let (outcome, response) = if path == "/" {
        ("redirect", response::redirect(&state.config.server.docs_url))
    } else {
        match serve_sheet(&state, path).await {
            Ok((outcome, cached)) => (outcome, cached.into_response()),
            Err(e) => {
                if e.envelope_message().is_some() {
                    warn!("{} -> {}", path, e);
                }
                ("error", e.into_response())
            }
        }
    };

    crate::metrics::record_request(outcome, response.status().as_u16(), start.elapsed().as_secs_f64());
    response
}

/// Cache lookup, then upstream fetch and translation on a miss.
async fn serve_sheet(state: &AppState, path: &str) -> Result<(&'static str, CachedResponse)> {
    let reference = SheetReference::from_path(path)?;
    let key = CacheKey::for_reference(&state.config.cache.key_prefix, &reference);

    if let Some(cached) = state.cache.get(&key).await {
        info!("Serving from cache: {}", key);
        crate::metrics::record_cache_hit();
        return Ok(("cached", cached));
    }
    info!("Cache miss: {}", key);
    crate::metrics::record_cache_miss();

    let sheet_name = reference.sheet_name()?;
    let document = state
        .upstream
        .fetch_range(reference.spreadsheet_id(), &sheet_name)
        .await?;

    let rows = translate_rows(document)?;
    let fresh = response::success(&rows, state.config.cache.ttl_seconds)?;

    schedule_store(state.cache.clone(), key, fresh.clone());
    Ok(("fetched", fresh))
}

/// Write `response` to the cache on a detached task.
///
/// The request path never awaits the handle; it is returned for callers
/// that want to observe completion.
pub fn schedule_store(
    cache: Arc<dyn ResponseCache>,
    key: CacheKey,
    response: CachedResponse,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Storing response for {}", key);
        cache.put(key, response).await;
        crate::metrics::record_cache_store();
    })
}

