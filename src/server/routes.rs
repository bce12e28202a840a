// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::dispatch;
use super::middleware::request_id_layers;
use crate::cache::ResponseCache;
use crate::config::AppConfig;
use crate::sheets::SheetSource;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub upstream: Arc<dyn SheetSource>,
    pub cache: Arc<dyn ResponseCache>,
}

/// Build the gateway router.
///
/// There are no fixed routes: the path shape is validated by the sheet
/// pipeline itself, so every request lands in [`dispatch`].
pub fn create_router(
    config: AppConfig,
    upstream: Arc<dyn SheetSource>,
    cache: Arc<dyn ResponseCache>,
) -> Router {
    let state = AppState {
        config: Arc::new(config),
        upstream,
        cache,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
