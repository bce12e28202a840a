// opensheet - Google Sheets to JSON edge gateway
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use opensheet::cache::{MemoryCache, NoopCache, ResponseCache};
use opensheet::cli::Args;
use opensheet::config::AppConfig;
use opensheet::server::{create_admin_router, create_router};
use opensheet::sheets::{SheetSource, SheetsClient};
use opensheet::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    args.apply(&mut config);
    config.validate()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting opensheet v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Runtime sized from config
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> Result<()> {
    // Phase 4: Upstream client and response cache
    let upstream: Arc<dyn SheetSource> = Arc::new(SheetsClient::new(&config.sheets)?);
    info!("Sheets API base: {}", config.sheets.api_base_url);

    let memory_cache = config
        .cache
        .enabled
        .then(|| Arc::new(MemoryCache::new(config.cache.max_entries)));
    let cache: Arc<dyn ResponseCache> = match &memory_cache {
        Some(c) => c.clone(),
        None => {
            info!("Response cache disabled");
            Arc::new(NoopCache)
        }
    };

    // Phase 5: Optional admin listener
    if config.metrics.enabled {
        let admin_addr: SocketAddr =
            format!("{}:{}", config.metrics.host, config.metrics.port).parse()?;
        let admin = create_admin_router(memory_cache.clone());
        let admin_listener = tokio::net::TcpListener::bind(admin_addr).await?;
        info!("Admin listener on {}", admin_addr);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(admin_listener, admin).await {
                error!("Admin listener stopped: {}", e);
            }
        });
    }

    // Phase 6: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, upstream, cache);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 7: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
