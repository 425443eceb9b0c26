use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use sheetcache::background::TaskQueue;
use sheetcache::cache::MemoryCache;
use sheetcache::config::Config;
use sheetcache::middleware::{LoggerMiddleware, Pipeline};
use sheetcache::server::Server;
use sheetcache::service::SheetService;
use sheetcache::sheets::SheetsClient;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// How often expired cache entries are swept out of memory.
const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sheetcache=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    info!(config = ?config, "configuration loaded");

    let http = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;
    let source = SheetsClient::new(http, config.api_base.clone(), config.api_key.clone());

    let cache = Arc::new(MemoryCache::new());
    let tasks = TaskQueue::new();
    let service = Arc::new(SheetService::new(Arc::clone(&cache), source, tasks.clone()));
    let pipeline = Pipeline::from_router(service.router()).layer(LoggerMiddleware);

    let sweeper = tokio::spawn({
        let cache = Arc::clone(&cache);
        async move {
            let mut ticker = tokio::time::interval(CACHE_SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!(purged, remaining = cache.len(), "expired cache entries removed");
                }
            }
        }
    });

    let server = Server::bind(&config.listen_addr).await?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    };

    server
        .run_until(
            move |req| {
                let pipeline = pipeline.clone();
                async move { pipeline.handle(req).await }
            },
            shutdown,
        )
        .await?;

    info!(pending = tasks.len(), "waiting for deferred cache writes");
    tasks.drain().await;
    sweeper.abort();

    Ok(())
}
