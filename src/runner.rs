use std::sync::Arc;
use crate::cache::StatusCache;
use crate::config::Config;
use crate::github::StatusFetcher;
use crate::http::{server, AppState, BadgeStore};
use crate::refresher::Refresher;

/// Load configuration, start the refresher and serve badges until Ctrl-C.
pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    tracing::info!(
        "Tracking {}@{} via {}, polling every {}s, timeout {}s",
        cfg.repo,
        cfg.branch,
        cfg.api_url,
        cfg.update_interval.as_secs(),
        cfg.client_timeout.as_secs()
    );
    if cfg.purge_stale {
        tracing::info!("Contexts missing from the latest report will be purged");
    }

    let badges = BadgeStore::new(cfg.badge_dir.clone());
    let missing = badges.missing();
    if !missing.is_empty() {
        tracing::warn!(
            "{} of 4 badge images missing in {}: {:?}",
            missing.len(),
            badges.dir().display(),
            missing
        );
    }

    let cache = Arc::new(StatusCache::new());
    let fetcher = Arc::new(StatusFetcher::new(&cfg));
    let refresher = Refresher::new(fetcher, cache.clone(), cfg.update_interval, cfg.purge_stale);
    let polling = refresher.start();

    let state = AppState::new(cache, badges);
    let result = server::start(&cfg.port, state, shutdown_signal()).await;

    polling.abort();
    result.map_err(|e| anyhow::anyhow!("badge server error: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
