use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use crate::cache::StatusCache;
use crate::github::{FetchError, StatusSource};

/// Background loop keeping the status cache in sync with upstream.
pub struct Refresher {
    source: Arc<dyn StatusSource>,
    cache: Arc<StatusCache>,
    interval: Duration,
    purge_stale: bool,
}

impl Refresher {
    pub fn new(
        source: Arc<dyn StatusSource>,
        cache: Arc<StatusCache>,
        interval: Duration,
        purge_stale: bool,
    ) -> Self {
        Self {
            source,
            cache,
            interval,
            purge_stale,
        }
    }

    /// Run a single poll cycle. Returns how many contexts were written.
    ///
    /// The cache is only touched when the whole cycle succeeds.
    pub async fn run_once(&self) -> Result<usize, FetchError> {
        let records = self.source.fetch_statuses().await?;
        let count = records.len();
        self.cache.apply(records, self.purge_stale).await;
        Ok(count)
    }

    /// Poll forever. A failed cycle is logged and retried after the
    /// regular interval; the pause is measured from the end of a cycle.
    pub async fn run(self) {
        tracing::info!("Starting status polling every {}s", self.interval.as_secs());
        loop {
            match self.run_once().await {
                Ok(count) => {
                    let cached = self.cache.len().await;
                    tracing::info!("Refreshed {} contexts, {} cached", count, cached);
                }
                Err(e) => {
                    tracing::error!("Status refresh failed: {}", e);
                }
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Spawn the polling loop onto the runtime
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
