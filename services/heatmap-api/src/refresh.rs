//! Periodic point-set refresh.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{error, info};

use crate::points::PointStore;
use crate::sources::PointSource;

/// Loads points from a source and publishes them into a [`PointStore`].
pub struct Refresher {
    source: Arc<dyn PointSource>,
    store: Arc<PointStore>,
    interval: Duration,
}

impl Refresher {
    pub fn new(source: Arc<dyn PointSource>, store: Arc<PointStore>, interval: Duration) -> Self {
        Self {
            source,
            store,
            interval,
        }
    }

    /// Run the source once and publish the result.
    ///
    /// On failure the current snapshot is left in place.
    pub async fn refresh_once(&self) -> Result<u64> {
        let points = self.source.load().await?;
        Ok(self.store.publish(points).await)
    }

    /// Refresh on `interval` until a shutdown signal arrives.
    ///
    /// The first refresh happens one interval after the call; the initial
    /// load is the caller's job.
    pub async fn run_forever(&self, mut shutdown: broadcast::Receiver<()>) {
        if self.interval.is_zero() {
            info!("Point refresh disabled");
            return;
        }

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Shutting down point refresh");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {
                    match self.refresh_once().await {
                        Ok(generation) => {
                            info!(source = self.source.name(), generation = generation, "Refreshed points");
                        }
                        Err(e) => {
                            error!(
                                source = self.source.name(),
                                error = %e,
                                "Point refresh failed, keeping previous snapshot"
                            );
                        }
                    }
                }
            }
        }
    }
}
