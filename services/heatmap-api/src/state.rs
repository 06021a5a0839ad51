//! Application state and shared resources.

use std::sync::Arc;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;

use renderer::TileRenderer;
use storage::TileStore;

use crate::config::ServiceConfig;
use crate::metrics::MetricsCollector;
use crate::points::PointStore;

/// Shared application state.
pub struct AppState {
    pub config: ServiceConfig,
    pub renderer: TileRenderer,
    pub points: Arc<PointStore>,
    pub metrics: MetricsCollector,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    /// Build the state and write the placeholder tile if it is missing.
    pub fn new(config: ServiceConfig, prometheus: PrometheusHandle) -> Result<Self> {
        let store = TileStore::new(&config.tiles.root, &config.tiles.placeholder);
        let renderer = TileRenderer::new(store).with_context(|| {
            format!(
                "Failed to prepare tile directory {}",
                config.tiles.root.display()
            )
        })?;

        Ok(Self {
            config,
            renderer,
            points: Arc::new(PointStore::new()),
            metrics: MetricsCollector::new(),
            prometheus,
        })
    }
}
