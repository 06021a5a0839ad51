//! Application metrics collection and reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use metrics::{counter, histogram};
use serde::Serialize;
use tokio::sync::RwLock;

/// Metrics collector for the tile service.
///
/// Every event is mirrored to the `metrics` facade (scraped via `/metrics`)
/// and to in-process counters (served as JSON from `/api/metrics`).
#[derive(Debug)]
pub struct MetricsCollector {
    pub tiles_rendered: AtomicU64,
    pub tiles_empty: AtomicU64,
    pub tile_errors: AtomicU64,

    /// Stored as microseconds
    render_times: RwLock<TimingStats>,

    start_time: Instant,
}

#[derive(Debug, Default)]
struct TimingStats {
    count: u64,
    total_us: u64,
    min_us: u64,
    max_us: u64,
    last_us: u64,
}

impl TimingStats {
    fn record(&mut self, duration_us: u64) {
        self.count += 1;
        self.total_us += duration_us;
        self.last_us = duration_us;
        if self.min_us == 0 || duration_us < self.min_us {
            self.min_us = duration_us;
        }
        if duration_us > self.max_us {
            self.max_us = duration_us;
        }
    }

    fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.total_us as f64 / self.count as f64) / 1000.0
        }
    }
}

/// Point-in-time view of the collector.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub tiles_rendered: u64,
    pub tiles_empty: u64,
    pub tile_errors: u64,
    pub render_count: u64,
    pub render_avg_ms: f64,
    pub render_min_ms: f64,
    pub render_max_ms: f64,
    pub render_last_ms: f64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            tiles_rendered: AtomicU64::new(0),
            tiles_empty: AtomicU64::new(0),
            tile_errors: AtomicU64::new(0),
            render_times: RwLock::new(TimingStats::default()),
            start_time: Instant::now(),
        }
    }

    /// Record a successful tile request.
    ///
    /// `placeholder` marks tiles no point influenced.
    pub async fn record_tile(&self, duration_us: u64, placeholder: bool) {
        if placeholder {
            self.tiles_empty.fetch_add(1, Ordering::Relaxed);
            counter!("heatmap_tiles_empty_total").increment(1);
        } else {
            self.tiles_rendered.fetch_add(1, Ordering::Relaxed);
            counter!("heatmap_tiles_rendered_total").increment(1);
        }
        histogram!("heatmap_render_duration_ms").record(duration_us as f64 / 1000.0);

        self.render_times.write().await.record(duration_us);
    }

    /// Record a failed tile request.
    pub fn record_error(&self) {
        self.tile_errors.fetch_add(1, Ordering::Relaxed);
        counter!("heatmap_tile_errors_total").increment(1);
    }

    pub async fn snapshot(&self) -> MetricsSnapshot {
        let times = self.render_times.read().await;
        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            tiles_rendered: self.tiles_rendered.load(Ordering::Relaxed),
            tiles_empty: self.tiles_empty.load(Ordering::Relaxed),
            tile_errors: self.tile_errors.load(Ordering::Relaxed),
            render_count: times.count,
            render_avg_ms: times.avg_ms(),
            render_min_ms: times.min_us as f64 / 1000.0,
            render_max_ms: times.max_us as f64 / 1000.0,
            render_last_ms: times.last_us as f64 / 1000.0,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
