//! Shared, swappable point snapshot.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use heatmap_common::{LatLonDeg, PointSnapshot};

/// Holds the snapshot every render reads from.
///
/// Readers clone the inner `Arc` and release the lock immediately, so a
/// publish never waits on a render and a render never sees a half-updated
/// point set.
#[derive(Debug)]
pub struct PointStore {
    current: RwLock<Arc<PointSnapshot>>,
}

impl PointStore {
    /// Start with an empty generation-0 snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(PointSnapshot::empty())),
        }
    }

    pub async fn current(&self) -> Arc<PointSnapshot> {
        self.current.read().await.clone()
    }

    /// Replace the snapshot with `points` and return the new generation.
    pub async fn publish(&self, points: Vec<LatLonDeg>) -> u64 {
        let mut guard = self.current.write().await;
        let generation = guard.generation + 1;
        let count = points.len();
        *guard = Arc::new(PointSnapshot::new(generation, points));
        drop(guard);

        metrics::gauge!("heatmap_points").set(count as f64);
        info!(generation = generation, points = count, "Published point snapshot");
        generation
    }
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new()
    }
}
