//! Immutable point-set snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::geo::{LatLonDeg, LatLonRad};

/// A point set published as a whole.
///
/// Snapshots are never mutated after construction; a refresh builds a new
/// snapshot and swaps it in, so a render always sees one consistent set.
#[derive(Debug, Clone, Serialize)]
pub struct PointSnapshot {
    /// Monotonic publish counter (0 for the initial empty snapshot).
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
    pub points: Vec<LatLonDeg>,
}

impl PointSnapshot {
    pub fn new(generation: u64, points: Vec<LatLonDeg>) -> Self {
        Self {
            generation,
            loaded_at: Utc::now(),
            points,
        }
    }

    /// An empty generation-0 snapshot.
    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert the snapshot to radians, dropping non-finite points.
    ///
    /// Returns the converted points and the number of points dropped.
    pub fn to_radians(&self) -> (Vec<LatLonRad>, usize) {
        let converted: Vec<LatLonRad> = self
            .points
            .iter()
            .filter(|p| p.is_finite())
            .map(LatLonDeg::to_radians)
            .collect();

        let dropped = self.points.len() - converted.len();
        if dropped > 0 {
            warn!(
                generation = self.generation,
                dropped = dropped,
                "Dropping non-finite points from snapshot"
            );
        }

        (converted, dropped)
    }
}
