//! Bounded-radius kernel density accumulation.
//!
//! Each point contributes `max(0, INFLUENCE_RADIUS_KM − d)` to every cell at
//! distance `d` km. The sum is divided by `DENSITY_NORMALIZER` and clamped to
//! `[0, 1]`. Cells are independent, so rows are evaluated in parallel.

use rayon::prelude::*;

use heatmap_common::{
    distance_km, LatLonRad, DENSITY_NORMALIZER, INFLUENCE_RADIUS_KM, TILE_PIXELS, TILE_SIZE,
};
use projection::GeoGrid;

/// A 256×256 grid of normalized densities in `[0, 1]`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    values: Vec<f64>,
}

impl DensityGrid {
    /// Build a grid from raw row-major values, clamping each into `[0, 1]`.
    #[cfg(test)]
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        assert_eq!(values.len(), TILE_PIXELS, "density grid must be 256x256");
        let values = values.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Self { values }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * TILE_SIZE + col]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Triangular kernel: linear falloff reaching zero at `INFLUENCE_RADIUS_KM`.
#[inline]
pub fn kernel(distance_km: f64) -> f64 {
    (INFLUENCE_RADIUS_KM - distance_km).max(0.0)
}

/// Normalized density at a single location.
#[inline]
pub fn cell_density(cell: &LatLonRad, points: &[LatLonRad]) -> f64 {
    let raw: f64 = points.iter().map(|p| kernel(distance_km(cell, p))).sum();
    (raw / DENSITY_NORMALIZER).clamp(0.0, 1.0)
}

/// Evaluate the kernel density for every cell of a projected tile.
pub fn accumulate(grid: &GeoGrid, points: &[LatLonRad]) -> DensityGrid {
    let mut values = vec![0.0f64; TILE_PIXELS];

    values
        .par_chunks_mut(TILE_SIZE)
        .zip(grid.as_slice().par_chunks(TILE_SIZE))
        .for_each(|(out_row, cells)| {
            for (out, cell) in out_row.iter_mut().zip(cells) {
                *out = cell_density(cell, points);
            }
        });

    DensityGrid { values }
}
