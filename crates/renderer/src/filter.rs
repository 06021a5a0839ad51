//! Proximity filtering of points against a projected tile.

use heatmap_common::{distance_km, LatLonRad, INFLUENCE_RADIUS_KM};
use projection::GeoGrid;

/// Corner-to-center distance of a projected tile, in kilometers.
///
/// An upper bound on how far any sample in the tile lies from its center.
pub fn tile_radius_km(grid: &GeoGrid) -> f64 {
    distance_km(&grid.corner(), &grid.center())
}

/// Keep only the points whose kernel can reach into the tile.
///
/// A point is kept iff `distance(point, center) − tile_radius < INFLUENCE_RADIUS_KM`.
/// Non-finite points are dropped.
pub fn filter_points(grid: &GeoGrid, points: &[LatLonRad]) -> Vec<LatLonRad> {
    let center = grid.center();
    let tile_radius = tile_radius_km(grid);

    points
        .iter()
        .filter(|p| p.is_finite())
        .filter(|p| distance_km(p, &center) - tile_radius < INFLUENCE_RADIUS_KM)
        .copied()
        .collect()
}
