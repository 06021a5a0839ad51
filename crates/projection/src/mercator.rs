//! Inverse Web Mercator projection of a tile's pixel grid.
//!
//! A tile at (z, x, y) is sampled at 256 evenly spaced sub-pixel offsets
//! `f = i / 255` along each axis, so the first and last samples sit exactly
//! on the tile edges:
//!
//! ```text
//! lon = (x + f_col) / 2^z * 2π − π
//! lat = atan(sinh(π * (1 − 2 * (y + f_row) / 2^z)))
//! ```

use std::f64::consts::PI;

use heatmap_common::{LatLonRad, TileCoord, TILE_PIXELS, TILE_SIZE};

/// Row/column index of the sample used as the tile's center.
pub const CENTER_INDEX: usize = TILE_SIZE / 2;

/// A 256×256 grid of geographic coordinates (radians), row-major.
///
/// Row follows the vertical sub-pixel offset (north to south), column the
/// horizontal one (west to east).
#[derive(Debug, Clone)]
pub struct GeoGrid {
    cells: Vec<LatLonRad>,
}

impl GeoGrid {
    /// Sample at `[row][col]`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> LatLonRad {
        self.cells[row * TILE_SIZE + col]
    }

    /// The sample at `[128][128]`.
    pub fn center(&self) -> LatLonRad {
        self.get(CENTER_INDEX, CENTER_INDEX)
    }

    /// The north-west corner sample `[0][0]`.
    pub fn corner(&self) -> LatLonRad {
        self.get(0, 0)
    }

    /// All samples in row-major order.
    pub fn as_slice(&self) -> &[LatLonRad] {
        &self.cells
    }
}

/// The 256 sub-pixel offsets `0, 1/255, …, 1`.
pub fn subpixel_offsets() -> [f64; TILE_SIZE] {
    let last = (TILE_SIZE - 1) as f64;
    let mut offsets = [0.0; TILE_SIZE];
    for (i, f) in offsets.iter_mut().enumerate() {
        *f = i as f64 / last;
    }
    offsets
}

/// Longitude (radians) of horizontal tile position `x + f` at zoom `z`.
#[inline]
pub fn tile_longitude(z: u32, x: f64) -> f64 {
    let n = (1u64 << z) as f64;
    x / n * 2.0 * PI - PI
}

/// Latitude (radians) of vertical tile position `y + f` at zoom `z`.
#[inline]
pub fn tile_latitude(z: u32, y: f64) -> f64 {
    let n = (1u64 << z) as f64;
    (PI * (1.0 - 2.0 * y / n)).sinh().atan()
}

/// Project a tile's pixel grid to geographic coordinates.
///
/// Latitude depends only on the row and longitude only on the column, so
/// each is computed once per axis and combined.
pub fn project_tile(coord: &TileCoord) -> GeoGrid {
    let offsets = subpixel_offsets();

    let lons: Vec<f64> = offsets
        .iter()
        .map(|f| tile_longitude(coord.z, coord.x as f64 + f))
        .collect();
    let lats: Vec<f64> = offsets
        .iter()
        .map(|f| tile_latitude(coord.z, coord.y as f64 + f))
        .collect();

    let mut cells = Vec::with_capacity(TILE_PIXELS);
    for &lat in &lats {
        for &lon in &lons {
            cells.push(LatLonRad { lat, lon });
        }
    }

    GeoGrid { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_subpixel_offsets_endpoints() {
        let offsets = subpixel_offsets();
        assert_eq!(offsets[0], 0.0);
        assert_eq!(offsets[TILE_SIZE - 1], 1.0);
        assert_approx_eq!(offsets[1], 1.0 / 255.0, 1e-15);
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = project_tile(&TileCoord::new(3, 4, 2).unwrap());
        assert_eq!(grid.as_slice().len(), TILE_PIXELS);
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        let left = project_tile(&TileCoord::new(5, 10, 12).unwrap());
        let right = project_tile(&TileCoord::new(5, 11, 12).unwrap());
        let below = project_tile(&TileCoord::new(5, 10, 13).unwrap());

        for row in 0..TILE_SIZE {
            let a = left.get(row, TILE_SIZE - 1);
            let b = right.get(row, 0);
            assert_approx_eq!(a.lon, b.lon, 1e-12);
        }
        assert_approx_eq!(left.get(TILE_SIZE - 1, 0).lat, below.get(0, 0).lat, 1e-12);
    }

    #[test]
    fn test_equator_at_zoom_one_boundary() {
        let grid = project_tile(&TileCoord::new(1, 0, 0).unwrap());
        // Bottom edge of the northern tile at zoom 1 is the equator.
        assert_approx_eq!(grid.get(TILE_SIZE - 1, 0).lat, 0.0, 1e-12);
        // Right edge is the prime meridian.
        assert_approx_eq!(grid.get(0, TILE_SIZE - 1).lon, 0.0, 1e-12);
    }
}
