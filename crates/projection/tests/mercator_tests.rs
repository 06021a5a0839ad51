//! Tests for the inverse Web Mercator grid projection.

use std::f64::consts::PI;

use heatmap_common::{TileCoord, TILE_SIZE};
use projection::project_tile;
use test_utils::assert_approx_eq;

/// atan(sinh(π)), the Web Mercator latitude limit in radians (~85.0511°).
const MERCATOR_LAT_LIMIT: f64 = 1.484_422_229_745_332;

// ============================================================================
// Zoom 0 bounds
// ============================================================================

#[test]
fn test_zoom0_longitude_spans_full_circle() {
    let grid = project_tile(&TileCoord::new(0, 0, 0).unwrap());

    for row in [0, 128, TILE_SIZE - 1] {
        assert_approx_eq!(grid.get(row, 0).lon, -PI, 1e-12);
        assert_approx_eq!(grid.get(row, TILE_SIZE - 1).lon, PI, 1e-12);
    }
}

#[test]
fn test_zoom0_latitude_bounded_by_mercator_limit() {
    let grid = project_tile(&TileCoord::new(0, 0, 0).unwrap());

    let top = grid.get(0, 0).lat;
    let bottom = grid.get(TILE_SIZE - 1, 0).lat;
    assert_approx_eq!(top, MERCATOR_LAT_LIMIT, 1e-12);
    assert_approx_eq!(bottom, -MERCATOR_LAT_LIMIT, 1e-12);
    assert_approx_eq!(top.to_degrees(), 85.0511, 1e-3);

    for cell in grid.as_slice() {
        assert!(cell.lat.abs() <= MERCATOR_LAT_LIMIT + 1e-12);
        assert!(cell.lon.abs() <= PI + 1e-12);
    }
}

#[test]
fn test_zoom0_monotonic_in_offsets() {
    let grid = project_tile(&TileCoord::new(0, 0, 0).unwrap());

    for i in 1..TILE_SIZE {
        // Longitude grows west to east along a row.
        assert!(grid.get(0, i).lon > grid.get(0, i - 1).lon);
        // Latitude falls north to south down a column.
        assert!(grid.get(i, 0).lat < grid.get(i - 1, 0).lat);
    }
}

// ============================================================================
// Deeper zooms
// ============================================================================

#[test]
fn test_latitude_constant_along_rows_and_longitude_along_columns() {
    let grid = project_tile(&TileCoord::new(12, 2476, 1280).unwrap());

    for row in [0, 77, 255] {
        let lat = grid.get(row, 0).lat;
        for col in 0..TILE_SIZE {
            assert_eq!(grid.get(row, col).lat, lat);
        }
    }
    for col in [0, 128, 255] {
        let lon = grid.get(0, col).lon;
        for row in 0..TILE_SIZE {
            assert_eq!(grid.get(row, col).lon, lon);
        }
    }
}

#[test]
fn test_tile_contains_known_location() {
    // Zoom 10 tile covering central Moscow.
    let grid = project_tile(&TileCoord::new(10, 619, 320).unwrap());
    let nw = grid.corner().to_degrees();
    let se = grid.get(TILE_SIZE - 1, TILE_SIZE - 1).to_degrees();

    assert!(nw.lon < 37.65 && se.lon > 37.65);
    assert!(nw.lat > 55.7558 && se.lat < 55.7558);
}
