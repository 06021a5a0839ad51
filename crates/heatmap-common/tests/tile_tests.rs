//! Tests for tile addressing and geographic helpers.

use heatmap_common::tile::{latlon_to_tile, tiles_per_axis};
use std::f64::consts::PI;

use heatmap_common::{
    distance_km, HeatmapError, LatLonDeg, LatLonRad, TileCoord, EARTH_RADIUS_KM, MAX_ZOOM,
};
use test_utils::assert_approx_eq;

// ============================================================================
// TileCoord validation tests
// ============================================================================

#[test]
fn test_every_tile_at_zoom_two_is_valid() {
    for x in 0..4 {
        for y in 0..4 {
            assert!(TileCoord::new(2, x, y).is_ok(), "2/{}/{} rejected", x, y);
        }
    }
}

#[test]
fn test_first_column_past_edge_is_rejected() {
    for z in 0..=10 {
        let n = tiles_per_axis(z);
        let result = TileCoord::new(z, n, 0);
        assert!(matches!(
            result,
            Err(HeatmapError::InvalidTileAddress { .. })
        ));
        let result = TileCoord::new(z, 0, n);
        assert!(result.is_err());
    }
}

#[test]
fn test_zoom_above_maximum_is_rejected() {
    let err = TileCoord::new(MAX_ZOOM + 1, 0, 0).unwrap_err();
    assert!(err.to_string().contains("zoom"));
    assert_eq!(err.http_status_code(), 400);
}

#[test]
fn test_error_message_names_the_address() {
    let err = TileCoord::new(1, 5, 0).unwrap_err();
    assert!(err.to_string().contains("1/5/0"));
}

// ============================================================================
// latlon_to_tile tests
// ============================================================================

#[test]
fn test_latlon_to_tile_quadrants() {
    // zoom 1: NW, NE, SW, SE
    assert_eq!(latlon_to_tile(45.0, -90.0, 1).unwrap(), TileCoord { z: 1, x: 0, y: 0 });
    assert_eq!(latlon_to_tile(45.0, 90.0, 1).unwrap(), TileCoord { z: 1, x: 1, y: 0 });
    assert_eq!(latlon_to_tile(-45.0, -90.0, 1).unwrap(), TileCoord { z: 1, x: 0, y: 1 });
    assert_eq!(latlon_to_tile(-45.0, 90.0, 1).unwrap(), TileCoord { z: 1, x: 1, y: 1 });
}

#[test]
fn test_latlon_to_tile_clamps_polar_latitudes() {
    let north = latlon_to_tile(89.9, 0.0, 4).unwrap();
    assert_eq!(north.y, 0);
    let south = latlon_to_tile(-89.9, 0.0, 4).unwrap();
    assert_eq!(south.y, 15);
}

// ============================================================================
// Distance tests
// ============================================================================

#[test]
fn test_distance_is_symmetric_for_many_pairs() {
    let points: Vec<LatLonRad> = [
        (55.75, 37.61),
        (-33.86, 151.20),
        (40.71, -74.00),
        (0.0, 0.0),
        (85.0, 179.9),
        (-85.0, -179.9),
    ]
    .iter()
    .map(|&(lat, lon)| LatLonDeg::new(lat, lon).to_radians())
    .collect();

    for a in &points {
        assert_eq!(distance_km(a, a), 0.0);
        for b in &points {
            let ab = distance_km(a, b);
            assert_eq!(ab, distance_km(b, a));
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn test_distance_along_meridian_is_arc_length() {
    let a = LatLonRad::new(0.5, 0.2);
    let b = LatLonRad::new(0.5 + 0.001, 0.2);
    assert_approx_eq!(distance_km(&a, &b), EARTH_RADIUS_KM * 0.001, 1e-9);
}

#[test]
fn test_distance_antipodal_is_half_circumference() {
    let a = LatLonRad::new(0.0, 0.0);
    let b = LatLonRad::new(0.0, PI);
    assert_approx_eq!(distance_km(&a, &b), EARTH_RADIUS_KM * PI, 1e-6);
}

#[test]
fn test_degree_radian_roundtrip() {
    let deg = LatLonDeg::new(-33.8688, 151.2093);
    let back = deg.to_radians().to_degrees();
    assert_approx_eq!(back.lat, deg.lat, 1e-12);
    assert_approx_eq!(back.lon, deg.lon, 1e-12);
}
