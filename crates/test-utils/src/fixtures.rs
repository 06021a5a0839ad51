//! Well-known coordinates and tiles used across the test suite.

use std::f64::consts::PI;

use heatmap_common::{LatLonDeg, TileCoord};

/// Red Square, Moscow.
pub const MOSCOW: LatLonDeg = LatLonDeg {
    lat: 55.7539,
    lon: 37.6208,
};

/// Saint Petersburg, Palace Square.
pub const SAINT_PETERSBURG: LatLonDeg = LatLonDeg {
    lat: 59.9390,
    lon: 30.3158,
};

/// Sydney Opera House. Far from every other fixture.
pub const SYDNEY: LatLonDeg = LatLonDeg {
    lat: -33.8568,
    lon: 151.2153,
};

/// Zoom level used for street-scale tests.
pub const STREET_ZOOM: u32 = 14;

/// The tile containing `point` at `zoom`.
pub fn tile_containing(point: LatLonDeg, zoom: u32) -> TileCoord {
    heatmap_common::tile::latlon_to_tile(point.lat, point.lon, zoom)
        .expect("fixture point must map to a tile")
}

/// Geographic center of the tile, computed with the inverse Web Mercator
/// formulas at the tile's mid-point.
pub fn tile_center(coord: &TileCoord) -> LatLonDeg {
    let n = (1u64 << coord.z) as f64;
    let x = coord.x as f64 + 0.5;
    let y = coord.y as f64 + 0.5;
    let lon = x / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
    LatLonDeg::new(lat, lon)
}

/// A tile at `STREET_ZOOM` with nothing of interest nearby (mid-Pacific).
pub fn empty_ocean_tile() -> TileCoord {
    tile_containing(LatLonDeg::new(-30.0, -140.0), STREET_ZOOM)
}
