//! Named constants for the density kernel and the tile pyramid.
//!
//! The kernel radius, normalizer and alpha cap are hand-tuned values.
//! Changing any of them changes every rendered tile.

/// Mean Earth radius used by the haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// Radius of a single point's triangular kernel, in kilometers.
pub const INFLUENCE_RADIUS_KM: f64 = 1.2;

/// Divisor converting summed kernel contributions into the [0, 1] scale.
pub const DENSITY_NORMALIZER: f64 = 7.0;

/// Upper bound on tile alpha so the base map stays visible.
pub const MAX_ALPHA: f64 = 0.95;

/// Tile edge length in pixels.
pub const TILE_SIZE: usize = 256;

/// Number of pixels in a tile.
pub const TILE_PIXELS: usize = TILE_SIZE * TILE_SIZE;

/// Highest accepted zoom level (2^30 tiles per axis).
pub const MAX_ZOOM: u32 = 30;
