//! Common types and utilities shared across the heatmap tile crates and services.

pub mod constants;
pub mod error;
pub mod geo;
pub mod points;
pub mod tile;

pub use constants::{
    DENSITY_NORMALIZER, EARTH_RADIUS_KM, INFLUENCE_RADIUS_KM, MAX_ALPHA, MAX_ZOOM, TILE_PIXELS,
    TILE_SIZE,
};
pub use error::{HeatmapError, HeatmapResult};
pub use geo::{distance_km, LatLonDeg, LatLonRad};
pub use points::PointSnapshot;
pub use tile::TileCoord;
