//! Coordinate transformations for slippy-map tiles.
//!
//! Implements the inverse Web Mercator projection from scratch without
//! external dependencies.

pub mod mercator;

pub use mercator::{project_tile, subpixel_offsets, tile_latitude, tile_longitude, GeoGrid};
