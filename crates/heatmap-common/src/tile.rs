//! Slippy-map tile addressing (z/x/y, top-left origin).

use serde::{Deserialize, Serialize};

use crate::constants::MAX_ZOOM;
use crate::error::{HeatmapError, HeatmapResult};

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    /// Build a tile coordinate, rejecting addresses outside the pyramid.
    ///
    /// Out-of-range columns or rows are an error, never wrapped.
    pub fn new(z: u32, x: u32, y: u32) -> HeatmapResult<Self> {
        let invalid = |reason: String| HeatmapError::InvalidTileAddress { z, x, y, reason };

        if z > MAX_ZOOM {
            return Err(invalid(format!("zoom exceeds maximum of {}", MAX_ZOOM)));
        }

        let n = tiles_per_axis(z);
        if x >= n {
            return Err(invalid(format!("x must be in [0, {})", n)));
        }
        if y >= n {
            return Err(invalid(format!("y must be in [0, {})", n)));
        }

        Ok(Self { z, x, y })
    }

    /// Relative path key `{z}/{x}/{y}` without extension.
    pub fn path_key(&self) -> String {
        format!("{}/{}/{}", self.z, self.x, self.y)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Number of tiles along one axis at the given zoom.
#[inline]
pub fn tiles_per_axis(z: u32) -> u32 {
    1u32 << z
}

/// Convert lat/lon (degrees) to the Web Mercator tile containing it.
///
/// Latitudes beyond the Mercator limit are clamped to the edge rows.
pub fn latlon_to_tile(lat: f64, lon: f64, zoom: u32) -> HeatmapResult<TileCoord> {
    let n = tiles_per_axis(zoom.min(MAX_ZOOM)) as f64;

    let x = ((lon + 180.0) / 360.0 * n).floor().clamp(0.0, n - 1.0) as u32;
    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / std::f64::consts::PI) / 2.0 * n)
        .floor()
        .clamp(0.0, n - 1.0) as u32;

    TileCoord::new(zoom, x, y)
}
