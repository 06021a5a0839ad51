//! Geographic point types and great-circle distance.
//!
//! Points arrive from upstream in degrees ([`LatLonDeg`]) and are converted
//! once, at the render boundary, into radians ([`LatLonRad`]). All
//! trigonometry in the pipeline works on radians.

use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_KM;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonDeg {
    pub lat: f64,
    pub lon: f64,
}

impl LatLonDeg {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both angles are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub fn to_radians(&self) -> LatLonRad {
        LatLonRad {
            lat: self.lat.to_radians(),
            lon: self.lon.to_radians(),
        }
    }
}

impl From<(f64, f64)> for LatLonDeg {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// A latitude/longitude pair in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLonRad {
    pub lat: f64,
    pub lon: f64,
}

impl LatLonRad {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub fn to_degrees(&self) -> LatLonDeg {
        LatLonDeg {
            lat: self.lat.to_degrees(),
            lon: self.lon.to_degrees(),
        }
    }
}

/// Haversine great-circle distance between two points, in kilometers.
///
/// Symmetric, non-negative, and exactly zero for identical inputs.
/// NaN inputs produce NaN.
#[inline]
pub fn distance_km(a: &LatLonRad, b: &LatLonRad) -> f64 {
    let half_dlat = ((b.lat - a.lat) / 2.0).sin();
    let half_dlon = ((b.lon - a.lon) / 2.0).sin();

    let h = half_dlat * half_dlat + a.lat.cos() * b.lat.cos() * half_dlon * half_dlon;
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
