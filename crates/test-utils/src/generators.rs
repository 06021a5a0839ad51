//! Synthetic point-set generators.
//!
//! Every generator is deterministic so tests can assert on exact outputs
//! across runs.

use std::f64::consts::PI;

use heatmap_common::{LatLonDeg, EARTH_RADIUS_KM};

/// Kilometers spanned by one degree of latitude.
pub fn km_per_degree() -> f64 {
    EARTH_RADIUS_KM * PI / 180.0
}

/// Offsets `origin` by `north_km` and `east_km` on a local flat approximation.
pub fn offset_km(origin: LatLonDeg, north_km: f64, east_km: f64) -> LatLonDeg {
    let dlat = north_km / km_per_degree();
    let dlon = east_km / (km_per_degree() * origin.lat.to_radians().cos());
    LatLonDeg::new(origin.lat + dlat, origin.lon + dlon)
}

/// Creates `count` points spread over a disc of `radius_km` around `center`.
///
/// Points follow a sunflower (golden-angle) spiral, so density is roughly
/// uniform across the disc.
///
/// # Example
///
/// ```
/// use heatmap_common::LatLonDeg;
/// use test_utils::cluster_around;
///
/// let pts = cluster_around(LatLonDeg::new(55.75, 37.62), 50, 0.5);
/// assert_eq!(pts.len(), 50);
/// ```
pub fn cluster_around(center: LatLonDeg, count: usize, radius_km: f64) -> Vec<LatLonDeg> {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    (0..count)
        .map(|i| {
            let r = radius_km * ((i as f64 + 0.5) / count as f64).sqrt();
            let theta = golden_angle * i as f64;
            offset_km(center, r * theta.sin(), r * theta.cos())
        })
        .collect()
}

/// Creates `count` pseudo-random points scattered over latitudes ±80°.
///
/// Uses a fixed linear congruential sequence seeded by `seed`.
pub fn scatter_points(count: usize, seed: u64) -> Vec<LatLonDeg> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..count)
        .map(|_| {
            let lat = next() * 160.0 - 80.0;
            let lon = next() * 360.0 - 180.0;
            LatLonDeg::new(lat, lon)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;
    use heatmap_common::distance_km;

    #[test]
    fn test_offset_km_north() {
        let origin = LatLonDeg::new(10.0, 20.0);
        let moved = offset_km(origin, 5.0, 0.0);
        let d = distance_km(&origin.to_radians(), &moved.to_radians());
        assert_approx_eq!(d, 5.0, 1e-6);
    }

    #[test]
    fn test_cluster_stays_within_radius() {
        let center = LatLonDeg::new(55.75, 37.62);
        let pts = cluster_around(center, 200, 0.8);
        assert_eq!(pts.len(), 200);
        for p in &pts {
            let d = distance_km(&center.to_radians(), &p.to_radians());
            assert!(d < 0.81, "point {p:?} is {d} km away");
        }
    }

    #[test]
    fn test_cluster_is_deterministic() {
        let center = LatLonDeg::new(0.0, 0.0);
        assert_eq!(cluster_around(center, 10, 1.0), cluster_around(center, 10, 1.0));
    }

    #[test]
    fn test_scatter_points_in_range() {
        let pts = scatter_points(500, 42);
        assert_eq!(pts.len(), 500);
        assert!(pts.iter().all(|p| (-80.0..80.0).contains(&p.lat)));
        assert!(pts.iter().all(|p| (-180.0..180.0).contains(&p.lon)));
        assert_eq!(pts, scatter_points(500, 42));
        assert_ne!(pts, scatter_points(500, 43));
    }
}
