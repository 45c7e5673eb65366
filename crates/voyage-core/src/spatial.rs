//! Spatial math for route geometry and distance calculations.

use crate::models::Coordinates;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEG: f64 = 111.32;

/// Great-circle distance in kilometers (Haversine formula).
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lng2 - lng1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two coordinates in kilometers.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Straight-line position at fraction `t` from `a` to `b` in degree space.
///
/// Longitude is interpolated without unwrapping, so a pair straddling the
/// antimeridian interpolates the long way round.
pub fn interpolate(a: Coordinates, b: Coordinates, t: f64) -> Coordinates {
    Coordinates::new(a.lat + t * (b.lat - a.lat), a.lng + t * (b.lng - a.lng))
}

/// True when both axes differ by less than `tolerance_deg`.
pub fn within_tolerance(a: Coordinates, b: Coordinates, tolerance_deg: f64) -> bool {
    (a.lat - b.lat).abs() < tolerance_deg && (a.lng - b.lng).abs() < tolerance_deg
}

/// Planar distance in degrees, treating lat/lng as a flat grid.
pub fn degree_distance(a: Coordinates, b: Coordinates) -> f64 {
    let dlat = a.lat - b.lat;
    let dlng = a.lng - b.lng;
    (dlat * dlat + dlng * dlng).sqrt()
}

/// Index of the point nearest to `target`, ties going to the first seen.
pub fn nearest_point_index(target: Coordinates, points: &[Coordinates]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, point) in points.iter().enumerate() {
        let dist = distance_km(target, *point);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111.19).abs() < 0.1);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance(31.2304, 121.4737, 31.2304, 121.4737);
        assert!(dist < 0.000_001);
    }

    #[test]
    fn shanghai_to_los_angeles_is_long_haul() {
        let shanghai = Coordinates::new(31.2304, 121.4737);
        let los_angeles = Coordinates::new(33.7405, -118.2775);
        let dist = distance_km(shanghai, los_angeles);
        assert!(dist > 10_000.0 && dist < 11_000.0, "got {dist}");
    }

    #[test]
    fn tolerance_is_per_axis() {
        let a = Coordinates::new(10.0, 20.0);
        assert!(within_tolerance(a, Coordinates::new(10.00005, 20.00005), 0.0001));
        assert!(!within_tolerance(a, Coordinates::new(10.0, 20.0002), 0.0001));
    }

    #[test]
    fn nearest_prefers_first_on_ties() {
        let target = Coordinates::new(0.0, 0.0);
        let points = [
            Coordinates::new(0.0, 1.0),
            Coordinates::new(0.0, -1.0),
            Coordinates::new(5.0, 5.0),
        ];
        assert_eq!(nearest_point_index(target, &points), Some(0));
        assert_eq!(nearest_point_index(target, &[]), None);
    }

    #[test]
    fn interpolate_midpoint() {
        let mid = interpolate(Coordinates::new(0.0, 0.0), Coordinates::new(10.0, 20.0), 0.5);
        assert_eq!(mid, Coordinates::new(5.0, 10.0));
    }
}
