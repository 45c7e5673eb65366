//! Sea waypoint synthesis between two endpoints.
//!
//! A heuristic, not maritime routing: long legs get intermediate points
//! pulled towards the equator so a straight-line render bows out over open
//! water instead of cutting across a continent.

use crate::config::RouteConfig;
use crate::models::{Coordinates, RoutePoint};
use crate::spatial::{distance_km, interpolate};

/// Intermediate points for the leg `a` → `b` (0, 1 or 2 of them).
pub fn synthesize(a: Coordinates, b: Coordinates, config: &RouteConfig) -> Vec<RoutePoint> {
    let distance = distance_km(a, b);

    if distance > config.long_haul_km {
        [1.0 / 3.0, 2.0 / 3.0]
            .into_iter()
            .map(|t| pull_towards_equator(interpolate(a, b, t), config.long_haul_equator_pull))
            .map(RoutePoint::synthetic)
            .collect()
    } else if distance > config.medium_haul_km {
        let mid = interpolate(a, b, 0.5);
        vec![RoutePoint::synthetic(pull_towards_equator(
            mid,
            config.medium_haul_equator_pull,
        ))]
    } else {
        Vec::new()
    }
}

/// Interleave synthesized waypoints between every consecutive pair.
///
/// Input points keep their kind and source index; the result starts and ends
/// with the first and last input point.
pub fn densify(points: &[RoutePoint], config: &RouteConfig) -> Vec<RoutePoint> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.extend(synthesize(points[i - 1].coordinates, point.coordinates, config));
        }
        out.push(*point);
    }
    out
}

fn pull_towards_equator(point: Coordinates, scale: f64) -> Coordinates {
    Coordinates::new(point.lat * scale, point.lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoutePointKind;
    use crate::spatial::distance_km;

    fn config() -> RouteConfig {
        RouteConfig::default()
    }

    #[test]
    fn short_leg_gets_no_waypoints() {
        // Rotterdam -> Hamburg, ~410 km
        let a = Coordinates::new(51.9244, 4.4777);
        let b = Coordinates::new(53.5511, 9.9937);
        assert!(synthesize(a, b, &config()).is_empty());
    }

    #[test]
    fn medium_leg_gets_pulled_midpoint() {
        // Shanghai -> Singapore, ~3,800 km
        let a = Coordinates::new(31.2304, 121.4737);
        let b = Coordinates::new(1.2644, 103.8200);
        let d = distance_km(a, b);
        assert!(d > 2000.0 && d <= 5000.0, "got {d}");

        let points = synthesize(a, b, &config());
        assert_eq!(points.len(), 1);
        let expected_lat = (a.lat + b.lat) / 2.0 * 0.9;
        assert!((points[0].coordinates.lat - expected_lat).abs() < 1e-9);
        assert!((points[0].coordinates.lng - (a.lng + b.lng) / 2.0).abs() < 1e-9);
        assert_eq!(points[0].kind, RoutePointKind::SeaWaypoint);
        assert_eq!(points[0].source_index, None);
    }

    #[test]
    fn long_leg_gets_two_pulled_thirds() {
        // Rotterdam -> New York, ~5,900 km
        let a = Coordinates::new(51.9244, 4.4777);
        let b = Coordinates::new(40.6840, -74.0440);
        let points = synthesize(a, b, &config());
        assert_eq!(points.len(), 2);

        let first_lat = (a.lat + (b.lat - a.lat) / 3.0) * 0.85;
        let second_lat = (a.lat + 2.0 * (b.lat - a.lat) / 3.0) * 0.85;
        assert!((points[0].coordinates.lat - first_lat).abs() < 1e-9);
        assert!((points[1].coordinates.lat - second_lat).abs() < 1e-9);
    }

    #[test]
    fn count_follows_distance_bands() {
        let origin = Coordinates::new(0.0, 0.0);
        for lng in [5.0, 15.0, 25.0, 40.0, 60.0, 90.0] {
            let b = Coordinates::new(0.0, lng);
            let d = distance_km(origin, b);
            let expected = if d > 5000.0 {
                2
            } else if d > 2000.0 {
                1
            } else {
                0
            };
            assert_eq!(synthesize(origin, b, &config()).len(), expected, "d={d}");
        }
    }

    #[test]
    fn densify_keeps_endpoints_and_order() {
        let a = RoutePoint::new(Coordinates::new(0.0, 0.0), RoutePointKind::Origin, Some(0));
        let b = RoutePoint::new(Coordinates::new(0.0, 30.0), RoutePointKind::Transshipment, Some(1));
        let c = RoutePoint::new(Coordinates::new(0.0, 31.0), RoutePointKind::Destination, Some(2));
        let out = densify(&[a, b, c], &config());
        // a..b is ~3,300 km (1 waypoint), b..c is short (none)
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], a);
        assert_eq!(out[2], b);
        assert_eq!(out[3], c);
        assert!(densify(&[], &config()).is_empty());
    }
}
