//! Tunable thresholds for route synthesis and fusion.

use serde::{Deserialize, Serialize};

use crate::spatial::KM_PER_DEG;

/// Configuration for route geometry and fusion.
///
/// Defaults reproduce the thresholds the map has always used. The degree
/// tolerances ignore that a degree of longitude shrinks towards the poles;
/// the `*_m`/`*_km` helpers give their equatorial metric equivalents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Above this great-circle distance two sea waypoints are inserted
    pub long_haul_km: f64,
    /// Above this (and up to `long_haul_km`) one sea waypoint is inserted
    pub medium_haul_km: f64,
    /// Latitude scale applied to long-haul waypoints
    pub long_haul_equator_pull: f64,
    /// Latitude scale applied to the medium-haul midpoint
    pub medium_haul_equator_pull: f64,
    /// Consecutive points closer than this (per axis) are duplicates
    pub dedupe_tolerance_deg: f64,
    /// Vessel closer than this to the origin port has left the quay
    pub origin_reached_tolerance_deg: f64,
    /// Coastal stand-in points closer than this to their city are skipped
    pub coastal_min_offset_deg: f64,
    /// Points interpolated when splicing a vessel onto a regenerated route
    pub reconnect_dense_points: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            long_haul_km: 5000.0,
            medium_haul_km: 2000.0,
            long_haul_equator_pull: 0.85,
            medium_haul_equator_pull: 0.90,
            dedupe_tolerance_deg: 0.0001,
            origin_reached_tolerance_deg: 0.01,
            coastal_min_offset_deg: 0.5,
            reconnect_dense_points: 10,
        }
    }
}

impl RouteConfig {
    /// De-duplication tolerance in meters at the equator (~11 m).
    pub fn dedupe_tolerance_m(&self) -> f64 {
        self.dedupe_tolerance_deg * KM_PER_DEG * 1000.0
    }

    /// Origin-reached tolerance in kilometers at the equator (~1.1 km).
    pub fn origin_reached_tolerance_km(&self) -> f64 {
        self.origin_reached_tolerance_deg * KM_PER_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_equivalents_match_documented_values() {
        let config = RouteConfig::default();
        assert!((config.dedupe_tolerance_m() - 11.132).abs() < 0.01);
        assert!((config.origin_reached_tolerance_km() - 1.1132).abs() < 0.001);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RouteConfig = serde_json::from_str(r#"{"long_haul_km": 6000}"#).unwrap();
        assert_eq!(config.long_haul_km, 6000.0);
        assert_eq!(config.medium_haul_km, 2000.0);
        assert_eq!(config.reconnect_dense_points, 10);
    }
}
