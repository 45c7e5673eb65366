//! Core data models for shipments, milestones and rendered routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoyageError};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        let coords = Self::new(lat, lng);
        if coords.is_valid() {
            Ok(coords)
        } else {
            Err(VoyageError::InvalidCoordinates { lat, lng })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    /// Booked, cargo not yet moving
    #[default]
    Pending,
    /// On the water (or road, or in the air)
    InTransit,
    /// Handed over at destination
    Delivered,
    /// Administratively closed
    Closed,
}

impl ShipmentStatus {
    /// Parse a loosely-typed status string from an external feed.
    ///
    /// Unrecognised values read as `Pending`.
    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "delivered" => Self::Delivered,
            "intransit" | "transit" => Self::InTransit,
            "closed" => Self::Closed,
            "pending" => Self::Pending,
            _ => {
                tracing::debug!("Unknown shipment status {:?}, treating as pending", raw);
                Self::Pending
            }
        }
    }

    /// Delivered or closed: the voyage is over.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Delivered | Self::Closed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Ocean,
    Air,
    Road,
    Rail,
    #[default]
    Unknown,
}

impl TransportMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ocean" | "sea" | "fcl" | "lcl" => Self::Ocean,
            "air" => Self::Air,
            "road" | "truck" | "ftl" | "ltl" => Self::Road,
            "rail" => Self::Rail,
            _ => Self::Unknown,
        }
    }
}

/// A shipment as handed to the core by the data-access layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub order_number: Option<String>,
    pub status: ShipmentStatus,
    pub mode: TransportMode,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub milestones: Vec<RawMilestone>,
    #[serde(default)]
    pub package_count: usize,
    #[serde(default)]
    pub containers: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub estimated_delivery: Option<DateTime<Utc>>,
}

impl Shipment {
    /// Minimal shipment with no milestones, for callers building one by hand.
    pub fn new(id: impl Into<String>, status: ShipmentStatus) -> Self {
        Self {
            id: id.into(),
            order_number: None,
            status,
            mode: TransportMode::Unknown,
            origin: None,
            destination: None,
            milestones: Vec::new(),
            package_count: 0,
            containers: Vec::new(),
            created_at: None,
            estimated_delivery: None,
        }
    }

    pub fn with_route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self.destination = Some(destination.into());
        self
    }

    /// True when a feed keyed by `id` or `order_number` belongs to this shipment.
    pub fn matches(&self, id: Option<&str>, order_number: Option<&str>) -> bool {
        let id_match = id.is_some_and(|id| !id.is_empty() && id == self.id);
        let order_match = match (order_number, self.order_number.as_deref()) {
            (Some(theirs), Some(ours)) => !theirs.is_empty() && theirs == ours,
            _ => false,
        };
        id_match || order_match
    }
}

/// A milestone as it arrives from a feed, before classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMilestone {
    pub id: Option<String>,
    /// Type code: 0 empty-to-shipper, 1 departure, 2 arrival, 3 delivery
    pub code: Option<u32>,
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Explicit position, when the details feed provides one
    pub coordinates: Option<Coordinates>,
}

impl RawMilestone {
    pub fn new(code: u32, date: Option<DateTime<Utc>>) -> Self {
        Self {
            code: Some(code),
            date,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Completed,
    Current,
    Upcoming,
}

/// A classified milestone on a shipment timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub code: Option<u32>,
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub location: String,
    pub status: MilestoneStatus,
    /// Synthesized to fill a missing canonical stop
    #[serde(default)]
    pub placeholder: bool,
}

/// A port, looked up or synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Coordinates are a hash-derived stand-in, not a real position
    #[serde(default)]
    pub synthesized: bool,
}

impl Port {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            code: None,
            coordinates,
            city: None,
            country: None,
            synthesized: false,
        }
    }
}

/// Origin, destination and intermediate ports of a voyage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePorts {
    pub origin: Option<Port>,
    pub destination: Option<Port>,
    #[serde(default)]
    pub transshipment: Vec<Port>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePointKind {
    Origin,
    Destination,
    Transshipment,
    SeaWaypoint,
    Vessel,
}

/// One vertex of a rendered path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub coordinates: Coordinates,
    pub kind: RoutePointKind,
    /// Index into the source polyline or milestone list; `None` when synthesized
    pub source_index: Option<usize>,
}

impl RoutePoint {
    pub fn new(coordinates: Coordinates, kind: RoutePointKind, source_index: Option<usize>) -> Self {
        Self {
            coordinates,
            kind,
            source_index,
        }
    }

    pub fn synthetic(coordinates: Coordinates) -> Self {
        Self::new(coordinates, RoutePointKind::SeaWaypoint, None)
    }
}

/// Live vessel report from the tracking feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselPosition {
    pub coordinates: Coordinates,
    pub vessel_name: Option<String>,
    pub vessel_imo: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Authoritative tracking data for one shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub shipment_id: Option<String>,
    pub order_number: Option<String>,
    pub status: Option<ShipmentStatus>,
    pub route_type: Option<String>,
    pub completed_route: Vec<Coordinates>,
    pub remaining_route: Vec<Coordinates>,
    pub current_position: Option<VesselPosition>,
    pub ports: RoutePorts,
}

/// Per-milestone details for one shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailsSnapshot {
    pub shipment_id: Option<String>,
    pub order_number: Option<String>,
    pub milestones: Vec<RawMilestone>,
}

/// Which tier produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    TrackingFeed,
    DetailsFeed,
    Calculated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegStyle {
    /// Drawn solid
    Reached,
    /// Drawn dashed
    NotYetReached,
}

/// Segment from a vessel still at origin back to the origin port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginLeg {
    pub from: Coordinates,
    pub to: Coordinates,
    pub style: LegStyle,
}

/// Vessel details carried through from the tracking feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselInfo {
    pub reported: Coordinates,
    pub vessel_name: Option<String>,
    pub vessel_imo: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The fused, render-ready route for one shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteModel {
    pub source: Option<RouteSource>,
    pub completed_segment: Vec<RoutePoint>,
    pub upcoming_segment: Vec<RoutePoint>,
    pub vessel_position: Option<Coordinates>,
    pub vessel: Option<VesselInfo>,
    pub ports: RoutePorts,
    pub origin_leg: Option<OriginLeg>,
    pub progress: f64,
}

impl RouteModel {
    /// Nothing to draw.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.completed_segment.is_empty() && self.upcoming_segment.is_empty()
    }

    /// Every vertex in draw order, without the duplicated split point.
    pub fn path(&self) -> Vec<Coordinates> {
        let mut out: Vec<Coordinates> = self
            .completed_segment
            .iter()
            .map(|point| point.coordinates)
            .collect();
        let skip = usize::from(
            !out.is_empty()
                && self.upcoming_segment.first().map(|p| p.coordinates) == out.last().copied(),
        );
        out.extend(
            self.upcoming_segment
                .iter()
                .skip(skip)
                .map(|point| point.coordinates),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_lenient() {
        assert_eq!(ShipmentStatus::parse("in_transit"), ShipmentStatus::InTransit);
        assert_eq!(ShipmentStatus::parse("In Transit"), ShipmentStatus::InTransit);
        assert_eq!(ShipmentStatus::parse(" DELIVERED "), ShipmentStatus::Delivered);
        assert_eq!(ShipmentStatus::parse("closed"), ShipmentStatus::Closed);
        assert_eq!(ShipmentStatus::parse("???"), ShipmentStatus::Pending);
        assert!(ShipmentStatus::Closed.is_finished());
        assert!(!ShipmentStatus::InTransit.is_finished());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(TransportMode::parse("Air"), TransportMode::Air);
        assert_eq!(TransportMode::parse("FCL"), TransportMode::Ocean);
        assert_eq!(TransportMode::parse("hovercraft"), TransportMode::Unknown);
    }

    #[test]
    fn coordinates_validate_bounds() {
        assert!(Coordinates::try_new(45.0, 90.0).is_ok());
        assert!(Coordinates::try_new(95.0, 0.0).is_err());
        assert!(Coordinates::try_new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn coordinates_accept_feed_field_names() {
        let c: Coordinates = serde_json::from_str(r#"{"latitude": 1.5, "longitude": 2.5}"#).unwrap();
        assert_eq!(c, Coordinates::new(1.5, 2.5));
    }

    #[test]
    fn shipment_matching_uses_id_or_order_number() {
        let mut shipment = Shipment::new("S1", ShipmentStatus::Pending);
        shipment.order_number = Some("PO-9".to_string());
        assert!(shipment.matches(Some("S1"), None));
        assert!(shipment.matches(Some("other"), Some("PO-9")));
        assert!(!shipment.matches(Some(""), Some("")));
        assert!(!shipment.matches(None, None));
    }

    #[test]
    fn path_skips_shared_split_point() {
        let a = RoutePoint::synthetic(Coordinates::new(0.0, 0.0));
        let b = RoutePoint::synthetic(Coordinates::new(1.0, 1.0));
        let c = RoutePoint::synthetic(Coordinates::new(2.0, 2.0));
        let model = RouteModel {
            completed_segment: vec![a, b],
            upcoming_segment: vec![b, c],
            ..RouteModel::empty()
        };
        assert_eq!(model.path().len(), 3);
        assert!(RouteModel::empty().is_empty());
    }
}
