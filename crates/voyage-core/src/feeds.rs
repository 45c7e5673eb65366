//! External feed shapes and the ingestion boundary.
//!
//! Raw records mirror the JSON the data-access layer hands over, with every
//! field optional. Conversion into the typed models happens here and only
//! here: status strings become enums, date strings become timestamps, and
//! unusable values are dropped rather than reported.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, VoyageError};
use crate::models::{
    Coordinates, DetailsSnapshot, Port, RawMilestone, RoutePorts, Shipment, ShipmentStatus,
    TrackingSnapshot, TransportMode, VesselPosition,
};
use crate::resolver::CoordinateResolver;

/// Accepts a string, a number, or null.
fn lenient_string<'de, D>(deserializer: D) -> core::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a non-negative integer or a numeric string.
fn lenient_code<'de, D>(deserializer: D) -> core::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a number or a numeric string.
fn lenient_f64<'de, D>(deserializer: D) -> core::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Parse a milestone date. Anything unparseable is no date at all.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS[.f]`
/// (read as UTC) and bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_milestone_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ========== SHIPMENT LIST ==========

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentRecord {
    #[serde(alias = "shipment_id", deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(alias = "shipment_order_number", deserialize_with = "lenient_string")]
    pub order_number: Option<String>,
    #[serde(alias = "shipment_status", deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(
        alias = "transport_mode",
        alias = "shipment_mode",
        deserialize_with = "lenient_string"
    )]
    pub mode: Option<String>,
    #[serde(alias = "origin_location", deserialize_with = "lenient_string")]
    pub origin: Option<String>,
    #[serde(alias = "destination_location", deserialize_with = "lenient_string")]
    pub destination: Option<String>,
    #[serde(alias = "milestones")]
    pub shipment_milestones: Vec<MilestoneRecord>,
    pub packages: Vec<Value>,
    pub containers: Vec<ContainerRecord>,
    #[serde(alias = "creation_date", deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(
        alias = "estimated_delivery_date",
        alias = "eta",
        deserialize_with = "lenient_string"
    )]
    pub estimated_delivery: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerRecord {
    #[serde(alias = "number", deserialize_with = "lenient_string")]
    pub container_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub container_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(
        rename = "type",
        alias = "milestone_type",
        alias = "type_code",
        deserialize_with = "lenient_code"
    )]
    pub milestone_type: Option<u32>,
    #[serde(alias = "milestone_name", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(alias = "date", alias = "actual_date", deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(alias = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

impl From<MilestoneRecord> for RawMilestone {
    fn from(record: MilestoneRecord) -> Self {
        let coordinates = match (record.latitude, record.longitude) {
            (Some(lat), Some(lng)) => Coordinates::try_new(lat, lng).ok(),
            _ => None,
        };
        Self {
            id: record.id,
            code: record.milestone_type,
            name: record.name,
            date: record.start_date.as_deref().and_then(parse_milestone_date),
            location: record.location.filter(|loc| !loc.trim().is_empty()),
            coordinates,
        }
    }
}

impl TryFrom<ShipmentRecord> for Shipment {
    type Error = VoyageError;

    fn try_from(record: ShipmentRecord) -> Result<Self> {
        let id = record.id.ok_or(VoyageError::EmptyShipmentId)?;
        Ok(Self {
            id,
            order_number: record.order_number,
            status: record
                .status
                .as_deref()
                .map(ShipmentStatus::parse)
                .unwrap_or_default(),
            mode: record
                .mode
                .as_deref()
                .map(TransportMode::parse)
                .unwrap_or_default(),
            origin: record.origin.filter(|s| !s.trim().is_empty()),
            destination: record.destination.filter(|s| !s.trim().is_empty()),
            milestones: record
                .shipment_milestones
                .into_iter()
                .map(RawMilestone::from)
                .collect(),
            package_count: record.packages.len(),
            containers: record
                .containers
                .into_iter()
                .filter_map(|c| c.container_number)
                .collect(),
            created_at: record.created_at.as_deref().and_then(parse_milestone_date),
            estimated_delivery: record
                .estimated_delivery
                .as_deref()
                .and_then(parse_milestone_date),
        })
    }
}

// ========== TRACKING FEED ==========

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointRecord {
    #[serde(alias = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

impl PointRecord {
    fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::try_new(self.latitude?, self.longitude?).ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortRecord {
    #[serde(alias = "port_name", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(alias = "port_code", alias = "unlocode", deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country: Option<String>,
    pub coordinates: Option<PointRecord>,
    #[serde(alias = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

impl PortRecord {
    /// Coordinates given in the feed itself, nested or flat.
    pub fn explicit_coordinates(&self) -> Option<Coordinates> {
        self.coordinates
            .as_ref()
            .and_then(PointRecord::coordinates)
            .or_else(|| Coordinates::try_new(self.latitude?, self.longitude?).ok())
    }

    /// Typed port. Missing coordinates are resolved from the port's name.
    fn into_port(self, resolver: &CoordinateResolver) -> Option<Port> {
        let explicit = self.explicit_coordinates();

        let label = self
            .name
            .clone()
            .or_else(|| match (&self.city, &self.country) {
                (Some(city), Some(country)) => Some(format!("{city}, {country}")),
                (Some(city), None) => Some(city.clone()),
                _ => None,
            });

        let mut port = match (explicit, label) {
            (Some(coordinates), label) => Port::new(label.unwrap_or_default(), coordinates),
            (None, Some(label)) => {
                tracing::debug!("Tracking port {:?} has no coordinates, resolving", label);
                let resolved = resolver.resolve_port(&label);
                Port {
                    name: label,
                    ..resolved
                }
            }
            (None, None) => return None,
        };
        if self.code.is_some() {
            port.code = self.code;
        }
        if self.city.is_some() {
            port.city = self.city;
        }
        if self.country.is_some() {
            port.country = self.country;
        }
        Some(port)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteInfoRecord {
    pub origin: Option<PortRecord>,
    pub destination: Option<PortRecord>,
    pub transshipment_ports: Vec<PortRecord>,
    pub route_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteCoordinatesRecord {
    pub completed_route: Vec<PointRecord>,
    pub remaining_route: Vec<PointRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionRecord {
    #[serde(alias = "lat", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub vessel_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub vessel_imo: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub shipment_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub shipment_order_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub shipment_status: Option<String>,
    pub route_info: RouteInfoRecord,
    pub route_coordinates: RouteCoordinatesRecord,
    pub current_position: Option<PositionRecord>,
}

fn polyline(points: &[PointRecord], label: &str) -> Vec<Coordinates> {
    let out: Vec<Coordinates> = points.iter().filter_map(PointRecord::coordinates).collect();
    if out.len() != points.len() {
        tracing::debug!(
            "Dropped {} invalid points from {}",
            points.len() - out.len(),
            label
        );
    }
    out
}

impl TrackingRecord {
    pub fn into_snapshot(self, resolver: &CoordinateResolver) -> TrackingSnapshot {
        let current_position = self.current_position.and_then(|pos| {
            let coordinates = Coordinates::try_new(pos.latitude?, pos.longitude?).ok()?;
            Some(VesselPosition {
                coordinates,
                vessel_name: pos.vessel_name,
                vessel_imo: pos.vessel_imo,
                timestamp: pos.timestamp.as_deref().and_then(parse_milestone_date),
            })
        });

        let info = self.route_info;
        TrackingSnapshot {
            completed_route: polyline(&self.route_coordinates.completed_route, "completed_route"),
            remaining_route: polyline(&self.route_coordinates.remaining_route, "remaining_route"),
            shipment_id: self.shipment_id,
            order_number: self.shipment_order_number,
            status: self.shipment_status.as_deref().map(ShipmentStatus::parse),
            route_type: info.route_type,
            current_position,
            ports: RoutePorts {
                origin: info.origin.and_then(|p| p.into_port(resolver)),
                destination: info.destination.and_then(|p| p.into_port(resolver)),
                transshipment: info
                    .transshipment_ports
                    .into_iter()
                    .filter_map(|p| p.into_port(resolver))
                    .collect(),
            },
        }
    }
}

// ========== DETAILS FEED ==========

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailsRecord {
    #[serde(alias = "id", deserialize_with = "lenient_string")]
    pub shipment_id: Option<String>,
    #[serde(alias = "order_number", deserialize_with = "lenient_string")]
    pub shipment_order_number: Option<String>,
    #[serde(alias = "shipment_milestones")]
    pub milestones: Vec<MilestoneRecord>,
}

impl From<DetailsRecord> for DetailsSnapshot {
    fn from(record: DetailsRecord) -> Self {
        Self {
            shipment_id: record.shipment_id,
            order_number: record.shipment_order_number,
            milestones: record.milestones.into_iter().map(RawMilestone::from).collect(),
        }
    }
}

// ========== DOCUMENTS ==========

const RECORD_WRAPPERS: [&str; 3] = ["shipments", "data", "results"];

/// Split a feed document into its records.
///
/// Accepts a bare array, an object wrapping one under `shipments`/`data`,
/// or a single record object.
pub fn document_records(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapper = RECORD_WRAPPERS
                .into_iter()
                .find(|key| map.get(*key).is_some_and(Value::is_array));
            if let Some(Value::Array(items)) = wrapper.and_then(|key| map.remove(key)) {
                return items;
            }
            vec![Value::Object(map)]
        }
        _ => Vec::new(),
    }
}

/// In-place view of a feed document's records, same shapes as [`document_records`].
pub fn document_records_mut(document: &mut Value) -> Vec<&mut Value> {
    let wrapper = RECORD_WRAPPERS
        .into_iter()
        .find(|key| document.get(*key).is_some_and(Value::is_array));
    if let Some(key) = wrapper {
        return document
            .get_mut(key)
            .and_then(Value::as_array_mut)
            .map(|items| items.iter_mut().collect())
            .unwrap_or_default();
    }
    if document.is_object() {
        return vec![document];
    }
    document
        .as_array_mut()
        .map(|items| items.iter_mut().collect())
        .unwrap_or_default()
}

/// Deserialize each record on its own; bad records are logged and skipped.
pub fn parse_records<T: DeserializeOwned>(json: &str, kind: &str) -> Result<Vec<T>> {
    let document: Value = serde_json::from_str(json)?;
    let mut out = Vec::new();
    for (index, item) in document_records(document).into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => out.push(record),
            Err(err) => tracing::warn!("Skipping malformed {} record {}: {}", kind, index, err),
        }
    }
    Ok(out)
}

pub fn parse_shipments(json: &str) -> Result<Vec<Shipment>> {
    let records: Vec<ShipmentRecord> = parse_records(json, "shipment")?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match Shipment::try_from(record) {
            Ok(shipment) => Some(shipment),
            Err(err) => {
                tracing::warn!("Skipping shipment record {}: {}", index, err);
                None
            }
        })
        .collect())
}

pub fn parse_tracking(json: &str, resolver: &CoordinateResolver) -> Result<Vec<TrackingSnapshot>> {
    let records: Vec<TrackingRecord> = parse_records(json, "tracking")?;
    Ok(records
        .into_iter()
        .map(|record| record.into_snapshot(resolver))
        .collect())
}

pub fn parse_details(json: &str) -> Result<Vec<DetailsSnapshot>> {
    let records: Vec<DetailsRecord> = parse_records(json, "details")?;
    Ok(records.into_iter().map(DetailsSnapshot::from).collect())
}

/// Feed entry for a shipment: id match first, then order number.
fn find_for<'a, T>(
    items: &'a [T],
    shipment: &Shipment,
    keys: impl Fn(&T) -> (Option<&str>, Option<&str>),
) -> Option<&'a T> {
    items
        .iter()
        .find(|item| shipment.matches(keys(item).0, None))
        .or_else(|| items.iter().find(|item| shipment.matches(None, keys(item).1)))
}

pub fn find_tracking<'a>(
    feeds: &'a [TrackingSnapshot],
    shipment: &Shipment,
) -> Option<&'a TrackingSnapshot> {
    find_for(feeds, shipment, |t| {
        (t.shipment_id.as_deref(), t.order_number.as_deref())
    })
}

pub fn find_details<'a>(
    feeds: &'a [DetailsSnapshot],
    shipment: &Shipment,
) -> Option<&'a DetailsSnapshot> {
    find_for(feeds, shipment, |d| {
        (d.shipment_id.as_deref(), d.order_number.as_deref())
    })
}

/// Serialize a polyline the way the tracking feed stores it.
pub fn encode_route(points: &[Coordinates]) -> Value {
    Value::Array(
        points
            .iter()
            .map(|p| serde_json::json!({ "latitude": p.lat, "longitude": p.lng }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn date_formats() {
        let rfc = parse_milestone_date("2024-03-05T10:30:00+02:00").unwrap();
        assert_eq!(rfc.hour(), 8);
        let spaced = parse_milestone_date("2024-03-05 10:30:00").unwrap();
        assert_eq!(spaced.hour(), 10);
        let bare = parse_milestone_date("2024-03-05").unwrap();
        assert_eq!((bare.year(), bare.month(), bare.day()), (2024, 3, 5));
        assert!(parse_milestone_date("T+3 days").is_none());
        assert!(parse_milestone_date("").is_none());
        assert!(parse_milestone_date("2024-13-45").is_none());
    }

    #[test]
    fn shipment_record_converts_once() {
        let record: ShipmentRecord = serde_json::from_value(json!({
            "shipment_id": 1042,
            "shipment_order_number": "PO-1042",
            "shipment_status": "In Transit",
            "mode": "Ocean",
            "origin": "Shanghai, China",
            "destination": "Rotterdam, Netherlands",
            "shipment_milestones": [
                {"type": 0, "start_date": "2024-01-02"},
                {"type": "1", "start_date": "not a date"}
            ],
            "packages": [{}, {}],
            "containers": [{"container_number": "MSCU1234567"}]
        }))
        .unwrap();
        let shipment = Shipment::try_from(record).unwrap();
        assert_eq!(shipment.id, "1042");
        assert_eq!(shipment.status, ShipmentStatus::InTransit);
        assert_eq!(shipment.mode, TransportMode::Ocean);
        assert_eq!(shipment.milestones.len(), 2);
        assert!(shipment.milestones[0].date.is_some());
        assert_eq!(shipment.milestones[1].code, Some(1));
        assert!(shipment.milestones[1].date.is_none());
        assert_eq!(shipment.package_count, 2);
        assert_eq!(shipment.containers, vec!["MSCU1234567".to_string()]);
    }

    #[test]
    fn shipment_without_id_is_rejected() {
        let err = Shipment::try_from(ShipmentRecord::default()).unwrap_err();
        assert!(matches!(err, VoyageError::EmptyShipmentId));
    }

    #[test]
    fn bad_records_are_skipped() {
        let json = r#"{"shipments": [
            {"shipment_id": "A", "shipment_status": "pending"},
            {"shipment_id": "B", "shipment_milestones": "oops"},
            {"shipment_status": "delivered"}
        ]}"#;
        let shipments = parse_shipments(json).unwrap();
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0].id, "A");
    }

    #[test]
    fn wrongly_typed_fields_do_not_drop_the_shipment() {
        let json = json!([{
            "shipment_id": "S7",
            "shipment_status": "in_transit",
            "origin": "Shanghai, China",
            "destination": 404,
            "created_at": 1714521600,
            "shipment_milestones": [
                {"type": 0, "start_date": 20240501, "name": 7, "location": null},
                {"type": 1, "start_date": "2024-05-03"}
            ]
        }])
        .to_string();
        let shipments = parse_shipments(&json).unwrap();
        assert_eq!(shipments.len(), 1);
        let shipment = &shipments[0];
        assert_eq!(shipment.milestones.len(), 2);
        assert!(shipment.milestones[0].date.is_none());
        assert_eq!(shipment.milestones[0].name.as_deref(), Some("7"));
        assert!(shipment.milestones[1].date.is_some());
        assert!(shipment.created_at.is_none());
    }

    #[test]
    fn single_record_keeps_scalar_wrapper_named_fields() {
        let document = json!({"shipment_id": "S1", "data": "opaque", "results": 3});
        let records = document_records(document.clone());
        assert_eq!(records, vec![document]);

        let wrapped = document_records(json!({"data": "x", "results": [{"id": 1}]}));
        assert_eq!(wrapped, vec![json!({"id": 1})]);
    }

    #[test]
    fn explicit_port_coordinates_are_told_apart() {
        let nested: PortRecord = serde_json::from_value(json!({
            "name": "Busan",
            "coordinates": {"latitude": 35.1, "longitude": 129.04}
        }))
        .unwrap();
        assert_eq!(nested.explicit_coordinates(), Some(Coordinates::new(35.1, 129.04)));
        let named: PortRecord = serde_json::from_value(json!({"name": "Busan"})).unwrap();
        assert!(named.explicit_coordinates().is_none());
    }

    #[test]
    fn document_level_garbage_is_an_error() {
        assert!(parse_shipments("not json").is_err());
    }

    #[test]
    fn tracking_record_to_snapshot() {
        let json = json!([{
            "shipment_id": "S1",
            "shipment_status": "in_transit",
            "route_info": {
                "origin": {"name": "Shanghai", "coordinates": {"latitude": 31.23, "longitude": 121.47}},
                "destination": {"name": "Los Angeles, USA"},
                "transshipment_ports": [{"name": "Busan", "latitude": 35.1, "longitude": 129.04}],
                "route_type": "sea"
            },
            "route_coordinates": {
                "completed_route": [{"latitude": 31.0, "longitude": 122.0}, {"latitude": 999.0, "longitude": 0.0}],
                "remaining_route": [{"latitude": 30.0, "longitude": 130.0}]
            },
            "current_position": {"latitude": 30.5, "longitude": 125.0, "vessel_name": "EVER GIVEN", "vessel_imo": 9811000, "timestamp": "2024-05-01T00:00:00Z"}
        }])
        .to_string();
        let resolver = CoordinateResolver::new();
        let feeds = parse_tracking(&json, &resolver).unwrap();
        let snapshot = &feeds[0];
        assert_eq!(snapshot.status, Some(ShipmentStatus::InTransit));
        assert_eq!(snapshot.completed_route.len(), 1);
        assert_eq!(snapshot.remaining_route.len(), 1);
        let position = snapshot.current_position.as_ref().unwrap();
        assert_eq!(position.vessel_imo.as_deref(), Some("9811000"));
        assert!(position.timestamp.is_some());

        let origin = snapshot.ports.origin.as_ref().unwrap();
        assert_eq!(origin.coordinates, Coordinates::new(31.23, 121.47));
        // Destination had no coordinates: resolved from its name
        let destination = snapshot.ports.destination.as_ref().unwrap();
        assert_eq!(destination.coordinates, Coordinates::new(33.7405, -118.2775));
        assert_eq!(destination.name, "Los Angeles, USA");
        assert_eq!(snapshot.ports.transshipment.len(), 1);
    }

    #[test]
    fn details_milestones_keep_explicit_coordinates() {
        let json = json!({"data": [{
            "shipment_id": "S1",
            "milestones": [
                {"type": 0, "latitude": "31.2", "longitude": "121.5"},
                {"type": 1, "latitude": 31.2}
            ]
        }]})
        .to_string();
        let details = parse_details(&json).unwrap();
        let milestones = &details[0].milestones;
        assert_eq!(milestones[0].coordinates, Some(Coordinates::new(31.2, 121.5)));
        assert_eq!(milestones[1].coordinates, None);
    }

    #[test]
    fn lookup_prefers_id_over_order_number() {
        let mut shipment = Shipment::new("S1", ShipmentStatus::Pending);
        shipment.order_number = Some("PO-1".to_string());
        let by_order = TrackingSnapshot {
            order_number: Some("PO-1".to_string()),
            ..TrackingSnapshot::default()
        };
        let by_id = TrackingSnapshot {
            shipment_id: Some("S1".to_string()),
            ..TrackingSnapshot::default()
        };
        let feeds = vec![by_order, by_id.clone()];
        assert_eq!(find_tracking(&feeds, &shipment), Some(&by_id));
        assert!(find_tracking(&feeds[..1], &shipment).is_some());
        assert!(find_details(&[], &shipment).is_none());
    }

    #[test]
    fn encoded_route_uses_feed_field_names() {
        let value = encode_route(&[Coordinates::new(1.0, 2.0)]);
        assert_eq!(value, json!([{"latitude": 1.0, "longitude": 2.0}]));
    }
}
