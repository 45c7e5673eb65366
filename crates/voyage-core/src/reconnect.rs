//! Remaining-route regeneration for tracking records.
//!
//! Rebuilds a record's `remaining_route` from the vessel's reported position
//! to its destination port. For ships already under way the new route is
//! spliced onto the vessel through a point close to it on the first leg, so
//! the line leaves the marker instead of jumping to the next waypoint.

use serde_json::Value;

use crate::config::RouteConfig;
use crate::feeds::{document_records_mut, encode_route, PortRecord, TrackingRecord};
use crate::models::{Coordinates, ShipmentStatus, TrackingSnapshot};
use crate::resolver::CoordinateResolver;
use crate::spatial::{interpolate, nearest_point_index};
use crate::waypoints::synthesize;

/// Not yet departed, or under way with a traveled route to continue from.
pub fn needs_regeneration(snapshot: &TrackingSnapshot) -> bool {
    snapshot.completed_route.is_empty() || snapshot.status == Some(ShipmentStatus::InTransit)
}

/// `from`, any sea waypoints, then `to`.
pub fn generate_sea_route(from: Coordinates, to: Coordinates, config: &RouteConfig) -> Vec<Coordinates> {
    let mut route = vec![from];
    route.extend(synthesize(from, to, config).into_iter().map(|p| p.coordinates));
    route.push(to);
    route
}

/// Splice `current` onto `generated`.
///
/// The first leg is sampled at `dense_points` interior points; the one
/// closest to `current` replaces the leg's start.
pub fn reconnect_route(
    current: Coordinates,
    generated: &[Coordinates],
    dense_points: usize,
) -> Vec<Coordinates> {
    let mut route = vec![current];
    let [first, second, ..] = generated else {
        route.extend_from_slice(generated);
        return route;
    };

    let steps = (dense_points + 1) as f64;
    let dense: Vec<Coordinates> = (1..=dense_points)
        .map(|i| interpolate(*first, *second, i as f64 / steps))
        .collect();
    if let Some(index) = nearest_point_index(current, &dense) {
        route.push(dense[index]);
    }
    route.push(*second);
    route.extend_from_slice(&generated[2..]);
    route
}

/// Remaining route rebuilt from the reported position, if the record has one
/// and a real destination to head for. Hash stand-ins never end a route.
fn regenerated_route(snapshot: &TrackingSnapshot, config: &RouteConfig) -> Option<Vec<Coordinates>> {
    let current = snapshot.current_position.as_ref()?.coordinates;
    let destination = snapshot
        .ports
        .destination
        .as_ref()
        .filter(|port| !port.synthesized)?
        .coordinates;
    let generated = generate_sea_route(current, destination, config);

    let under_way = snapshot.status == Some(ShipmentStatus::InTransit)
        && !snapshot.completed_route.is_empty();
    if under_way {
        Some(reconnect_route(current, &generated, config.reconnect_dense_points))
    } else {
        Some(generated)
    }
}

/// Copy of `snapshot` with a regenerated `remaining_route`.
///
/// Without a current position or a destination the copy is unchanged.
pub fn regenerate_remaining_route(snapshot: &TrackingSnapshot, config: &RouteConfig) -> TrackingSnapshot {
    match regenerated_route(snapshot, config) {
        Some(remaining_route) => TrackingSnapshot {
            remaining_route,
            ..snapshot.clone()
        },
        None => snapshot.clone(),
    }
}

/// Rewrite `remaining_route` in every tracking record of a feed document
/// that needs it. Returns how many records were rewritten.
///
/// Records that fail to parse, or whose destination carries no coordinates
/// of its own, are left exactly as they were.
pub fn regenerate_document(
    document: &mut Value,
    resolver: &CoordinateResolver,
    config: &RouteConfig,
) -> usize {
    let mut rewritten = 0;
    for (index, record) in document_records_mut(document).into_iter().enumerate() {
        let parsed: TrackingRecord = match serde_json::from_value(record.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("Leaving tracking record {} untouched: {}", index, err);
                continue;
            }
        };
        let explicit_destination = parsed
            .route_info
            .destination
            .as_ref()
            .and_then(PortRecord::explicit_coordinates)
            .is_some();
        let snapshot = parsed.into_snapshot(resolver);
        let label = snapshot.shipment_id.clone().unwrap_or_else(|| format!("#{index}"));
        if !needs_regeneration(&snapshot) {
            tracing::debug!("Shipment {} keeps its remaining route", label);
            continue;
        }
        if !explicit_destination {
            tracing::debug!("Shipment {} has no destination coordinates", label);
            continue;
        }
        let Some(route) = regenerated_route(&snapshot, config) else {
            tracing::debug!("Shipment {} lacks a position or destination", label);
            continue;
        };
        let Some(fields) = record.as_object_mut() else {
            continue;
        };
        let coordinates = fields
            .entry("route_coordinates")
            .or_insert_with(|| Value::Object(Default::default()));
        if let Some(coordinates) = coordinates.as_object_mut() {
            coordinates.insert("remaining_route".to_string(), encode_route(&route));
            tracing::debug!("Shipment {}: {} remaining points", label, route.len());
            rewritten += 1;
        }
    }
    rewritten
}
