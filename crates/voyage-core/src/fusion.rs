//! Route fusion: one render-ready route per shipment.
//!
//! Sources are tried in priority order and the first one that yields a
//! drawable path wins. The tracking feed comes first, then details-feed
//! milestones, then a route calculated from the shipment's origin and
//! destination text. Lower tiers are never consulted once a higher tier
//! succeeds.

use chrono::{DateTime, Utc};

use crate::config::RouteConfig;
use crate::milestones::{anchor_location, classify_dates, shipment_timeline, IN_TRANSIT_LABEL};
use crate::models::{
    Coordinates, DetailsSnapshot, LegStyle, OriginLeg, Port, RawMilestone, RouteModel,
    RoutePoint, RoutePointKind, RoutePorts, RouteSource, Shipment, ShipmentStatus,
    TrackingSnapshot, VesselInfo, VesselPosition,
};
use crate::progress::{classify, last_reached_in, last_reached_index, status_milestone_index};
use crate::resolver::CoordinateResolver;
use crate::spatial::{degree_distance, distance_km, nearest_point_index, within_tolerance};
use crate::waypoints::{densify, synthesize};

/// Everything a provider may draw on for one shipment.
pub struct FusionContext<'a> {
    pub shipment: &'a Shipment,
    pub tracking: Option<&'a TrackingSnapshot>,
    pub details: Option<&'a DetailsSnapshot>,
    pub resolver: &'a CoordinateResolver,
    pub config: &'a RouteConfig,
    pub now: DateTime<Utc>,
}

impl FusionContext<'_> {
    /// The tracking feed's status when it reports one, else the shipment's.
    pub fn status(&self) -> ShipmentStatus {
        self.tracking
            .and_then(|feed| feed.status)
            .unwrap_or(self.shipment.status)
    }

    fn origin_text(&self) -> &str {
        self.shipment.origin.as_deref().unwrap_or_default()
    }

    fn destination_text(&self) -> &str {
        self.shipment.destination.as_deref().unwrap_or_default()
    }
}

/// One source of route geometry.
pub trait RouteProvider: Send + Sync {
    fn source(&self) -> RouteSource;

    /// `None` when the source has nothing usable for this shipment.
    fn provide(&self, ctx: &FusionContext<'_>) -> Option<RouteModel>;
}

/// Fuses the available sources into a [`RouteModel`].
pub struct RouteFusion {
    resolver: CoordinateResolver,
    config: RouteConfig,
    providers: Vec<Box<dyn RouteProvider>>,
}

impl Default for RouteFusion {
    fn default() -> Self {
        Self::new(CoordinateResolver::with_cache(), RouteConfig::default())
    }
}

impl RouteFusion {
    /// Fusion over the standard three tiers.
    pub fn new(resolver: CoordinateResolver, config: RouteConfig) -> Self {
        Self {
            resolver,
            config,
            providers: default_providers(),
        }
    }

    /// Replace the provider chain. Order is priority order.
    pub fn with_providers(mut self, providers: Vec<Box<dyn RouteProvider>>) -> Self {
        self.providers = providers;
        self
    }

    pub fn resolver(&self) -> &CoordinateResolver {
        &self.resolver
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Best available route for `shipment`, or an empty model.
    pub fn fuse(
        &self,
        shipment: &Shipment,
        tracking: Option<&TrackingSnapshot>,
        details: Option<&DetailsSnapshot>,
        now: DateTime<Utc>,
    ) -> RouteModel {
        let ctx = FusionContext {
            shipment,
            tracking,
            details,
            resolver: &self.resolver,
            config: &self.config,
            now,
        };

        let timeline = shipment_timeline(shipment, now);
        let progress = classify(ctx.status(), last_reached_index(&timeline), timeline.len());

        for provider in &self.providers {
            let source = provider.source();
            match provider.provide(&ctx) {
                Some(mut model) if model.path().len() >= 2 => {
                    tracing::debug!(
                        "Shipment {} routed from {:?}: {} completed, {} upcoming points",
                        shipment.id,
                        source,
                        model.completed_segment.len(),
                        model.upcoming_segment.len()
                    );
                    model.source = Some(source);
                    model.progress = progress;
                    return model;
                }
                Some(_) => {
                    tracing::debug!(
                        "{:?} gave shipment {} fewer than two points",
                        source,
                        shipment.id
                    );
                }
                None => {
                    tracing::debug!("No {:?} route for shipment {}", source, shipment.id);
                }
            }
        }

        tracing::debug!("No drawable route for shipment {}", shipment.id);
        RouteModel::empty()
    }
}

/// Fuse with default settings as of now.
pub fn build_route_model(
    shipment: &Shipment,
    tracking: Option<&TrackingSnapshot>,
    details: Option<&DetailsSnapshot>,
) -> RouteModel {
    RouteFusion::default().fuse(shipment, tracking, details, Utc::now())
}

pub fn default_providers() -> Vec<Box<dyn RouteProvider>> {
    vec![
        Box::new(TrackingFeedProvider),
        Box::new(DetailsFeedProvider),
        Box::new(CalculatedProvider),
    ]
}

// ========== TRACKING FEED ==========

/// Completed and remaining polylines from the tracking feed.
pub struct TrackingFeedProvider;

impl RouteProvider for TrackingFeedProvider {
    fn source(&self) -> RouteSource {
        RouteSource::TrackingFeed
    }

    fn provide(&self, ctx: &FusionContext<'_>) -> Option<RouteModel> {
        let feed = ctx.tracking?;
        let completed = &feed.completed_route;
        let remaining = &feed.remaining_route;
        if completed.is_empty() && remaining.is_empty() {
            return None;
        }

        let tolerance = ctx.config.dedupe_tolerance_deg;
        let kinds = PortKinds {
            ports: &feed.ports,
            tolerance,
        };
        let reported = feed.current_position.as_ref().map(|pos| pos.coordinates);
        let (vessel, tail_start) = snap_vessel(completed, remaining, reported, ctx.status())?;

        let mut completed_segment: Vec<RoutePoint> = completed
            .iter()
            .enumerate()
            .map(|(i, c)| RoutePoint::new(*c, kinds.kind_of(*c), Some(i)))
            .collect();
        // Remaining points before the snapped vessel have been passed
        for (i, c) in remaining.iter().enumerate().take(tail_start) {
            completed_segment.push(RoutePoint::new(*c, kinds.kind_of(*c), Some(i)));
        }

        let mut upcoming_segment = vec![RoutePoint::new(vessel, RoutePointKind::Vessel, None)];
        for (i, c) in remaining.iter().enumerate().skip(tail_start) {
            push_distinct(
                &mut upcoming_segment,
                RoutePoint::new(*c, kinds.kind_of(*c), Some(i)),
                tolerance,
            );
        }
        if let Some(destination) = &feed.ports.destination {
            push_distinct(
                &mut upcoming_segment,
                RoutePoint::new(destination.coordinates, RoutePointKind::Destination, None),
                tolerance,
            );
        }

        let origin_leg = match (&feed.ports.origin, reported) {
            (Some(origin), Some(_)) if completed.is_empty() => {
                Some(origin_leg(vessel, origin, ctx.config))
            }
            _ => None,
        };

        Some(RouteModel {
            completed_segment,
            upcoming_segment,
            vessel_position: Some(vessel),
            vessel: feed.current_position.as_ref().map(vessel_info),
            ports: feed.ports.clone(),
            origin_leg,
            ..RouteModel::empty()
        })
    }
}

/// Vessel marker position and where the upcoming tail resumes in `remaining`.
///
/// Nothing traveled yet: the first remaining point. Nothing left or voyage
/// over: the last traveled point. Otherwise the remaining point nearest the
/// reported position, so the marker always sits on the drawn line.
fn snap_vessel(
    completed: &[Coordinates],
    remaining: &[Coordinates],
    reported: Option<Coordinates>,
    status: ShipmentStatus,
) -> Option<(Coordinates, usize)> {
    let Some(last_traveled) = completed.last().copied() else {
        return remaining.first().map(|first| (*first, 0));
    };
    if remaining.is_empty() || status.is_finished() {
        return Some((last_traveled, 0));
    }
    match reported.and_then(|pos| nearest_point_index(pos, remaining)) {
        Some(index) => Some((remaining[index], index)),
        None => Some((last_traveled, 0)),
    }
}

fn origin_leg(vessel: Coordinates, origin: &Port, config: &RouteConfig) -> OriginLeg {
    let style = if distance_km(vessel, origin.coordinates) < config.origin_reached_tolerance_km() {
        LegStyle::Reached
    } else {
        LegStyle::NotYetReached
    };
    OriginLeg {
        from: vessel,
        to: origin.coordinates,
        style,
    }
}

fn vessel_info(position: &VesselPosition) -> VesselInfo {
    VesselInfo {
        reported: position.coordinates,
        vessel_name: position.vessel_name.clone(),
        vessel_imo: position.vessel_imo.clone(),
        timestamp: position.timestamp,
    }
}

/// Labels polyline vertices that coincide with a known port.
struct PortKinds<'a> {
    ports: &'a RoutePorts,
    tolerance: f64,
}

impl PortKinds<'_> {
    fn kind_of(&self, point: Coordinates) -> RoutePointKind {
        let near = |port: &Port| within_tolerance(point, port.coordinates, self.tolerance);
        if self.ports.origin.as_ref().is_some_and(near) {
            RoutePointKind::Origin
        } else if self.ports.destination.as_ref().is_some_and(near) {
            RoutePointKind::Destination
        } else if self.ports.transshipment.iter().any(near) {
            RoutePointKind::Transshipment
        } else {
            RoutePointKind::SeaWaypoint
        }
    }
}

/// Append unless it duplicates the current last point.
fn push_distinct(points: &mut Vec<RoutePoint>, point: RoutePoint, tolerance: f64) {
    let duplicate = points
        .last()
        .is_some_and(|last| within_tolerance(last.coordinates, point.coordinates, tolerance));
    if !duplicate {
        points.push(point);
    }
}

// ========== DETAILS FEED ==========

/// Milestone positions from the details feed, joined by sea waypoints.
pub struct DetailsFeedProvider;

impl RouteProvider for DetailsFeedProvider {
    fn source(&self) -> RouteSource {
        RouteSource::DetailsFeed
    }

    fn provide(&self, ctx: &FusionContext<'_>) -> Option<RouteModel> {
        let details = ctx.details?;

        let mut ordered: Vec<(usize, &RawMilestone)> = details.milestones.iter().enumerate().collect();
        // Stable: undated milestones keep feed order after the dated ones
        ordered.sort_by_key(|(_, milestone)| (milestone.date.is_none(), milestone.date));

        let tolerance = ctx.config.dedupe_tolerance_deg;
        let mut stops: Vec<RoutePoint> = Vec::new();
        let mut dates = Vec::new();
        // For each usable milestone, the stop it landed on after de-duplication
        let mut stop_of = Vec::new();
        for (index, milestone) in ordered {
            let Some(position) = milestone_position(ctx, milestone) else {
                continue;
            };
            dates.push(milestone.date);
            push_distinct(
                &mut stops,
                RoutePoint::new(position, RoutePointKind::Transshipment, Some(index)),
                tolerance,
            );
            stop_of.push(stops.len() - 1);
        }
        if stops.len() < 2 {
            return None;
        }
        if let Some(first) = stops.first_mut() {
            first.kind = RoutePointKind::Origin;
        }
        if let Some(last) = stops.last_mut() {
            last.kind = RoutePointKind::Destination;
        }

        let statuses = classify_dates(&dates, ctx.now);
        let reached = last_reached_in(&statuses).unwrap_or(0);
        let anchor = stops[stop_of[reached]];

        let path = densify(&stops, ctx.config);
        let split = path
            .iter()
            .position(|point| point.source_index.is_some() && point.source_index == anchor.source_index)
            .unwrap_or(0);

        let ports = RoutePorts {
            origin: ctx.shipment.origin.as_deref().map(|text| ctx.resolver.resolve_port(text)),
            destination: ctx
                .shipment
                .destination
                .as_deref()
                .map(|text| ctx.resolver.resolve_port(text)),
            transshipment: Vec::new(),
        };
        Some(split_model(&path, split, ports))
    }
}

/// Explicit position, else the resolved anchor location.
///
/// Milestones anchored nowhere in particular have no usable position.
fn milestone_position(ctx: &FusionContext<'_>, milestone: &RawMilestone) -> Option<Coordinates> {
    if let Some(coordinates) = milestone.coordinates {
        return Some(coordinates);
    }
    let location = anchor_location(
        milestone.code,
        milestone.location.as_deref(),
        ctx.origin_text(),
        ctx.destination_text(),
    );
    if location.trim().is_empty() || location == IN_TRANSIT_LABEL {
        return None;
    }
    Some(ctx.resolver.resolve(&location))
}

// ========== CALCULATED ==========

/// Straight-line voyage between the resolved origin and destination.
pub struct CalculatedProvider;

impl RouteProvider for CalculatedProvider {
    fn source(&self) -> RouteSource {
        RouteSource::Calculated
    }

    fn provide(&self, ctx: &FusionContext<'_>) -> Option<RouteModel> {
        let origin_text = ctx.shipment.origin.as_deref().filter(|t| !t.trim().is_empty())?;
        let destination_text = ctx
            .shipment
            .destination
            .as_deref()
            .filter(|t| !t.trim().is_empty())?;

        let origin_port = ctx.resolver.resolve_port(origin_text);
        let destination_port = ctx.resolver.resolve_port(destination_text);
        let origin = origin_port.coordinates;
        let destination = destination_port.coordinates;
        let origin_coast = ctx.resolver.coastal_point(origin_text);
        let destination_coast = ctx.resolver.coastal_point(destination_text);
        let min_offset = ctx.config.coastal_min_offset_deg;

        let mut path = vec![RoutePoint::new(origin, RoutePointKind::Origin, None)];
        if degree_distance(origin, origin_coast) >= min_offset {
            path.push(RoutePoint::synthetic(origin_coast));
        }
        path.extend(synthesize(origin_coast, destination_coast, ctx.config));
        if degree_distance(destination, destination_coast) >= min_offset {
            path.push(RoutePoint::synthetic(destination_coast));
        }
        path.push(RoutePoint::new(destination, RoutePointKind::Destination, None));

        let split = status_milestone_index(ctx.status(), path.len());
        let ports = RoutePorts {
            origin: Some(origin_port),
            destination: Some(destination_port),
            transshipment: Vec::new(),
        };
        Some(split_model(&path, split, ports))
    }
}

/// Cut `path` at `split`; the split point ends one segment and starts the other.
fn split_model(path: &[RoutePoint], split: usize, ports: RoutePorts) -> RouteModel {
    let split = split.min(path.len().saturating_sub(1));
    let Some(at) = path.get(split) else {
        return RouteModel::empty();
    };
    RouteModel {
        completed_segment: path[..=split].to_vec(),
        upcoming_segment: path[split..].to_vec(),
        vessel_position: Some(at.coordinates),
        ports,
        ..RouteModel::empty()
    }
}
