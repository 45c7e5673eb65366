pub mod config;
pub mod error;
pub mod feeds;
pub mod fusion;
pub mod milestones;
pub mod models;
pub mod ports;
pub mod progress;
pub mod reconnect;
pub mod resolver;
pub mod spatial;
pub mod waypoints;

pub use config::RouteConfig;
pub use error::{Result, VoyageError};
pub use feeds::{
    encode_route, find_details, find_tracking, parse_details, parse_milestone_date,
    parse_shipments, parse_tracking,
};
pub use fusion::{
    build_route_model, CalculatedProvider, DetailsFeedProvider, FusionContext, RouteFusion,
    RouteProvider, TrackingFeedProvider,
};
pub use milestones::{normalize_milestones, shipment_timeline};
pub use models::{
    Coordinates, DetailsSnapshot, LegStyle, Milestone, MilestoneStatus, OriginLeg, Port,
    RawMilestone, RouteModel, RoutePoint, RoutePointKind, RoutePorts, RouteSource, Shipment,
    ShipmentStatus, TrackingSnapshot, TransportMode, VesselInfo, VesselPosition,
};
pub use progress::{classify, compute_progress, status_milestone_index};
pub use reconnect::{
    generate_sea_route, needs_regeneration, reconnect_route, regenerate_document,
    regenerate_remaining_route,
};
pub use resolver::{resolve_coordinates, CoordinateCache, CoordinateResolver};
pub use spatial::{distance_km, haversine_distance};
pub use waypoints::{densify, synthesize};
