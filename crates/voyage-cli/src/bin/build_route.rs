//! CLI tool to fuse shipment feeds into render-ready route models.
//!
//! Prints one route model, or a map of shipment id to route model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use voyage_cli::{loader, logging, print_json, Config};
use voyage_core::{find_details, find_tracking, CoordinateResolver, RouteFusion, RouteModel, Shipment};

/// Build route models from shipment, tracking and details feeds
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Shipment list (default: $VOYAGE_DATA_DIR/shipments.json)
    #[arg(long)]
    shipments: Option<PathBuf>,

    /// Tracking feed (default: $VOYAGE_DATA_DIR/tracking.json)
    #[arg(long)]
    tracking: Option<PathBuf>,

    /// Details feed (default: $VOYAGE_DATA_DIR/details.json)
    #[arg(long)]
    details: Option<PathBuf>,

    /// Only this shipment, by id or order number
    #[arg(long)]
    shipment: Option<String>,

    /// Classify milestones as of this instant (RFC 3339)
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();
    logging::init(&config.log_filter, config.log_json);

    let fusion = RouteFusion::new(CoordinateResolver::with_cache(), config.route_config()?);
    let shipments =
        loader::load_shipments(&config.data_file(args.shipments.as_deref(), "shipments.json"))?;
    let tracking_path = config.data_file(args.tracking.as_deref(), "tracking.json");
    let tracking = loader::load_tracking(Some(&tracking_path), fusion.resolver());
    let details_path = config.data_file(args.details.as_deref(), "details.json");
    let details = loader::load_details(Some(&details_path));
    let now = args.now.unwrap_or_else(Utc::now);

    let route_for = |shipment: &Shipment| -> RouteModel {
        fusion.fuse(
            shipment,
            find_tracking(&tracking, shipment),
            find_details(&details, shipment),
            now,
        )
    };

    match &args.shipment {
        Some(key) => {
            let shipment = loader::find_shipment(&shipments, key)?;
            print_json(&route_for(shipment), args.pretty)
        }
        None => {
            let routes: BTreeMap<&str, RouteModel> = shipments
                .iter()
                .map(|shipment| (shipment.id.as_str(), route_for(shipment)))
                .collect();
            let empty = routes.values().filter(|route| route.is_empty()).count();
            tracing::info!("Built {} routes ({} with nothing to draw)", routes.len(), empty);
            print_json(&routes, args.pretty)
        }
    }
}
