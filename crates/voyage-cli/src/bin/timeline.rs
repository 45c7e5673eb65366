//! CLI tool to print a shipment's milestone timeline.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use voyage_cli::{loader, logging, print_json, Config};
use voyage_core::progress::last_reached_index;
use voyage_core::{classify, shipment_timeline, Milestone, ShipmentStatus};

/// Print the normalized milestone timeline and progress of one shipment
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Shipment list (default: $VOYAGE_DATA_DIR/shipments.json)
    #[arg(long)]
    shipments: Option<PathBuf>,

    /// Shipment id or order number
    #[arg(long)]
    shipment: String,

    /// Classify milestones as of this instant (RFC 3339)
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct TimelineReport<'a> {
    shipment_id: &'a str,
    status: ShipmentStatus,
    progress: f64,
    milestones: Vec<Milestone>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();
    logging::init(&config.log_filter, config.log_json);

    let shipments =
        loader::load_shipments(&config.data_file(args.shipments.as_deref(), "shipments.json"))?;
    let shipment = loader::find_shipment(&shipments, &args.shipment)?;
    let now = args.now.unwrap_or_else(Utc::now);

    let milestones = shipment_timeline(shipment, now);
    let progress = classify(shipment.status, last_reached_index(&milestones), milestones.len());
    print_json(
        &TimelineReport {
            shipment_id: &shipment.id,
            status: shipment.status,
            progress,
            milestones,
        },
        args.pretty,
    )
}
