//! CLI tool to rebuild remaining routes in a tracking feed.
//!
//! Reads the feed, regenerates `remaining_route` for records that need it and
//! prints the whole document. The input file is never modified.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use voyage_cli::{loader, logging, print_json, Config};
use voyage_core::{regenerate_document, CoordinateResolver};

/// Regenerate remaining routes from vessel positions to destination ports
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Tracking feed (default: $VOYAGE_DATA_DIR/tracking.json)
    #[arg(long)]
    tracking: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();
    logging::init(&config.log_filter, config.log_json);

    let path = config.data_file(args.tracking.as_deref(), "tracking.json");
    let mut document = loader::load_document(&path)?;
    let rewritten = regenerate_document(
        &mut document,
        &CoordinateResolver::with_cache(),
        &config.route_config()?,
    );
    tracing::info!("Regenerated {} remaining routes from {}", rewritten, path.display());

    print_json(&document, args.pretty)
}
