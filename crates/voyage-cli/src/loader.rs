//! Reads feed files into core types.
//!
//! The shipment list is required. Tracking and details feeds are optional:
//! a missing or malformed file is logged and read as an empty feed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use voyage_core::{
    parse_details, parse_shipments, parse_tracking, CoordinateResolver, DetailsSnapshot,
    Shipment, TrackingSnapshot, VoyageError,
};

pub fn load_shipments(path: &Path) -> Result<Vec<Shipment>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading shipments from {}", path.display()))?;
    let shipments = parse_shipments(&text)
        .with_context(|| format!("parsing shipments from {}", path.display()))?;
    tracing::info!("Loaded {} shipments from {}", shipments.len(), path.display());
    Ok(shipments)
}

pub fn load_tracking(path: Option<&Path>, resolver: &CoordinateResolver) -> Vec<TrackingSnapshot> {
    load_optional(path, "tracking", |text| parse_tracking(text, resolver))
}

pub fn load_details(path: Option<&Path>) -> Vec<DetailsSnapshot> {
    load_optional(path, "details", parse_details)
}

fn load_optional<T>(
    path: Option<&Path>,
    kind: &str,
    parse: impl FnOnce(&str) -> voyage_core::Result<Vec<T>>,
) -> Vec<T> {
    let Some(path) = path else {
        return Vec::new();
    };
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!("No {} feed at {}: {}", kind, path.display(), err);
            return Vec::new();
        }
    };
    match parse(&text) {
        Ok(items) => {
            tracing::info!("Loaded {} {} records from {}", items.len(), kind, path.display());
            items
        }
        Err(err) => {
            tracing::warn!("Ignoring malformed {} feed {}: {}", kind, path.display(), err);
            Vec::new()
        }
    }
}

/// Raw JSON document, kept as-is for in-place rewriting.
pub fn load_document(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Shipment by id, or by order number when no id matches.
pub fn find_shipment<'a>(
    shipments: &'a [Shipment],
    key: &str,
) -> voyage_core::Result<&'a Shipment> {
    shipments
        .iter()
        .find(|s| s.matches(Some(key), None))
        .or_else(|| shipments.iter().find(|s| s.matches(None, Some(key))))
        .ok_or_else(|| VoyageError::ShipmentNotFound(key.to_string()))
}
