//! Free-text location → coordinate resolution.
//!
//! Lookup is tiered: exact port, partial port, country centre, and finally a
//! hash-derived pseudo-coordinate. Every input resolves to something, and the
//! same input always resolves to the same point.

use dashmap::DashMap;

use crate::models::{Coordinates, Port};
use crate::ports::{self, CountryEntry, PortEntry, COUNTRY_CENTERS, PORTS};

/// Hash fallback latitude band, kept away from the poles.
const HASH_LAT_MIN: f64 = -60.0;
const HASH_LAT_SPAN: f64 = 120.0;
const HASH_LNG_MIN: f64 = -170.0;
const HASH_LNG_SPAN: f64 = 340.0;

/// Canonical form of a location string: trimmed, uppercase, single spaces.
///
/// All table lookups and cache keys go through this.
pub fn normalize_location(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Trailing comma segment of a normalized location, read as a country.
fn trailing_segment(key: &str) -> &str {
    key.rsplit(',').next().unwrap_or(key).trim()
}

/// Memoized resolutions keyed by normalized location.
///
/// Resolution is pure, so entries never go stale and need no eviction.
#[derive(Debug, Default)]
pub struct CoordinateCache {
    entries: DashMap<String, Port>,
}

impl CoordinateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Port> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: String, port: Port) {
        self.entries.insert(key, port);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// Resolves location text against the static port and country tables.
#[derive(Debug, Default)]
pub struct CoordinateResolver {
    cache: Option<CoordinateCache>,
}

impl CoordinateResolver {
    /// Resolver without memoization.
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// Resolver that memoizes every resolution for its own lifetime.
    pub fn with_cache() -> Self {
        Self {
            cache: Some(CoordinateCache::new()),
        }
    }

    pub fn cache(&self) -> Option<&CoordinateCache> {
        self.cache.as_ref()
    }

    /// Coordinates for a location string. Never fails.
    pub fn resolve(&self, text: &str) -> Coordinates {
        self.resolve_port(text).coordinates
    }

    /// Full port record for a location string. Never fails.
    pub fn resolve_port(&self, text: &str) -> Port {
        let key = normalize_location(text);
        if let Some(port) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            return port;
        }
        let port = lookup(text.trim(), &key);
        if let Some(cache) = &self.cache {
            cache.insert(key, port.clone());
        }
        port
    }

    /// Major-port stand-in for the country a location names.
    ///
    /// Falls back to the location's own resolved coordinate.
    pub fn coastal_point(&self, text: &str) -> Coordinates {
        let key = normalize_location(text);
        let segment = trailing_segment(&key);
        match_country(segment)
            .and_then(|country| ports::major_port_for(country.name))
            .map(|entry| Coordinates::new(entry.lat, entry.lng))
            .unwrap_or_else(|| self.resolve(text))
    }
}

/// One-off resolution with no cache.
pub fn resolve_coordinates(text: &str) -> Coordinates {
    CoordinateResolver::new().resolve(text)
}

fn lookup(label: &str, key: &str) -> Port {
    if let Some(entry) = ports::find_port(key) {
        return port_from_entry(entry);
    }

    if !key.is_empty() {
        if let Some(entry) = PORTS.iter().find(|entry| {
            let city = entry.city();
            key.contains(city) || city.contains(key)
        }) {
            return port_from_entry(entry);
        }
    }

    let segment = trailing_segment(key);
    if let Some(country) = match_country(segment) {
        tracing::debug!("Resolved {:?} to centre of {}", label, country.name);
        let mut port = Port::new(label, Coordinates::new(country.lat, country.lng));
        port.country = Some(country.name.to_string());
        return port;
    }

    tracing::debug!("No table match for {:?}, using hash fallback", label);
    let mut port = Port::new(label, hash_coordinates(key));
    port.synthesized = true;
    port
}

fn match_country(segment: &str) -> Option<&'static CountryEntry> {
    if segment.is_empty() {
        return None;
    }
    ports::find_country(segment).or_else(|| {
        COUNTRY_CENTERS
            .iter()
            .find(|entry| segment.contains(entry.name) || entry.name.contains(segment))
    })
}

fn port_from_entry(entry: &PortEntry) -> Port {
    Port {
        name: entry.key.to_string(),
        code: entry.code.map(str::to_string),
        coordinates: Coordinates::new(entry.lat, entry.lng),
        city: Some(entry.city().to_string()),
        country: entry.country().map(str::to_string),
        synthesized: false,
    }
}

/// 32-bit rolling hash (`h * 31 + unit`, wrapping) over UTF-16 code units.
pub fn location_hash(key: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in key.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash as u32
}

/// Deterministic pseudo-coordinate in lat [-60, 60), lng [-170, 170).
///
/// Latitude comes from the low 16 bits of the hash, longitude from the high 16.
pub fn hash_coordinates(key: &str) -> Coordinates {
    let hash = location_hash(key);
    let low = f64::from(hash & 0xFFFF) / 65536.0;
    let high = f64::from(hash >> 16) / 65536.0;
    Coordinates::new(
        HASH_LAT_MIN + low * HASH_LAT_SPAN,
        HASH_LNG_MIN + high * HASH_LNG_SPAN,
    )
}
