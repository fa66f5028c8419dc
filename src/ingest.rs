//! Sheet-export ingestion adapter.
//!
//! Reads the location directory and movement batch from CSV exports or a
//! JSON snapshot (keyed on file extension) and normalizes them into the
//! core record types. This is the only layer that surfaces errors; the
//! analytics core never sees a file path.
//!
//! Normalization responsibilities:
//! - ID trimming; rows without an ID are dropped with a warning
//! - warehouse-name canonicalization through the injected alias map
//! - region inference from coordinates when the region column is blank
//! - timestamp normalization to canonical ISO-8601, with the epoch sentinel
//!   for unparseable cells
//! - numeric coercion for distance and coordinates (invalid -> 0.0)

use crate::aliases::{canonical_name, WAREHOUSE_ALIASES};
use crate::models::{Location, LocationType, Movement, MovementType, Region};
use crate::timestamp::{TimestampParser, SENTINEL};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// A fully ingested data load: the directory plus the movement batch.
pub struct DataSet {
    pub locations: Vec<Location>,
    pub movements: Vec<Movement>,
}

/// Raw directory row as exported, everything a string cell.
#[derive(Debug, Default, Deserialize)]
struct RawLocation {
    #[serde(rename = "Location_ID", default)]
    location_id: String,
    #[serde(rename = "Location_Name", default)]
    location_name: String,
    #[serde(rename = "Region", default)]
    region: String,
    #[serde(rename = "Location_Type", default)]
    location_type: String,
    #[serde(rename = "Latitude", default)]
    latitude: String,
    #[serde(rename = "Longitude", default)]
    longitude: String,
    #[serde(rename = "Owner", default)]
    owner: String,
}

/// Raw movement row as exported.
#[derive(Debug, Default, Deserialize)]
struct RawMovement {
    #[serde(rename = "SN", default)]
    sn: String,
    #[serde(rename = "COW_ID", default)]
    cow_id: String,
    #[serde(rename = "From_Location_ID", default)]
    from_location_id: String,
    #[serde(rename = "To_Location_ID", default)]
    to_location_id: String,
    #[serde(rename = "Moved_DateTime", default)]
    moved_datetime: String,
    #[serde(rename = "Reached_DateTime", default)]
    reached_datetime: String,
    #[serde(rename = "Movement_Type", default)]
    movement_type: String,
    #[serde(rename = "Distance_KM", default)]
    distance_km: String,
    #[serde(rename = "Top_Event", default)]
    top_event: String,
    #[serde(rename = "To_Sub_Location", default)]
    to_sub_location: String,
    #[serde(rename = "Vendor", default)]
    vendor: String,
}

pub struct SheetIngestor {
    aliases: HashMap<&'static str, &'static str>,
}

impl Default for SheetIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetIngestor {
    pub fn new() -> Self {
        Self {
            aliases: WAREHOUSE_ALIASES.clone(),
        }
    }

    /// Replace the default canonicalization table (tests, alternate fleets).
    pub fn with_aliases(aliases: HashMap<&'static str, &'static str>) -> Self {
        Self { aliases }
    }

    /// Load both sheets and return the normalized data set.
    pub fn load(&self, locations_path: &Path, movements_path: &Path) -> Result<DataSet> {
        let locations = self.load_locations(locations_path)?;
        let movements = self.load_movements(movements_path)?;
        info!(
            locations = locations.len(),
            movements = movements.len(),
            "Loaded fleet data"
        );
        Ok(DataSet {
            locations,
            movements,
        })
    }

    pub fn load_locations(&self, path: &Path) -> Result<Vec<Location>> {
        let raws = read_rows::<RawLocation>(path)?;
        let mut locations = Vec::new();
        let mut dropped = 0usize;
        for raw in raws {
            match self.normalize_location(raw) {
                Some(location) => locations.push(location),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped, path = %path.display(), "Dropped directory rows without a Location_ID");
        }
        Ok(locations)
    }

    pub fn load_movements(&self, path: &Path) -> Result<Vec<Movement>> {
        let raws = read_rows::<RawMovement>(path)?;
        let mut movements = Vec::new();
        let mut dropped = 0usize;
        for raw in raws {
            match normalize_movement(raw) {
                Some(movement) => movements.push(movement),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped, path = %path.display(), "Dropped movement rows without a COW_ID");
        }
        Ok(movements)
    }

    fn normalize_location(&self, raw: RawLocation) -> Option<Location> {
        let location_id = raw.location_id.trim().to_string();
        if location_id.is_empty() {
            return None;
        }

        let latitude = coerce_f64(&raw.latitude);
        let longitude = coerce_f64(&raw.longitude);
        let region = Region::parse(&raw.region).unwrap_or_else(|| {
            let inferred = infer_region(latitude, longitude);
            debug!(
                location_id = %location_id,
                region = %inferred,
                "Blank region, inferred from coordinates"
            );
            inferred
        });

        Some(Location {
            location_id,
            location_name: canonical_name(&raw.location_name, &self.aliases),
            region,
            location_type: LocationType::from(raw.location_type.as_str()),
            latitude,
            longitude,
            owner: raw.owner.trim().to_string(),
        })
    }
}

fn normalize_movement(raw: RawMovement) -> Option<Movement> {
    let cow_id = raw.cow_id.trim().to_string();
    if cow_id.is_empty() {
        return None;
    }

    Some(Movement {
        sn: raw.sn.trim().parse().unwrap_or(0),
        cow_id,
        from_location_id: raw.from_location_id.trim().to_string(),
        to_location_id: raw.to_location_id.trim().to_string(),
        moved_datetime: normalize_datetime(&raw.moved_datetime),
        reached_datetime: normalize_datetime(&raw.reached_datetime),
        movement_type: MovementType::parse(&raw.movement_type),
        distance_km: coerce_f64(&raw.distance_km),
        top_event: non_blank(&raw.top_event),
        to_sub_location: non_blank(&raw.to_sub_location),
        vendor: non_blank(&raw.vendor),
    })
}

/// Parse rows from a CSV export or a JSON snapshot, keyed on extension.
fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        let rows: Vec<HashMap<String, serde_json::Value>> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
        // Re-route through the string-cell raw types so JSON numbers and CSV
        // cells normalize identically.
        let mut parsed = Vec::with_capacity(rows.len());
        for row in rows {
            let cells: HashMap<String, String> =
                row.into_iter().map(|(key, value)| (key, cell_to_string(value))).collect();
            let json = serde_json::to_value(cells)?;
            parsed.push(serde_json::from_value(json)?);
        }
        return Ok(parsed);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))?;

    let mut rows = Vec::new();
    let mut errors = 0usize;
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(error) => {
                errors += 1;
                debug!(%error, "Skipping malformed CSV row");
            }
        }
    }
    if errors > 0 {
        warn!(errors, path = %path.display(), "Skipped malformed CSV rows");
    }
    Ok(rows)
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn coerce_f64(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(0.0)
}

fn non_blank(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Canonical ISO-8601, or the epoch sentinel when the cell is unparseable.
fn normalize_datetime(cell: &str) -> String {
    match TimestampParser::parse(cell) {
        Ok(timestamp) => timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        Err(_) => {
            debug!(cell, "Unparseable timestamp, using sentinel");
            SENTINEL.to_string()
        }
    }
}

/// Saudi-geography heuristic for blank region columns. Coordinates that
/// failed coercion (0, 0) land in Central, the fleet's home region.
fn infer_region(latitude: f64, longitude: f64) -> Region {
    if latitude == 0.0 && longitude == 0.0 {
        return Region::Central;
    }
    if latitude < 21.0 {
        Region::South
    } else if latitude > 27.0 {
        Region::North
    } else if longitude < 42.0 {
        Region::West
    } else if longitude > 48.5 {
        Region::East
    } else {
        Region::Central
    }
}
