//! Core Data Models
//!
//! This module defines the primary data structures used throughout the COW
//! fleet analytics system. These models represent the complete pipeline from
//! raw sheet-exported records to aggregated dashboard outputs.
//!
//! ## Data Flow
//!
//! 1. **Raw Data**: [`Location`] and [`Movement`] - records produced by the
//!    ingestion adapter from CSV/JSON sheet exports
//! 2. **Enrichment**: [`Movement`] with `movement_type` populated by the
//!    classifier (source-supplied values are never overwritten)
//! 3. **Aggregation**: [`CowMetrics`], [`WarehouseMetrics`], [`RegionMetrics`],
//!    [`DwellReport`], [`AgingReport`], [`EventCount`] - derived views
//! 4. **Output**: every aggregate serializes to camelCase JSON for direct
//!    consumption by a rendering layer
//!
//! ## Conventions
//!
//! - Input records keep the sheet-export field names (`Location_ID`,
//!   `Moved_DateTime`, ...) so a JSON snapshot of the source round-trips.
//! - Timestamps stay as canonical ISO-8601 strings on the record; consumers
//!   parse on demand and silently drop unparseable values from duration math.
//! - Output records carry no behavior - plain data, chart points are
//!   `{name, value}` pairs, map overlays are `{lat, lon, value}` triples.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Administrative region of Saudi Arabia used by the fleet dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Central,
    West,
    East,
    South,
    North,
}

impl Region {
    /// All regions, in dashboard display order.
    pub const ALL: [Region; 5] = [
        Region::Central,
        Region::West,
        Region::East,
        Region::South,
        Region::North,
    ];

    /// Parse a sheet-export region cell. Blank or unknown values return
    /// `None` so the ingestion adapter can fall back to coordinate inference.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CENTRAL" => Some(Region::Central),
            "WEST" | "WESTERN" => Some(Region::West),
            "EAST" | "EASTERN" => Some(Region::East),
            "SOUTH" | "SOUTHERN" => Some(Region::South),
            "NORTH" | "NORTHERN" => Some(Region::North),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Central => "CENTRAL",
            Region::West => "WEST",
            Region::East => "EAST",
            Region::South => "SOUTH",
            Region::North => "NORTH",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location type tag from the directory sheet.
///
/// Note: warehouse *qualification* is wider than this tag - see
/// [`Location::is_warehouse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    Site,
    Warehouse,
}

impl From<&str> for LocationType {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "WAREHOUSE" | "WH" => LocationType::Warehouse,
            _ => LocationType::Site, // default
        }
    }
}

/// Movement classification: how much of the move was between live sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    Full,
    Half,
    Zero,
}

impl MovementType {
    /// Parse a sheet cell; blank or unknown returns `None`, leaving the
    /// classifier to compute the value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FULL" => Some(MovementType::Full),
            "HALF" => Some(MovementType::Half),
            "ZERO" => Some(MovementType::Zero),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Full => "Full",
            MovementType::Half => "Half",
            MovementType::Zero => "Zero",
        }
    }
}

/// One entry of the location directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "Location_ID")]
    pub location_id: String,
    #[serde(rename = "Location_Name")]
    pub location_name: String,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Location_Type")]
    pub location_type: LocationType,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Owner")]
    pub owner: String,
}

impl Location {
    /// A location qualifies as a warehouse if its type tag says so OR its
    /// name contains the substring "WH" (case-insensitive).
    pub fn is_warehouse(&self) -> bool {
        self.location_type == LocationType::Warehouse
            || self.location_name.to_uppercase().contains("WH")
    }
}

/// One relocation event of a COW, as loaded from the movement sheet.
///
/// `movement_type`, once present on the record, is ground truth and is never
/// overwritten. `distance_km` is the authoritative routed distance supplied
/// by the source - it is never recomputed from coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    #[serde(rename = "SN")]
    pub sn: u32,
    #[serde(rename = "COW_ID")]
    pub cow_id: String,
    #[serde(rename = "From_Location_ID")]
    pub from_location_id: String,
    #[serde(rename = "To_Location_ID")]
    pub to_location_id: String,
    #[serde(rename = "Moved_DateTime")]
    pub moved_datetime: String,
    #[serde(rename = "Reached_DateTime")]
    pub reached_datetime: String,
    #[serde(rename = "Movement_Type")]
    pub movement_type: Option<MovementType>,
    #[serde(rename = "Distance_KM")]
    pub distance_km: f64,
    #[serde(rename = "Top_Event")]
    pub top_event: Option<String>,
    #[serde(rename = "To_Sub_Location")]
    pub to_sub_location: Option<String>,
    #[serde(rename = "Vendor")]
    pub vendor: Option<String>,
}

/// Generic chart datum - `{name, value}` as consumed by the chart layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Map overlay datum - `{lat, lon, value}` triple.
#[derive(Debug, Clone, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

/// Tally of the three movement classifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovementMix {
    pub full: usize,
    pub half: usize,
    pub zero: usize,
}

impl MovementMix {
    pub fn record(&mut self, movement_type: MovementType) {
        match movement_type {
            MovementType::Full => self.full += 1,
            MovementType::Half => self.half += 1,
            MovementType::Zero => self.zero += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.full + self.half + self.zero
    }
}

/// Per-COW aggregate metrics, computed on demand from the movement batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CowMetrics {
    pub cow_id: String,
    pub total_movements: usize,
    pub total_distance_km: f64,
    pub avg_distance_km: f64,
    pub movement_mix: MovementMix,
    pub avg_idle_days: f64,
    pub is_static: bool,
    pub last_movement: String,
    pub regions_served: Vec<String>,
}

/// Per-warehouse aggregate metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseMetrics {
    pub location_id: String,
    pub warehouse_name: String,
    pub outgoing_movements: usize,
    pub incoming_movements: usize,
    pub avg_outgoing_distance_km: f64,
    pub avg_incoming_distance_km: f64,
    pub top_destination_regions: Vec<ChartPoint>,
    pub total_idle_days: f64,
}

/// Per-region aggregate metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMetrics {
    pub region: String,
    pub total_movements: usize,
    pub deployed_cows: usize,
    pub active_cows: usize,
    pub static_cows: usize,
    pub cross_region_movements: usize,
    pub avg_deployment_days: f64,
}

/// One closed stay interval at a location, produced by the dwell-time engine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRecord {
    pub cow_id: String,
    pub warehouse_name: String,
    pub stay_days: f64,
    pub arrival: String,
    pub departure: String,
}

/// Dwell-time rollups for the dashboard's warehouse-stay views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwellReport {
    pub stays: Vec<StayRecord>,
    pub top_cows: Vec<ChartPoint>,
    pub avg_stay_per_warehouse: Vec<ChartPoint>,
    pub top_warehouses: Vec<ChartPoint>,
}

/// One row of the off-air aging detail table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingRow {
    pub cow_id: String,
    pub total_movements: usize,
    pub avg_idle_days: f64,
    pub top_warehouse: String,
}

/// Off-air aging output: bucket counts for the chart, the detail table, the
/// per-COW totals, and the bucket drill-down sets.
///
/// `cow_totals` holds idle months for [`crate::analytics::aging::aging_report`]
/// and raw idle days for the short-idle variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingReport {
    pub buckets: Vec<ChartPoint>,
    pub rows: Vec<AgingRow>,
    pub cow_totals: BTreeMap<String, f64>,
    pub bucket_cows: BTreeMap<String, Vec<String>>,
}

/// One entry of an event or vendor frequency rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCount {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

/// Batch-wide headline numbers for the dashboard KPI strip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_movements: usize,
    pub total_cows: usize,
    pub total_distance_km: f64,
    pub movement_mix: MovementMix,
    pub warehouse_count: usize,
    pub site_count: usize,
}
