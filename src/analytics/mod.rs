//! Movement Analytics Engine
//!
//! Pure, synchronous data transforms over an enriched movement batch plus the
//! location directory. Every function here takes slices/references in and
//! returns new plain records out - no I/O, no shared state, no mutation of
//! inputs. Repeated calls are idempotent, so callers may memoize freely.
//!
//! ## Aggregation passes
//!
//! - [`cows`] - per-COW aggregate metrics
//! - [`warehouses`] - per-warehouse in/out metrics and idle accumulation
//! - [`regions`] - per-region deployment metrics
//! - [`dwell`] - chronological warehouse dwell-time reconstruction
//! - [`aging`] - off-air idle aging buckets (months and short-idle day bands)
//! - [`rollups`] - event and vendor frequency rollups
//!
//! All passes expect the batch to have gone through
//! [`crate::classify::enrich`] first so `movement_type` is populated;
//! records without a type are skipped by type-dependent logic rather than
//! re-classified.

pub mod aging;
pub mod cows;
pub mod dwell;
pub mod regions;
pub mod rollups;
pub mod warehouses;

use crate::directory::LocationDirectory;
use crate::models::{FleetSummary, MapPoint, Movement, MovementMix};
use std::collections::{HashMap, HashSet};

/// Round to 2 decimals, the precision every dashboard figure uses.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Batch-wide headline numbers for the dashboard KPI strip.
pub fn fleet_summary(movements: &[Movement], directory: &LocationDirectory) -> FleetSummary {
    let mut cows: HashSet<&str> = HashSet::new();
    let mut mix = MovementMix::default();
    let mut total_distance = 0.0;

    for movement in movements {
        cows.insert(movement.cow_id.as_str());
        total_distance += movement.distance_km;
        if let Some(movement_type) = movement.movement_type {
            mix.record(movement_type);
        }
    }

    let warehouse_count = directory.warehouses().count();
    FleetSummary {
        total_movements: movements.len(),
        total_cows: cows.len(),
        total_distance_km: round2(total_distance),
        movement_mix: mix,
        warehouse_count,
        site_count: directory.len() - warehouse_count,
    }
}

/// Per-location movement volume as `{lat, lon, value}` triples for the map
/// overlay. A movement touches both its endpoints; locations with no traffic
/// are omitted.
pub fn map_points(movements: &[Movement], directory: &LocationDirectory) -> Vec<MapPoint> {
    let mut touches: HashMap<&str, usize> = HashMap::new();
    for movement in movements {
        *touches.entry(movement.from_location_id.as_str()).or_default() += 1;
        *touches.entry(movement.to_location_id.as_str()).or_default() += 1;
    }

    let mut points: Vec<(String, MapPoint)> = touches
        .into_iter()
        .filter_map(|(location_id, count)| {
            let location = directory.get(location_id)?;
            Some((
                location_id.to_string(),
                MapPoint {
                    lat: location.latitude,
                    lon: location.longitude,
                    value: count as f64,
                },
            ))
        })
        .collect();

    points.sort_by(|a, b| {
        b.1.value
            .total_cmp(&a.1.value)
            .then_with(|| a.0.cmp(&b.0))
    });
    points.into_iter().map(|(_, point)| point).collect()
}
