//! Per-warehouse aggregate metrics.
//!
//! For each warehouse-qualifying location: traffic counts and average
//! distances in both directions, the top destination regions of outgoing
//! moves, and the accumulated idle time COWs spent parked there before
//! leaving.

use super::round2;
use crate::directory::LocationDirectory;
use crate::models::{ChartPoint, Movement, WarehouseMetrics};
use crate::timestamp::TimestampParser;
use std::collections::HashMap;

const TOP_REGION_LIMIT: usize = 5;

/// Metrics for one location. `None` when the ID is unknown or the location
/// does not qualify as a warehouse.
pub fn warehouse_metrics(
    location_id: &str,
    movements: &[Movement],
    directory: &LocationDirectory,
) -> Option<WarehouseMetrics> {
    let location = directory.get(location_id)?;
    if !location.is_warehouse() {
        return None;
    }

    let outgoing: Vec<&Movement> = movements
        .iter()
        .filter(|m| m.from_location_id == location_id)
        .collect();
    let incoming: Vec<&Movement> = movements
        .iter()
        .filter(|m| m.to_location_id == location_id)
        .collect();

    let avg = |batch: &[&Movement]| {
        if batch.is_empty() {
            0.0
        } else {
            round2(batch.iter().map(|m| m.distance_km).sum::<f64>() / batch.len() as f64)
        }
    };

    // Destination regions of outgoing moves, ranked by frequency.
    let mut region_counts: HashMap<&str, usize> = HashMap::new();
    for movement in &outgoing {
        if let Some(region) = directory.region_of(&movement.to_location_id) {
            *region_counts.entry(region.as_str()).or_default() += 1;
        }
    }
    let mut top_regions: Vec<ChartPoint> = region_counts
        .into_iter()
        .map(|(name, count)| ChartPoint {
            name: name.to_string(),
            value: count as f64,
        })
        .collect();
    top_regions.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    top_regions.truncate(TOP_REGION_LIMIT);

    // Idle accumulation: for each arrival, the next departure of the same COW
    // strictly after the arrival's Reached closes the interval. An arrival
    // with no qualifying departure contributes nothing - the COW may still be
    // there, or left untracked.
    let mut total_idle = 0.0;
    for arrival in &incoming {
        let Ok(reached) = TimestampParser::parse(&arrival.reached_datetime) else {
            continue;
        };
        let next_departure = outgoing
            .iter()
            .filter(|m| m.cow_id == arrival.cow_id)
            .filter_map(|m| TimestampParser::parse(&m.moved_datetime).ok())
            .filter(|moved| *moved > reached)
            .min();
        if let Some(moved) = next_departure {
            total_idle += (moved - reached).num_seconds() as f64 / 86_400.0;
        }
    }

    Some(WarehouseMetrics {
        location_id: location_id.to_string(),
        warehouse_name: location.location_name.clone(),
        outgoing_movements: outgoing.len(),
        incoming_movements: incoming.len(),
        avg_outgoing_distance_km: avg(&outgoing),
        avg_incoming_distance_km: avg(&incoming),
        top_destination_regions: top_regions,
        total_idle_days: round2(total_idle),
    })
}

/// Metrics for every warehouse in the directory, busiest first (total
/// traffic descending, name ascending on ties).
pub fn all_warehouse_metrics(
    movements: &[Movement],
    directory: &LocationDirectory,
) -> Vec<WarehouseMetrics> {
    let mut metrics: Vec<WarehouseMetrics> = directory
        .warehouses()
        .filter_map(|location| warehouse_metrics(&location.location_id, movements, directory))
        .collect();
    metrics.sort_by(|a, b| {
        let traffic_a = a.outgoing_movements + a.incoming_movements;
        let traffic_b = b.outgoing_movements + b.incoming_movements;
        traffic_b
            .cmp(&traffic_a)
            .then_with(|| a.warehouse_name.cmp(&b.warehouse_name))
    });
    metrics
}
