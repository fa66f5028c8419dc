//! Per-COW aggregate metrics.
//!
//! A COW exists only by appearing in the movement batch - there is no COW
//! master record. Everything here is derived on demand: totals, distance,
//! movement-type mix, idle gaps between consecutive movements, the static
//! flag, and the set of destination regions served.

use super::round2;
use crate::directory::LocationDirectory;
use crate::models::{CowMetrics, Movement, MovementMix};
use crate::timestamp::TimestampParser;
use std::collections::{BTreeSet, HashMap};

/// Distinct COW IDs present in the batch, sorted.
pub fn cow_ids(movements: &[Movement]) -> Vec<String> {
    let ids: BTreeSet<&str> = movements.iter().map(|m| m.cow_id.as_str()).collect();
    ids.into_iter().map(str::to_string).collect()
}

/// Metrics for a single COW. `None` when the COW has no movements - a COW
/// with zero movements is not representable.
pub fn cow_metrics(
    cow_id: &str,
    movements: &[Movement],
    directory: &LocationDirectory,
) -> Option<CowMetrics> {
    let mut own: Vec<&Movement> = movements.iter().filter(|m| m.cow_id == cow_id).collect();
    if own.is_empty() {
        return None;
    }
    own.sort_by_key(|m| TimestampParser::parse_or_epoch(&m.moved_datetime));

    let total_movements = own.len();
    let total_distance: f64 = own.iter().map(|m| m.distance_km).sum();

    let mut mix = MovementMix::default();
    for movement in &own {
        if let Some(movement_type) = movement.movement_type {
            mix.record(movement_type);
        }
    }

    // Idle gap per consecutive pair in Moved order: current.Moved minus
    // previous.Reached. Non-positive gaps (overlapping or identical
    // timestamps) are excluded, not clamped to zero.
    let mut idle_sum = 0.0;
    let mut idle_count = 0usize;
    for pair in own.windows(2) {
        if let Some(gap) =
            TimestampParser::days_between(&pair[0].reached_datetime, &pair[1].moved_datetime)
        {
            if gap > 0.0 {
                idle_sum += gap;
                idle_count += 1;
            }
        }
    }
    let avg_idle_days = if idle_count > 0 {
        round2(idle_sum / idle_count as f64)
    } else {
        0.0
    };

    let regions_served: BTreeSet<&str> = own
        .iter()
        .filter_map(|m| directory.region_of(&m.to_location_id))
        .map(|region| region.as_str())
        .collect();

    Some(CowMetrics {
        cow_id: cow_id.to_string(),
        total_movements,
        total_distance_km: round2(total_distance),
        avg_distance_km: round2(total_distance / total_movements as f64),
        movement_mix: mix,
        avg_idle_days,
        is_static: total_movements <= 1,
        last_movement: own.last().map(|m| m.moved_datetime.clone()).unwrap_or_default(),
        regions_served: regions_served.into_iter().map(str::to_string).collect(),
    })
}

/// Metrics for every COW in the batch, sorted by COW ID.
pub fn all_cow_metrics(movements: &[Movement], directory: &LocationDirectory) -> Vec<CowMetrics> {
    cow_ids(movements)
        .iter()
        .filter_map(|cow_id| cow_metrics(cow_id, movements, directory))
        .collect()
}

/// Global per-COW movement counts; the static flag (`count <= 1`) is always
/// derived from the full batch, regardless of any regional filter applied by
/// the caller.
pub fn movement_counts(movements: &[Movement]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for movement in movements {
        *counts.entry(movement.cow_id.clone()).or_default() += 1;
    }
    counts
}
