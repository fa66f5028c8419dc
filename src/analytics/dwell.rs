//! Warehouse dwell-time engine.
//!
//! Reconstructs each COW's chronological movement sequence and closes a stay
//! interval per adjacent pair: the COW "stayed" at `current.To` from
//! `current.Reached` until `next.Moved`. The last movement of a sequence
//! never closes a stay - an open-ended/current stay is not reported.
//!
//! Any resolvable destination counts as a stay location here, warehouse or
//! not. That is deliberately looser than the off-air aging engine
//! ([`super::aging`]), which applies the warehouse qualification check; the
//! two produce materially different dwell semantics and are pinned apart by
//! tests.

use super::round2;
use crate::directory::LocationDirectory;
use crate::models::{ChartPoint, DwellReport, Movement, StayRecord};
use crate::timestamp::TimestampParser;
use std::collections::{BTreeMap, HashMap};

/// All closed stay intervals in the batch, grouped per COW and ordered by
/// COW ID then arrival.
pub fn stay_records(movements: &[Movement], directory: &LocationDirectory) -> Vec<StayRecord> {
    let mut by_cow: BTreeMap<&str, Vec<&Movement>> = BTreeMap::new();
    for movement in movements {
        by_cow.entry(movement.cow_id.as_str()).or_default().push(movement);
    }

    let mut stays = Vec::new();
    for (cow_id, mut sequence) in by_cow {
        sequence.sort_by_key(|m| TimestampParser::parse_or_epoch(&m.moved_datetime));

        for pair in sequence.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let Some(location) = directory.get(&current.to_location_id) else {
                continue; // unresolvable destination, skip this interval
            };
            let Some(days) =
                TimestampParser::days_between(&current.reached_datetime, &next.moved_datetime)
            else {
                continue;
            };
            if days <= 0.0 {
                continue;
            }
            stays.push(StayRecord {
                cow_id: cow_id.to_string(),
                warehouse_name: location.location_name.clone(),
                stay_days: round2(days),
                arrival: current.reached_datetime.clone(),
                departure: next.moved_datetime.clone(),
            });
        }
    }
    stays
}

/// Dwell rollups: top-N COWs by total stay days, average stay per location,
/// and top-N locations by accumulated stay days. Ties break by name
/// ascending so the output is deterministic.
pub fn dwell_report(
    movements: &[Movement],
    directory: &LocationDirectory,
    top_n: usize,
) -> DwellReport {
    let stays = stay_records(movements, directory);

    let mut per_cow: HashMap<&str, f64> = HashMap::new();
    let mut per_warehouse: HashMap<&str, (f64, usize)> = HashMap::new();
    for stay in &stays {
        *per_cow.entry(stay.cow_id.as_str()).or_default() += stay.stay_days;
        let entry = per_warehouse.entry(stay.warehouse_name.as_str()).or_default();
        entry.0 += stay.stay_days;
        entry.1 += 1;
    }

    let ranked = |totals: Vec<ChartPoint>, limit: usize| {
        let mut ranked = totals;
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(limit);
        ranked
    };

    let top_cows = ranked(
        per_cow
            .iter()
            .map(|(name, total)| ChartPoint {
                name: name.to_string(),
                value: round2(*total),
            })
            .collect(),
        top_n,
    );

    let avg_stay_per_warehouse = ranked(
        per_warehouse
            .iter()
            .map(|(name, (total, count))| ChartPoint {
                name: name.to_string(),
                value: round2(total / *count as f64),
            })
            .collect(),
        usize::MAX,
    );

    let top_warehouses = ranked(
        per_warehouse
            .iter()
            .map(|(name, (total, _))| ChartPoint {
                name: name.to_string(),
                value: round2(*total),
            })
            .collect(),
        top_n,
    );

    DwellReport {
        stays,
        top_cows,
        avg_stay_per_warehouse,
        top_warehouses,
    }
}
