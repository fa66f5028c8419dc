//! Off-air warehouse aging engine.
//!
//! Answers "how long have off-air COWs been idling at warehouses?". The
//! pipeline is a stricter sibling of the dwell engine ([`super::dwell`]):
//!
//! 1. Keep only `Half`/`Zero` movements (off-air by definition - at least
//!    one endpoint is a warehouse, or both).
//! 2. Group by COW, sort each group by `Moved_DateTime` ascending.
//! 3. Per adjacent pair, idle time at `current.To` counts only when that
//!    location qualifies as a warehouse - the strict check the dwell engine
//!    deliberately omits. Positive gaps only.
//! 4. Accumulate per-COW totals, movement counts, and per-warehouse idle
//!    breakdowns; COWs that never aged are excluded entirely.
//! 5. Bucket each COW's lifetime idle total into exactly one band.
//!
//! Bucketing policy lives in the named constants below so it can be audited
//! and tested in isolation.

use super::round2;
use crate::directory::LocationDirectory;
use crate::models::{AgingReport, AgingRow, ChartPoint, Movement, MovementType};
use crate::timestamp::TimestampParser;
use std::collections::{BTreeMap, HashMap};

/// Fixed, non-calendar-aware day/month conversion used for bucketing.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Month buckets, upper-bound inclusive, checked in order.
pub const MONTH_BUCKETS: [(f64, &str); 4] =
    [(3.0, "0-3"), (6.0, "3-6"), (9.0, "6-9"), (12.0, "9-12")];
pub const MONTH_OVERFLOW: &str = ">12";

/// Day bands for the short-idle variant, upper-bound inclusive.
pub const DAY_BANDS: [(f64, &str); 3] = [(5.0, "1-5"), (10.0, "6-10"), (15.0, "11-15")];
pub const DAY_OVERFLOW: &str = ">15";

/// Accumulated idle state for one COW across its off-air movements.
struct CowIdle {
    total_days: f64,
    movement_count: usize,
    per_warehouse: HashMap<String, f64>,
}

/// Steps 1-4 of the pipeline. Only COWs with a strictly-positive idle total
/// appear in the result.
fn off_air_idle(
    movements: &[Movement],
    directory: &LocationDirectory,
) -> BTreeMap<String, CowIdle> {
    let mut by_cow: BTreeMap<&str, Vec<&Movement>> = BTreeMap::new();
    for movement in movements {
        if matches!(
            movement.movement_type,
            Some(MovementType::Half) | Some(MovementType::Zero)
        ) {
            by_cow.entry(movement.cow_id.as_str()).or_default().push(movement);
        }
    }

    let mut result = BTreeMap::new();
    for (cow_id, mut sequence) in by_cow {
        sequence.sort_by_key(|m| TimestampParser::parse_or_epoch(&m.moved_datetime));

        let mut idle = CowIdle {
            total_days: 0.0,
            movement_count: sequence.len(),
            per_warehouse: HashMap::new(),
        };

        for pair in sequence.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let Some(location) = directory.get(&current.to_location_id) else {
                continue;
            };
            if !location.is_warehouse() {
                continue; // strict check: only warehouse stays age a COW
            }
            let Some(days) =
                TimestampParser::days_between(&current.reached_datetime, &next.moved_datetime)
            else {
                continue;
            };
            if days <= 0.0 {
                continue;
            }
            idle.total_days += days;
            *idle
                .per_warehouse
                .entry(location.location_name.clone())
                .or_default() += days;
        }

        if idle.total_days > 0.0 {
            result.insert(cow_id.to_string(), idle);
        }
    }
    result
}

/// First bucket whose upper bound covers the value, else the overflow label.
fn bucket_label(
    value: f64,
    buckets: &[(f64, &'static str)],
    overflow: &'static str,
) -> &'static str {
    for (bound, label) in buckets {
        if value <= *bound {
            return label;
        }
    }
    overflow
}

fn build_report(
    idle_by_cow: BTreeMap<String, CowIdle>,
    buckets: &[(f64, &'static str)],
    overflow: &'static str,
    divisor: f64,
) -> AgingReport {
    let mut bucket_counts: BTreeMap<&str, usize> =
        buckets.iter().map(|(_, label)| (*label, 0)).collect();
    bucket_counts.insert(overflow, 0);

    let mut cow_totals = BTreeMap::new();
    let mut bucket_cows: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut rows = Vec::new();

    for (cow_id, idle) in &idle_by_cow {
        let units = idle.total_days / divisor;
        let label = bucket_label(units, buckets, overflow);
        *bucket_counts.entry(label).or_default() += 1;
        bucket_cows.entry(label.to_string()).or_default().push(cow_id.clone());
        cow_totals.insert(cow_id.clone(), round2(units));

        // Guard the single-movement divide: a lone movement has no closed
        // stay, so its average is defined as 0.
        let avg_idle_days = if idle.movement_count > 1 {
            round2(idle.total_days / (idle.movement_count - 1) as f64)
        } else {
            0.0
        };

        let top_warehouse = idle
            .per_warehouse
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.clone())
            .unwrap_or_default();

        rows.push((
            idle.total_days,
            AgingRow {
                cow_id: cow_id.clone(),
                total_movements: idle.movement_count,
                avg_idle_days,
                top_warehouse,
            },
        ));
    }

    // Worst agers first; ID ascending on ties.
    rows.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cow_id.cmp(&b.1.cow_id)));
    for cows in bucket_cows.values_mut() {
        cows.sort();
    }

    let chart: Vec<ChartPoint> = buckets
        .iter()
        .map(|(_, label)| *label)
        .chain(std::iter::once(overflow))
        .map(|label| ChartPoint {
            name: label.to_string(),
            value: bucket_counts.get(label).copied().unwrap_or(0) as f64,
        })
        .collect();

    AgingReport {
        buckets: chart,
        rows: rows.into_iter().map(|(_, row)| row).collect(),
        cow_totals,
        bucket_cows,
    }
}

/// Month-bucketed aging report. `cow_totals` holds idle months.
pub fn aging_report(movements: &[Movement], directory: &LocationDirectory) -> AgingReport {
    build_report(
        off_air_idle(movements, directory),
        &MONTH_BUCKETS,
        MONTH_OVERFLOW,
        DAYS_PER_MONTH,
    )
}

/// Short-idle variant: same pipeline, raw days bucketed into narrow bands to
/// surface recently-idled COWs. `cow_totals` holds idle days.
pub fn short_idle_report(movements: &[Movement], directory: &LocationDirectory) -> AgingReport {
    build_report(off_air_idle(movements, directory), &DAY_BANDS, DAY_OVERFLOW, 1.0)
}
