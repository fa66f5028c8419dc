//! Event and vendor frequency rollups.
//!
//! Free-text fields grouped by a trimmed, lowercased key while the
//! first-seen original casing is kept for display. The event rollup
//! excludes a fixed stoplist of placeholder values; the vendor rollup only
//! drops blanks. Percentages are of the *filtered* total, not the raw batch
//! size, and [`filtered_event_total`] exposes that denominator independently
//! of the top-N cut so the UI can label charts consistently.

use super::round2;
use crate::models::{EventCount, Movement};
use std::collections::HashMap;

/// Placeholder values excluded from the event rollup (compared against the
/// trimmed, lowercased key; the empty string is excluded as well).
const EVENT_STOPLIST: [&str; 4] = ["wh", "others", "other", "#n/a"];

/// The event cell for a movement: `Top_Event` when non-blank, else
/// `To_Sub_Location`.
fn event_value(movement: &Movement) -> Option<&str> {
    for candidate in [&movement.top_event, &movement.to_sub_location] {
        if let Some(value) = candidate {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }
    None
}

fn is_stoplisted(normalized: &str) -> bool {
    normalized.is_empty() || EVENT_STOPLIST.contains(&normalized)
}

/// Count values by normalized key, keeping first-seen display casing, and
/// rank descending (name ascending on ties).
fn rollup<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> Vec<EventCount> {
    let mut counts: HashMap<String, (String, usize)> = HashMap::new();
    let mut total = 0usize;

    for value in values {
        let normalized = value.to_lowercase();
        let entry = counts.entry(normalized).or_insert_with(|| (value.to_string(), 0));
        entry.1 += 1;
        total += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_values().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(name, count)| EventCount {
            name,
            count,
            percentage: if total > 0 {
                round2(count as f64 / total as f64 * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}

/// Top events by frequency, stoplist applied, percentage of filtered total.
pub fn top_events(movements: &[Movement], limit: usize) -> Vec<EventCount> {
    rollup(
        movements
            .iter()
            .filter_map(event_value)
            .filter(|value| !is_stoplisted(&value.to_lowercase())),
        limit,
    )
}

/// Number of movements surviving the event filter, independent of the top-N
/// cut - the denominator the UI displays next to the chart.
pub fn filtered_event_total(movements: &[Movement]) -> usize {
    movements
        .iter()
        .filter_map(event_value)
        .filter(|value| !is_stoplisted(&value.to_lowercase()))
        .count()
}

/// Top vendors by frequency. Same shape as the event rollup, but no
/// stoplist - only blank/missing vendors are dropped.
pub fn top_vendors(movements: &[Movement], limit: usize) -> Vec<EventCount> {
    rollup(
        movements
            .iter()
            .filter_map(|m| m.vendor.as_deref())
            .map(str::trim)
            .filter(|vendor| !vendor.is_empty()),
        limit,
    )
}
