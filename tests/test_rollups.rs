use cowtrack::analytics::rollups::{filtered_event_total, top_events, top_vendors};
use cowtrack::models::Movement;

mod common;

fn with_event(top_event: Option<&str>, sub: Option<&str>) -> Movement {
    Movement {
        top_event: top_event.map(str::to_string),
        to_sub_location: sub.map(str::to_string),
        ..common::movement("C1", "A", "B", "2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z")
    }
}

fn with_vendor(vendor: &str) -> Movement {
    Movement {
        vendor: Some(vendor.to_string()),
        ..common::movement("C1", "A", "B", "2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z")
    }
}

#[test]
fn test_stoplist_only_batch_is_empty() {
    // Every value is a stoplist entry, in assorted casings.
    let batch = vec![
        with_event(Some("Others"), None),
        with_event(Some("WH"), None),
        with_event(Some(""), None),
        with_event(Some("#N/A"), None),
        with_event(None, Some("wh")),
        with_event(None, None),
    ];

    assert!(top_events(&batch, 10).is_empty());
    assert_eq!(filtered_event_total(&batch), 0);
}

#[test]
fn test_top_events_ranking_and_percentages() {
    let mut batch = Vec::new();
    for _ in 0..3 {
        batch.push(with_event(Some("Hajj"), None));
    }
    batch.push(with_event(Some("hajj"), None)); // same key, different casing
    batch.push(with_event(Some("Eid"), None));
    batch.push(with_event(None, Some("National Day")));
    batch.push(with_event(Some("Others"), None)); // excluded

    let top = top_events(&batch, 10);
    assert_eq!(top[0].name, "Hajj");
    assert_eq!(top[0].count, 4);
    assert_eq!(filtered_event_total(&batch), 6);
    // 4 of 6 filtered values
    assert_eq!(top[0].percentage, 66.67);

    // The top-N cut does not change the denominator.
    let cut = top_events(&batch, 1);
    assert_eq!(cut.len(), 1);
    assert_eq!(cut[0].percentage, 66.67);
}

#[test]
fn test_vendor_rollup_without_stoplist() {
    let batch = vec![
        with_vendor("ACME"),
        with_vendor("acme"),
        with_vendor("Others"), // not stoplisted for vendors
        with_vendor("   "),    // blank is still dropped
    ];

    let top = top_vendors(&batch, 10);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "ACME");
    assert_eq!(top[0].count, 2);
    assert_eq!(top[1].name, "Others");
}
