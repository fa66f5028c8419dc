use cowtrack::classify::{classify, enrich};
use cowtrack::directory::LocationDirectory;
use cowtrack::models::{LocationType, MovementType, Region};

mod common;

fn directory() -> LocationDirectory {
    LocationDirectory::new(&[
        common::location("S-1", "Site 1", LocationType::Site, Region::Central),
        common::location("S-2", "Site 2", LocationType::Site, Region::West),
        common::location("WH-A", "Riyadh WH", LocationType::Warehouse, Region::Central),
        common::location("WH-B", "Jeddah WH", LocationType::Warehouse, Region::West),
        // Warehouse by name only - the type tag says Site
        common::location("WH-C", "Dammam WH Annex", LocationType::Site, Region::East),
    ])
}

#[test]
fn test_classifier_rule_table_totality() {
    let dir = directory();
    let cases = [
        ("S-1", "S-2", MovementType::Full),
        ("WH-A", "S-1", MovementType::Half),
        ("S-1", "WH-A", MovementType::Half),
        ("WH-A", "WH-B", MovementType::Zero),
        // Name-qualified warehouse behaves identically to a tagged one
        ("WH-C", "S-1", MovementType::Half),
        ("WH-C", "WH-A", MovementType::Zero),
        // Missing endpoints are conservatively Zero
        ("ghost", "S-1", MovementType::Zero),
        ("S-1", "ghost", MovementType::Zero),
        ("ghost", "ghost", MovementType::Zero),
    ];

    for (from, to, expected) in cases {
        let m = common::movement("C1", from, to, "2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
        assert_eq!(classify(&m, &dir), expected, "{from} -> {to}");
    }
}

#[test]
fn test_enricher_pass_through_invariant() {
    let dir = directory();
    // Classifier would compute Full for S-1 -> S-2; the record says Zero.
    let m = common::typed_movement(
        "C1",
        "S-1",
        "S-2",
        "2024-01-01T00:00:00Z",
        "2024-01-02T00:00:00Z",
        MovementType::Zero,
    );

    let enriched = enrich(std::slice::from_ref(&m), &dir);
    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].movement_type, Some(MovementType::Zero));
}

#[test]
fn test_enricher_returns_new_batch() {
    let dir = directory();
    let batch = vec![common::movement(
        "C1",
        "WH-A",
        "S-1",
        "2024-01-01T00:00:00Z",
        "2024-01-02T00:00:00Z",
    )];

    let enriched = enrich(&batch, &dir);
    assert_eq!(enriched[0].movement_type, Some(MovementType::Half));
    assert_eq!(batch[0].movement_type, None, "input must not be mutated");
    assert_eq!(enriched[0].distance_km, batch[0].distance_km);
}
