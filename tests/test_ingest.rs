use cowtrack::ingest::SheetIngestor;
use cowtrack::models::{LocationType, MovementType, Region};
use cowtrack::timestamp::SENTINEL;

mod common;

#[test]
fn test_csv_load_and_normalization() -> anyhow::Result<()> {
    let (locations_csv, movements_csv) = common::sample_fixture();
    let (_temp, locations_path, movements_path) =
        common::write_fixture_csvs(locations_csv, movements_csv)?;

    let ingestor = SheetIngestor::new();
    let data = ingestor.load(&locations_path, &movements_path)?;

    assert_eq!(data.locations.len(), 4);
    assert_eq!(data.movements.len(), 6);

    // Alias canonicalization: "jeddah warehouse" -> "Jeddah WH"
    let jeddah = data
        .locations
        .iter()
        .find(|l| l.location_id == "WH-JED")
        .unwrap();
    assert_eq!(jeddah.location_name, "Jeddah WH");
    // Blank region inferred from Jeddah coordinates
    assert_eq!(jeddah.region, Region::West);
    assert_eq!(jeddah.location_type, LocationType::Warehouse);

    // Pre-supplied movement type survives, blank ones stay None for the
    // classifier.
    let typed = data.movements.iter().find(|m| m.sn == 4).unwrap();
    assert_eq!(typed.movement_type, Some(MovementType::Full));
    let untyped = data.movements.iter().find(|m| m.sn == 1).unwrap();
    assert_eq!(untyped.movement_type, None);
    assert_eq!(untyped.distance_km, 15.5);

    // Unparseable date normalized to the sentinel.
    let bad_date = data.movements.iter().find(|m| m.sn == 6).unwrap();
    assert_eq!(bad_date.moved_datetime, SENTINEL);
    assert_eq!(bad_date.reached_datetime, "2024-06-02T00:00:00Z");

    Ok(())
}

#[test]
fn test_json_snapshot_load() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let locations_path = temp_dir.path().join("locations.json");
    let movements_path = temp_dir.path().join("movements.json");

    // Numbers as JSON numbers, to prove coercion handles both shapes.
    std::fs::write(
        &locations_path,
        r#"[{"Location_ID": " WH-RYD ", "Location_Name": "RIYADH WAREHOUSE",
             "Region": "CENTRAL", "Location_Type": "Warehouse",
             "Latitude": 24.71, "Longitude": 46.68, "Owner": "STC"}]"#,
    )?;
    std::fs::write(
        &movements_path,
        r#"[{"SN": 1, "COW_ID": "COW-1", "From_Location_ID": "WH-RYD",
             "To_Location_ID": "WH-RYD", "Moved_DateTime": "2024-01-05 08:30:00",
             "Reached_DateTime": "2024-01-05 12:30:00", "Movement_Type": "",
             "Distance_KM": 12.25, "Vendor": "ACME"}]"#,
    )?;

    let ingestor = SheetIngestor::new();
    let data = ingestor.load(&locations_path, &movements_path)?;

    assert_eq!(data.locations.len(), 1);
    let location = &data.locations[0];
    assert_eq!(location.location_id, "WH-RYD"); // trimmed
    assert_eq!(location.location_name, "Riyadh WH"); // canonicalized
    assert_eq!(location.latitude, 24.71);

    assert_eq!(data.movements.len(), 1);
    let movement = &data.movements[0];
    assert_eq!(movement.distance_km, 12.25);
    // Sheet-style datetime normalized to canonical ISO-8601
    assert_eq!(movement.moved_datetime, "2024-01-05T08:30:00Z");
    assert_eq!(movement.vendor.as_deref(), Some("ACME"));

    Ok(())
}

#[test]
fn test_rows_without_ids_are_dropped() -> anyhow::Result<()> {
    let locations_csv = "\
Location_ID,Location_Name,Region,Location_Type,Latitude,Longitude,Owner
,No ID,CENTRAL,Site,24.0,46.0,STC
S-1,Good,CENTRAL,Site,24.0,46.0,STC
";
    let movements_csv = "\
SN,COW_ID,From_Location_ID,To_Location_ID,Moved_DateTime,Reached_DateTime,Movement_Type,Distance_KM,Top_Event,To_Sub_Location,Vendor
1,,S-1,S-1,2024-01-01T00:00:00Z,2024-01-02T00:00:00Z,,bad-distance,,,
2,COW-1,S-1,S-1,2024-01-01T00:00:00Z,2024-01-02T00:00:00Z,,bad-distance,,,
";
    let (_temp, locations_path, movements_path) =
        common::write_fixture_csvs(locations_csv, movements_csv)?;

    let ingestor = SheetIngestor::new();
    let data = ingestor.load(&locations_path, &movements_path)?;

    assert_eq!(data.locations.len(), 1);
    assert_eq!(data.movements.len(), 1);
    // Numeric coercion: invalid distance becomes 0.0 instead of dropping the
    // record.
    assert_eq!(data.movements[0].distance_km, 0.0);

    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let ingestor = SheetIngestor::new();
    let missing = std::path::Path::new("definitely/not/here.csv");
    assert!(ingestor.load_locations(missing).is_err());
}
