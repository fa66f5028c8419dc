use anyhow::Result;
use cowtrack::models::{Location, LocationType, Movement, MovementType, Region};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn location(id: &str, name: &str, location_type: LocationType, region: Region) -> Location {
    Location {
        location_id: id.to_string(),
        location_name: name.to_string(),
        region,
        location_type,
        latitude: 24.7,
        longitude: 46.7,
        owner: "STC".to_string(),
    }
}

#[allow(dead_code)]
pub fn movement(cow: &str, from: &str, to: &str, moved: &str, reached: &str) -> Movement {
    Movement {
        sn: 0,
        cow_id: cow.to_string(),
        from_location_id: from.to_string(),
        to_location_id: to.to_string(),
        moved_datetime: moved.to_string(),
        reached_datetime: reached.to_string(),
        movement_type: None,
        distance_km: 100.0,
        top_event: None,
        to_sub_location: None,
        vendor: None,
    }
}

#[allow(dead_code)]
pub fn typed_movement(
    cow: &str,
    from: &str,
    to: &str,
    moved: &str,
    reached: &str,
    movement_type: MovementType,
) -> Movement {
    Movement {
        movement_type: Some(movement_type),
        ..movement(cow, from, to, moved, reached)
    }
}

/// The standard two-location directory most scenarios use: one warehouse,
/// one site.
#[allow(dead_code)]
pub fn wh_and_site() -> Vec<Location> {
    vec![
        location("WH-A", "Riyadh WH", LocationType::Warehouse, Region::Central),
        location("S-1", "S-1", LocationType::Site, Region::West),
    ]
}

/// Write location and movement CSV fixtures into a temp dir, returning the
/// dir (keep it alive) and both paths.
#[allow(dead_code)]
pub fn write_fixture_csvs(
    locations_csv: &str,
    movements_csv: &str,
) -> Result<(TempDir, PathBuf, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let locations_path = temp_dir.path().join("locations.csv");
    let movements_path = temp_dir.path().join("movements.csv");
    fs::write(&locations_path, locations_csv)?;
    fs::write(&movements_path, movements_csv)?;
    Ok((temp_dir, locations_path, movements_path))
}

/// A small realistic fleet export: two warehouses, two sites, three COWs.
#[allow(dead_code)]
pub fn sample_fixture() -> (&'static str, &'static str) {
    let locations = "\
Location_ID,Location_Name,Region,Location_Type,Latitude,Longitude,Owner
WH-RYD,Riyadh WH,CENTRAL,Warehouse,24.71,46.68,STC
WH-JED,jeddah warehouse,,Warehouse,21.49,39.19,STC
S-100,Olaya Site,CENTRAL,Site,24.69,46.69,STC
S-200,Corniche Site,WEST,Site,21.52,39.16,Mobily
";
    let movements = "\
SN,COW_ID,From_Location_ID,To_Location_ID,Moved_DateTime,Reached_DateTime,Movement_Type,Distance_KM,Top_Event,To_Sub_Location,Vendor
1,COW-1,WH-RYD,S-100,2024-01-01T08:00:00Z,2024-01-01T12:00:00Z,,15.5,Hajj Season,,ACME
2,COW-1,S-100,WH-RYD,2024-02-01T08:00:00Z,2024-02-01T12:00:00Z,,15.5,,Olaya,ACME
3,COW-1,WH-RYD,S-200,2024-05-01T08:00:00Z,2024-05-02T12:00:00Z,,950.0,Hajj Season,,ACME
4,COW-2,S-100,S-200,2024-01-10T00:00:00Z,2024-01-11T00:00:00Z,Full,949.1,Ramadan,,Globex
5,COW-3,WH-JED,WH-RYD,2024-03-01T00:00:00Z,2024-03-02T00:00:00Z,,952.3,Others,,
6,COW-3,WH-RYD,S-200,not-a-date,2024-06-02T00:00:00Z,,948.8,,,Globex
";
    (locations, movements)
}
