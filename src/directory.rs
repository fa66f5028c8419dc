//! Location directory: the by-ID lookup every analytics pass is built on.
//!
//! Constructed once per analytics call from the ingested location batch.
//! Movements may reference IDs missing from the directory - lookups return
//! `None` and consumers treat those movements conservatively.

use crate::models::{Location, Region};
use std::collections::HashMap;

pub struct LocationDirectory {
    by_id: HashMap<String, Location>,
}

impl LocationDirectory {
    pub fn new(locations: &[Location]) -> Self {
        let by_id = locations
            .iter()
            .map(|loc| (loc.location_id.clone(), loc.clone()))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, location_id: &str) -> Option<&Location> {
        self.by_id.get(location_id)
    }

    /// Region of a location, if the ID resolves.
    pub fn region_of(&self, location_id: &str) -> Option<Region> {
        self.get(location_id).map(|loc| loc.region)
    }

    /// Whether the ID resolves to a warehouse-qualifying location.
    /// Unknown IDs are not warehouses.
    pub fn is_warehouse(&self, location_id: &str) -> bool {
        self.get(location_id).is_some_and(Location::is_warehouse)
    }

    pub fn warehouses(&self) -> impl Iterator<Item = &Location> {
        self.by_id.values().filter(|loc| loc.is_warehouse())
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationType;

    fn location(id: &str, name: &str, location_type: LocationType, region: Region) -> Location {
        Location {
            location_id: id.to_string(),
            location_name: name.to_string(),
            region,
            location_type,
            latitude: 24.0,
            longitude: 46.0,
            owner: String::new(),
        }
    }

    #[test]
    fn test_lookup_and_region() {
        let directory = LocationDirectory::new(&[
            location("WH-A", "Riyadh WH", LocationType::Warehouse, Region::Central),
            location("S-1", "Site 1", LocationType::Site, Region::West),
        ]);

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.region_of("S-1"), Some(Region::West));
        assert_eq!(directory.region_of("missing"), None);
    }

    #[test]
    fn test_unknown_id_is_not_a_warehouse() {
        let directory = LocationDirectory::new(&[location(
            "WH-A",
            "Riyadh WH",
            LocationType::Warehouse,
            Region::Central,
        )]);

        assert!(directory.is_warehouse("WH-A"));
        assert!(!directory.is_warehouse("missing"));
    }

    #[test]
    fn test_warehouses_iterator_uses_qualification_rule() {
        let directory = LocationDirectory::new(&[
            location("A", "Jeddah WH 2", LocationType::Site, Region::West),
            location("B", "Site 9", LocationType::Site, Region::West),
        ]);

        let warehouses: Vec<_> = directory.warehouses().map(|l| l.location_id.as_str()).collect();
        assert_eq!(warehouses, vec!["A"]);
    }
}
