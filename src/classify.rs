//! Movement Classification
//!
//! Assigns each movement a `Full`/`Half`/`Zero` category from its endpoint
//! locations, and enriches whole batches while preserving source-supplied
//! classifications.
//!
//! The rule table is deterministic and total - every movement gets a value,
//! nothing throws:
//!
//! | From      | To        | Category |
//! |-----------|-----------|----------|
//! | missing   | any       | Zero     |
//! | any       | missing   | Zero     |
//! | Site      | Site      | Full     |
//! | Warehouse | Site      | Half     |
//! | Site      | Warehouse | Half     |
//! | Warehouse | Warehouse | Zero     |

use crate::directory::LocationDirectory;
use crate::models::{Movement, MovementType};

/// Classify a single movement from its endpoints. Missing endpoints fall
/// through to the conservative `Zero` default.
pub fn classify(movement: &Movement, directory: &LocationDirectory) -> MovementType {
    let (Some(from), Some(to)) = (
        directory.get(&movement.from_location_id),
        directory.get(&movement.to_location_id),
    ) else {
        return MovementType::Zero;
    };

    match (from.is_warehouse(), to.is_warehouse()) {
        (false, false) => MovementType::Full,
        (true, true) => MovementType::Zero,
        _ => MovementType::Half,
    }
}

/// Apply the classifier across a batch, returning a new vector.
///
/// A movement that already carries a `movement_type` is copied through
/// unchanged - the source-supplied classification wins. `distance_km` always
/// passes through verbatim; the supplied value reflects real-world routing,
/// not great-circle distance.
pub fn enrich(movements: &[Movement], directory: &LocationDirectory) -> Vec<Movement> {
    movements
        .iter()
        .map(|movement| {
            let mut enriched = movement.clone();
            if enriched.movement_type.is_none() {
                enriched.movement_type = Some(classify(movement, directory));
            }
            enriched
        })
        .collect()
}
