//! Warehouse name canonicalization table.
//!
//! The movement sheets spell the same physical warehouse several ways
//! ("Riyadh WH", "RIYADH WAREHOUSE", "Riyadh-WH1", ...). The ingestion
//! adapter collapses known variants into one canonical display name so
//! aggregations do not split a warehouse across spellings.
//!
//! The table is an immutable map keyed on the trimmed, lowercased variant.
//! It is injected into the ingestion adapter; this default covers the
//! variants seen in production exports.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Variant (lowercase) -> canonical display name.
pub static WAREHOUSE_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Central
    m.insert("riyadh warehouse", "Riyadh WH");
    m.insert("riyadh wh1", "Riyadh WH");
    m.insert("riyadh-wh", "Riyadh WH");
    m.insert("ryd wh", "Riyadh WH");
    m.insert("qassim warehouse", "Qassim WH");
    m.insert("qassim-wh", "Qassim WH");

    // West
    m.insert("jeddah warehouse", "Jeddah WH");
    m.insert("jeddah wh1", "Jeddah WH");
    m.insert("jeddah-wh", "Jeddah WH");
    m.insert("jed wh", "Jeddah WH");
    m.insert("makkah warehouse", "Makkah WH");
    m.insert("madinah warehouse", "Madinah WH");

    // East
    m.insert("dammam warehouse", "Dammam WH");
    m.insert("dammam-wh", "Dammam WH");
    m.insert("dmm wh", "Dammam WH");

    // South
    m.insert("abha warehouse", "Abha WH");
    m.insert("abha-wh", "Abha WH");
    m.insert("jizan warehouse", "Jizan WH");

    // North
    m.insert("tabuk warehouse", "Tabuk WH");
    m.insert("tabuk-wh", "Tabuk WH");
    m.insert("hail warehouse", "Hail WH");

    m
});

/// Canonical display name for a raw sheet cell: alias-table hit, else the
/// trimmed original.
pub fn canonical_name(raw: &str, aliases: &HashMap<&str, &str>) -> String {
    let trimmed = raw.trim();
    aliases
        .get(trimmed.to_lowercase().as_str())
        .map_or_else(|| trimmed.to_string(), |canonical| (*canonical).to_string())
}
