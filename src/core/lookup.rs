//! Enumeration mapping tables.
//!
//! Free-text categorical cells map to the small integer codes the firmware
//! stores. Lookups uppercase the key first and never fail: unrecognized
//! text maps to a named fallback code so a build always succeeds.

use tracing::warn;

/// Plant category codes. Must stay in step with the firmware enum.
const CATEGORY_TABLE: &[(&str, u8)] = &[
    ("AGRICULTURE", 0),
    ("VEGETABLES", 1),
    ("FRUITS", 2),
    ("HERBS", 3),
    ("ORNAMENTAL", 4),
    ("TREES", 5),
    ("HOUSEPLANTS", 6),
    ("LAWNS", 7),
];

/// Drought tolerance codes.
const TOLERANCE_TABLE: &[(&str, u8)] = &[
    ("LOW", 0),
    ("MED", 1),
    ("MEDIUM", 1),
    ("HIGH", 2),
    ("VHIGH", 3),
];

/// Irrigation method codes.
const METHOD_TABLE: &[(&str, u8)] = &[
    ("DRIP", 0),
    ("DRIP_PC", 1),
    ("SPRINKLER", 2),
    ("SURFACE", 3),
    ("FLOOD", 4),
    ("MICRO_SPRAY", 5),
    ("SUBSURFACE", 6),
    ("MANUAL", 7),
];

/// Code for a blank or unrecognized category cell (Agriculture).
pub const FALLBACK_CATEGORY: u8 = 0;
/// Code for a blank or unrecognized drought tolerance cell (MED).
pub const FALLBACK_TOLERANCE: u8 = 1;
/// Code for a blank or unrecognized irrigation method cell (DRIP).
pub const FALLBACK_METHOD: u8 = 0;

pub fn category_code(raw: &str) -> u8 {
    lookup(CATEGORY_TABLE, raw, FALLBACK_CATEGORY, "category")
}

pub fn tolerance_code(raw: &str) -> u8 {
    lookup(TOLERANCE_TABLE, raw, FALLBACK_TOLERANCE, "drought tolerance")
}

pub fn method_code(raw: &str) -> u8 {
    lookup(METHOD_TABLE, raw, FALLBACK_METHOD, "irrigation method")
}

fn lookup(table: &[(&str, u8)], raw: &str, fallback: u8, kind: &str) -> u8 {
    let key = raw.trim().to_ascii_uppercase();
    if key.is_empty() {
        return fallback;
    }
    match table.iter().find(|(name, _)| *name == key) {
        Some((_, code)) => *code,
        None => {
            warn!("unrecognized {} '{}', using fallback code {}", kind, key, fallback);
            fallback
        }
    }
}
