//! Static archive fixtures used across harnesses.
//!
//! [`archive_json`] mirrors the shape of the archive proxy's response: a
//! top-level array of TAP records. Distances are in parsecs, as upstream
//! reports them.

use exo_core::RawRecord;
use serde_json::{json, Value};

/// Kepler-90 (3 members, notable), TRAPPIST-1 (2 members), and two
/// single-planet hosts.
pub fn archive_json() -> Value {
    json!([
        {
            "pl_name": "Kepler-90 b", "hostname": "Kepler-90",
            "pl_rade": 1.31, "pl_eqt": 1060, "pl_orbper": 7.008151,
            "sy_dist": 855.0, "st_spectype": "G0V", "st_teff": 6080,
            "discoverymethod": "Transit", "disc_facility": "Kepler", "disc_year": 2013,
            "sy_snum": 1, "sy_pnum": 8
        },
        {
            "pl_name": "Kepler-90 c", "hostname": "Kepler-90",
            "pl_rade": 1.18, "pl_eqt": 993, "pl_orbper": 8.719375,
            "sy_dist": 855.0, "st_spectype": "G0V",
            "discoverymethod": "Transit", "disc_facility": "Kepler", "disc_year": 2013,
            "sy_snum": 1, "sy_pnum": 8
        },
        {
            "pl_name": "Kepler-90 h", "hostname": "Kepler-90",
            "pl_rade": 11.3, "pl_eqt": 292, "pl_orbper": 331.60059,
            "sy_dist": 855.0, "st_spectype": "G0V",
            "discoverymethod": "Transit", "disc_facility": "Kepler", "disc_year": 2013,
            "sy_snum": 1, "sy_pnum": 8
        },
        {
            "pl_name": "TRAPPIST-1 e", "hostname": "TRAPPIST-1",
            "pl_rade": 0.92, "pl_bmasse": 0.692, "pl_dens": 4.9, "pl_eqt": 250,
            "pl_orbper": 6.101013, "sy_dist": 12.43, "st_spectype": "M8V",
            "discoverymethod": "Transit", "disc_facility": "Transiting Planets and Planetesimals Small Telescope (TRAPPIST)",
            "disc_year": 2017, "sy_pnum": 7
        },
        {
            "pl_name": "TRAPPIST-1 f", "hostname": "TRAPPIST-1",
            "pl_rade": 1.045, "pl_bmasse": 1.039, "pl_dens": 4.3, "pl_eqt": 219,
            "pl_orbper": 9.20754, "sy_dist": 12.43, "st_spectype": "M8V",
            "discoverymethod": "Transit", "disc_facility": "Transiting Planets and Planetesimals Small Telescope (TRAPPIST)",
            "disc_year": 2017, "sy_pnum": 7
        },
        {
            "pl_name": "51 Peg b", "hostname": "51 Peg",
            "pl_rade": "13.0", "pl_bmasse": 146.0, "pl_eqt": 1284,
            "pl_orbper": 4.230785, "sy_dist": 15.47, "st_spectype": "G2IV",
            "discoverymethod": "Radial Velocity", "disc_facility": "Haute-Provence Observatory",
            "disc_year": 1995
        },
        {
            "pl_name": "Proxima Cen b", "hostname": "Proxima Cen",
            "pl_rade": 1.07, "pl_bmasse": 1.07, "pl_eqt": 234,
            "pl_orbper": 11.18427, "sy_dist": 1.30119, "st_spectype": "M5.5 V",
            "discoverymethod": "Radial Velocity", "disc_facility": "European Southern Observatory",
            "disc_year": 2016, "sy_snum": 3
        }
    ])
}

pub fn archive_records() -> Vec<RawRecord> {
    serde_json::from_value(archive_json()).unwrap()
}

/// Unified order of the full fixture catalog: systems nearest first, then
/// standalone planets nearest first.
pub const UNIFIED_ORDER: &[&str] = &["TRAPPIST-1", "Kepler-90", "Earth", "Proxima Cen b", "51 Peg b"];

/// Records that exercise every fallback path in the normalizer.
pub fn malformed_records() -> Vec<RawRecord> {
    serde_json::from_value(json!([
        {},
        { "pl_name": "", "hostname": "   " },
        { "pl_name": 42, "pl_rade": "wide", "pl_bmasse": null, "sy_dist": -12 },
        { "pl_name": "Overflow", "pl_rade": 1.0e9, "pl_eqt": -40, "pl_orbeccen": 1.7, "disc_year": 1492 },
        { "pl_name": "Nested", "pl_rade": { "value": 2 }, "st_spectype": ["K"] }
    ]))
    .unwrap()
}
