//! Test builders: ergonomic constructors for `RawRecord`s and catalogs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use exo_core::{normalize, Catalog, Planet, RawRecord};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for upstream [`RawRecord`] fixtures.
///
/// # Example
///
/// ```rust
/// let raw = RecordBuilder::new("Kepler-22 b", "Kepler-22")
///     .radius(2.1)
///     .distance_pc(195.0)
///     .method("Transit")
///     .build();
/// ```
pub struct RecordBuilder {
    record: RawRecord,
}

impl RecordBuilder {
    pub fn new(name: &str, host: &str) -> Self {
        Self { record: RawRecord::new().with("pl_name", name).with("hostname", host) }
    }

    pub fn radius(self, earth_radii: f64) -> Self {
        self.set("pl_rade", earth_radii)
    }

    pub fn mass(self, earth_masses: f64) -> Self {
        self.set("pl_bmasse", earth_masses)
    }

    pub fn density(self, g_cm3: f64) -> Self {
        self.set("pl_dens", g_cm3)
    }

    pub fn temperature(self, kelvin: f64) -> Self {
        self.set("pl_eqt", kelvin)
    }

    pub fn distance_pc(self, parsecs: f64) -> Self {
        self.set("sy_dist", parsecs)
    }

    pub fn period(self, days: f64) -> Self {
        self.set("pl_orbper", days)
    }

    pub fn spectral(self, spectral_type: &str) -> Self {
        self.set("st_spectype", spectral_type)
    }

    pub fn method(self, method: &str) -> Self {
        self.set("discoverymethod", method)
    }

    pub fn facility(self, facility: &str) -> Self {
        self.set("disc_facility", facility)
    }

    pub fn set(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.record = self.record.with(key, value);
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }

    pub fn planet(self) -> Planet {
        normalize(self.record)
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A catalog loaded with the normalised fixture archive.
pub fn fixture_catalog() -> Catalog {
    catalog_from(super::fixtures::archive_records())
}

pub fn catalog_from(records: Vec<RawRecord>) -> Catalog {
    let mut catalog = Catalog::new();
    catalog.set_planets(records.into_iter().map(normalize).collect());
    catalog
}

/// `n` synthetic records spread over `n / 4` hosts, alternating small and
/// giant planets.
pub fn build_archive(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            RecordBuilder::new(&format!("Synth-{} {}", i / 4, (b'b' + (i % 4) as u8) as char), &format!("Synth-{}", i / 4))
                .radius(if i % 2 == 0 { 1.1 } else { 9.5 })
                .temperature(150.0 + (i % 50) as f64 * 10.0)
                .distance_pc(5.0 + (i / 4) as f64)
                .period(1.0 + (i % 4) as f64 * 3.0)
                .method(if i % 3 == 0 { "Radial Velocity" } else { "Transit" })
                .build()
        })
        .collect()
}
