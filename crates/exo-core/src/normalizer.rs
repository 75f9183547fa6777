//! Normalizer: turns a [`RawRecord`] into a bounded, classified [`Planet`].
//!
//! Normalisation runs in two steps. [`RawFields::parse`] maps every upstream
//! key onto a typed optional value (numbers may arrive as JSON numbers or as
//! numeric strings; anything else counts as absent). [`normalize`] then
//! applies defaults and clamps, and classifies the result.
//!
//! Neither step can fail: bad input degrades to defaults or `None`.

use crate::types::{Planet, PlanetType, RawRecord};
use serde_json::Value;

/// Parsec to light-year conversion factor.
pub const LY_PER_PARSEC: f64 = 3.26156;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Inclusive `(min, max)` range for a numeric field.
pub type Bound = (f64, f64);

pub const RADIUS: Bound = (0.1, 100.0);
pub const MASS: Bound = (0.01, 10_000.0);
pub const TEMPERATURE: Bound = (0.0, 10_000.0);
pub const DENSITY: Bound = (0.01, 50.0);
pub const DISTANCE: Bound = (0.0, f64::MAX);
pub const ORBITAL_PERIOD: Bound = (0.01, 1.0e7);
pub const SEMI_MAJOR_AXIS: Bound = (0.001, 10_000.0);
pub const ECCENTRICITY: Bound = (0.0, 0.99);
pub const INSOLATION: Bound = (0.0, 100_000.0);
pub const INCLINATION: Bound = (0.0, 180.0);
pub const PERIASTRON: Bound = (0.0, 360.0);
pub const STELLAR_TEMP: Bound = (500.0, 60_000.0);
pub const STELLAR_RADIUS: Bound = (0.01, 2_000.0);
pub const STELLAR_MASS: Bound = (0.01, 300.0);
pub const STELLAR_LUMINOSITY: Bound = (-10.0, 10.0);
pub const STELLAR_AGE: Bound = (0.0, 14.0);
pub const DISCOVERY_YEAR: (i32, i32) = (1900, 2100);

const DEFAULT_RADIUS: f64 = 1.0;
const DEFAULT_MASS: f64 = 1.0;
const DEFAULT_TEMPERATURE: f64 = 300.0;
const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// Parse step
// ---------------------------------------------------------------------------

/// Typed view of the upstream keys the normalizer understands. Values are
/// parsed but not yet clamped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub name: Option<String>,
    pub host_star: Option<String>,
    pub radius: Option<f64>,
    pub mass: Option<f64>,
    pub temperature: Option<f64>,
    pub density: Option<f64>,
    pub distance_pc: Option<f64>,
    pub orbital_period: Option<f64>,
    pub semi_major_axis: Option<f64>,
    pub eccentricity: Option<f64>,
    pub insolation: Option<f64>,
    pub inclination: Option<f64>,
    pub periastron: Option<f64>,
    pub stellar_temp: Option<f64>,
    pub stellar_radius: Option<f64>,
    pub stellar_mass: Option<f64>,
    pub stellar_luminosity: Option<f64>,
    pub spectral_type: Option<String>,
    pub stellar_age: Option<f64>,
    pub discovery_method: Option<String>,
    pub discovery_facility: Option<String>,
    pub discovery_year: Option<f64>,
    pub number_of_stars: Option<f64>,
    pub number_of_planets: Option<f64>,
}

impl RawFields {
    pub fn parse(raw: &RawRecord) -> Self {
        let num = |key: &str| raw.get(key).and_then(as_number);
        let text = |key: &str| raw.get(key).and_then(as_text);

        Self {
            name: text("pl_name"),
            host_star: text("hostname"),
            radius: num("pl_rade"),
            mass: num("pl_bmasse"),
            temperature: num("pl_eqt"),
            density: num("pl_dens"),
            distance_pc: num("sy_dist"),
            orbital_period: num("pl_orbper"),
            semi_major_axis: num("pl_orbsmax"),
            eccentricity: num("pl_orbeccen"),
            insolation: num("pl_insol"),
            inclination: num("pl_orbincl"),
            periastron: num("pl_orblper"),
            stellar_temp: num("st_teff"),
            stellar_radius: num("st_rad"),
            stellar_mass: num("st_mass"),
            stellar_luminosity: num("st_lum"),
            spectral_type: text("st_spectype"),
            stellar_age: num("st_age"),
            discovery_method: text("discoverymethod"),
            discovery_facility: text("disc_facility"),
            discovery_year: num("disc_year"),
            number_of_stars: num("sy_snum"),
            number_of_planets: num("sy_pnum"),
        }
    }
}

/// A finite number, from either a JSON number or a numeric string.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// A trimmed, non-empty string. Numbers are stringified so that e.g. a
/// numeric planet designation still yields a name.
fn as_text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Normalise one upstream record. Total: every input produces a valid
/// [`Planet`].
pub fn normalize(raw: RawRecord) -> Planet {
    let f = RawFields::parse(&raw);

    let radius = clamp(f.radius.unwrap_or(DEFAULT_RADIUS), RADIUS);
    let mass = clamp(f.mass.unwrap_or(DEFAULT_MASS), MASS);
    let temperature = clamp(f.temperature.unwrap_or(DEFAULT_TEMPERATURE), TEMPERATURE);
    let density = bounded(f.density, DENSITY);
    let distance = clamp(f.distance_pc.map_or(0.0, |pc| pc * LY_PER_PARSEC), DISTANCE);

    Planet {
        name: f.name.unwrap_or_else(|| UNKNOWN.to_string()),
        host_star: f.host_star.unwrap_or_else(|| UNKNOWN.to_string()),
        radius,
        mass,
        temperature,
        density,
        distance,
        orbital_period: bounded(f.orbital_period, ORBITAL_PERIOD),
        semi_major_axis: bounded(f.semi_major_axis, SEMI_MAJOR_AXIS),
        orbital_eccentricity: bounded(f.eccentricity, ECCENTRICITY),
        insolation_flux: bounded(f.insolation, INSOLATION),
        orbital_inclination: bounded(f.inclination, INCLINATION),
        longitude_of_periastron: bounded(f.periastron, PERIASTRON),
        stellar_temp: bounded(f.stellar_temp, STELLAR_TEMP),
        stellar_radius: bounded(f.stellar_radius, STELLAR_RADIUS),
        stellar_mass: bounded(f.stellar_mass, STELLAR_MASS),
        stellar_luminosity: bounded(f.stellar_luminosity, STELLAR_LUMINOSITY),
        spectral_type: f.spectral_type,
        stellar_age: bounded(f.stellar_age, STELLAR_AGE),
        discovery_method: f.discovery_method,
        discovery_facility: f.discovery_facility,
        discovery_year: f
            .discovery_year
            .map(|y| (y.round() as i32).clamp(DISCOVERY_YEAR.0, DISCOVERY_YEAR.1)),
        number_of_stars: count(f.number_of_stars),
        number_of_planets: count(f.number_of_planets),
        planet_type: classify(density, radius),
        raw,
    }
}

fn clamp(value: f64, (min, max): Bound) -> f64 {
    value.clamp(min, max)
}

fn bounded(value: Option<f64>, bound: Bound) -> Option<f64> {
    value.map(|v| clamp(v, bound))
}

/// System cardinality: at least one, saturating at `u32::MAX`.
fn count(value: Option<f64>) -> u32 {
    match value {
        Some(n) if n >= 1.0 => n.round().min(u32::MAX as f64) as u32,
        _ => 1,
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify by density when known, otherwise by radius.
///
/// The density bands overlap: `[1.0, 2.5]` is tested before `< 1.5`, so a
/// density in `[1.0, 1.5)` is a Neptune. Densities in `(2.5, 3.5]` match no
/// density band and fall through to the radius bands.
pub fn classify(density: Option<f64>, radius: f64) -> PlanetType {
    if let Some(d) = density {
        if d > 3.5 {
            return if radius < 1.5 {
                PlanetType::Terrestrial
            } else {
                PlanetType::SuperEarth
            };
        }
        if (1.0..=2.5).contains(&d) {
            return PlanetType::Neptune;
        }
        if d < 1.5 {
            return PlanetType::Jupiter;
        }
    }

    match radius {
        r if r < 1.25 => PlanetType::Terrestrial,
        r if r < 2.0 => PlanetType::SuperEarth,
        r if r < 4.0 => PlanetType::Neptune,
        _ => PlanetType::Jupiter,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case::dense_small(Some(5.5), 1.0, PlanetType::Terrestrial)]
    #[case::dense_large(Some(5.5), 1.5, PlanetType::SuperEarth)]
    #[case::overlap_band(Some(1.2), 3.0, PlanetType::Neptune)]
    #[case::neptune_upper_edge(Some(2.5), 0.5, PlanetType::Neptune)]
    #[case::fluffy(Some(0.7), 11.0, PlanetType::Jupiter)]
    #[case::gap_falls_to_radius(Some(3.0), 1.0, PlanetType::Terrestrial)]
    #[case::gap_upper_edge(Some(3.5), 5.0, PlanetType::Jupiter)]
    #[case::radius_terrestrial(None, 1.2, PlanetType::Terrestrial)]
    #[case::radius_super_earth(None, 1.25, PlanetType::SuperEarth)]
    #[case::radius_neptune(None, 2.0, PlanetType::Neptune)]
    #[case::radius_jupiter(None, 4.0, PlanetType::Jupiter)]
    fn classification_bands(
        #[case] density: Option<f64>,
        #[case] radius: f64,
        #[case] expected: PlanetType,
    ) {
        assert_eq!(classify(density, radius), expected);
    }

    #[test]
    fn empty_record_gets_defaults() {
        let p = normalize(RawRecord::new());
        assert_eq!(p.name, "Unknown");
        assert_eq!(p.host_star, "Unknown");
        assert_eq!(p.radius, 1.0);
        assert_eq!(p.mass, 1.0);
        assert_eq!(p.temperature, 300.0);
        assert_eq!(p.density, None);
        assert_eq!(p.distance, 0.0);
        assert_eq!(p.number_of_planets, 1);
        assert_eq!(p.number_of_stars, 1);
        assert_eq!(p.planet_type, PlanetType::Terrestrial);
    }

    #[test]
    fn parsecs_become_light_years() {
        let p = normalize(record(json!({ "sy_dist": 10.0 })));
        assert!((p.distance - 32.6156).abs() < 1e-9);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let p = normalize(record(json!({ "pl_rade": "2.5", "disc_year": "2014" })));
        assert_eq!(p.radius, 2.5);
        assert_eq!(p.discovery_year, Some(2014));
    }

    #[test]
    fn garbage_values_count_as_absent() {
        let p = normalize(record(json!({
            "pl_name": "   ",
            "pl_rade": "big",
            "pl_dens": true,
            "st_spectype": null,
        })));
        assert_eq!(p.name, "Unknown");
        assert_eq!(p.radius, 1.0);
        assert_eq!(p.density, None);
        assert_eq!(p.spectral_type, None);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let p = normalize(record(json!({
            "pl_rade": 1e9,
            "pl_bmasse": -5,
            "pl_eqt": 20000,
            "pl_dens": 0.0,
            "sy_dist": -3,
            "pl_orbeccen": 1.4,
        })));
        assert_eq!(p.radius, 100.0);
        assert_eq!(p.mass, 0.01);
        assert_eq!(p.temperature, 10_000.0);
        assert_eq!(p.density, Some(0.01));
        assert_eq!(p.distance, 0.0);
        assert_eq!(p.orbital_eccentricity, Some(0.99));
    }

    #[test]
    fn raw_record_is_preserved() {
        let raw = record(json!({ "pl_name": "Kepler-90 h", "custom": [1, 2] }));
        let p = normalize(raw.clone());
        assert_eq!(p.raw, raw);
    }
}
