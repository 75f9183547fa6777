//! Domain-specific assertions for exoscope harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! catalog or normalizer invariant broke.

use exo_core::normalizer::{self, Bound};
use exo_core::{Planet, SearchResult};

// ---------------------------------------------------------------------------
// Result-list assertions
// ---------------------------------------------------------------------------

/// Display names of a result list, in order.
pub fn names(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(SearchResult::name).collect()
}

/// Assert the display names of a unified result list, in order.
///
/// ```rust
/// assert_names!(catalog.search_unified(""), ["TRAPPIST-1", "Kepler-90", "Earth"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($results:expr, [$($name:expr),* $(,)?]) => {{
        let results = $results;
        let actual: Vec<&str> = results.iter().map(exo_core::SearchResult::name).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "unified result order");
    }};
}

/// Assert the names of a plain planet list, in order.
#[macro_export]
macro_rules! assert_planet_names {
    ($planets:expr, [$($name:expr),* $(,)?]) => {{
        let planets = &$planets;
        let actual: Vec<&str> = planets.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "planet list");
    }};
}

/// Assert that systems precede standalone planets and each group is sorted
/// by ascending distance.
pub fn assert_unified_ordering(results: &[SearchResult]) {
    let split = results
        .iter()
        .position(|r| matches!(r, SearchResult::Planet(_)))
        .unwrap_or(results.len());
    assert!(
        results[split..].iter().all(|r| matches!(r, SearchResult::Planet(_))),
        "system entry after a standalone planet: {:?}",
        names(results)
    );
    for group in [&results[..split], &results[split..]] {
        for pair in group.windows(2) {
            assert!(
                pair[0].distance() <= pair[1].distance(),
                "{} ({}) sorted before {} ({})",
                pair[0].name(),
                pair[0].distance(),
                pair[1].name(),
                pair[1].distance()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Normalizer invariants
// ---------------------------------------------------------------------------

fn check(name: &str, field: &str, value: f64, (min, max): Bound) {
    assert!(
        (min..=max).contains(&value),
        "{name}: {field} = {value} outside [{min}, {max}]"
    );
}

fn check_opt(name: &str, field: &str, value: Option<f64>, bound: Bound) {
    if let Some(v) = value {
        check(name, field, v, bound);
    }
}

/// Assert every numeric field of a normalised planet is within its bound and
/// the identity fields are non-empty.
pub fn assert_within_bounds(p: &Planet) {
    assert!(!p.name.is_empty(), "empty name: {p:?}");
    assert!(!p.host_star.is_empty(), "empty host star: {p:?}");
    assert!(p.number_of_stars >= 1 && p.number_of_planets >= 1);

    let n = p.name.as_str();
    check(n, "radius", p.radius, normalizer::RADIUS);
    check(n, "mass", p.mass, normalizer::MASS);
    check(n, "temperature", p.temperature, normalizer::TEMPERATURE);
    check(n, "distance", p.distance, normalizer::DISTANCE);
    check_opt(n, "density", p.density, normalizer::DENSITY);
    check_opt(n, "orbital_period", p.orbital_period, normalizer::ORBITAL_PERIOD);
    check_opt(n, "semi_major_axis", p.semi_major_axis, normalizer::SEMI_MAJOR_AXIS);
    check_opt(n, "eccentricity", p.orbital_eccentricity, normalizer::ECCENTRICITY);
    check_opt(n, "insolation", p.insolation_flux, normalizer::INSOLATION);
    check_opt(n, "inclination", p.orbital_inclination, normalizer::INCLINATION);
    check_opt(n, "periastron", p.longitude_of_periastron, normalizer::PERIASTRON);
    check_opt(n, "stellar_temp", p.stellar_temp, normalizer::STELLAR_TEMP);
    check_opt(n, "stellar_radius", p.stellar_radius, normalizer::STELLAR_RADIUS);
    check_opt(n, "stellar_mass", p.stellar_mass, normalizer::STELLAR_MASS);
    check_opt(n, "stellar_luminosity", p.stellar_luminosity, normalizer::STELLAR_LUMINOSITY);
    check_opt(n, "stellar_age", p.stellar_age, normalizer::STELLAR_AGE);
    if let Some(year) = p.discovery_year {
        assert!(
            (normalizer::DISCOVERY_YEAR.0..=normalizer::DISCOVERY_YEAR.1).contains(&year),
            "{n}: discovery_year = {year}"
        );
    }
}
