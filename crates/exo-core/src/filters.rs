//! Filter-control values and their lenient parsing.
//!
//! Controls arrive as optional strings, exactly as a text input would hold
//! them. Parsing never fails: a blank or unparseable value means "not
//! specified" and the documented default applies.

use crate::types::{Planet, System};
use serde::{Deserialize, Serialize};

/// Planet filter controls: `{type, tempMin, tempMax, distMax,
/// discoveryMethod, discoveryFacility}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanetFilters {
    #[serde(rename = "type")]
    pub planet_type: Option<String>,
    pub temp_min: Option<String>,
    pub temp_max: Option<String>,
    pub dist_max: Option<String>,
    pub discovery_method: Option<String>,
    pub discovery_facility: Option<String>,
}

/// System filter controls: `{minPlanets, distMax, spectralType}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemFilters {
    pub min_planets: Option<String>,
    pub dist_max: Option<String>,
    pub spectral_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsed criteria
// ---------------------------------------------------------------------------

/// [`PlanetFilters`] with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetCriteria {
    /// Lowercased type name; compared against [`PlanetType::as_str`](crate::PlanetType::as_str).
    pub planet_type: Option<String>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub dist_max: f64,
    pub discovery_method: Option<String>,
    pub discovery_facility: Option<String>,
}

impl PlanetFilters {
    pub fn criteria(&self) -> PlanetCriteria {
        PlanetCriteria {
            planet_type: lowered(&self.planet_type),
            temp_min: parse_number(&self.temp_min).unwrap_or(0.0),
            temp_max: parse_number(&self.temp_max).unwrap_or(f64::INFINITY),
            dist_max: parse_number(&self.dist_max).unwrap_or(f64::INFINITY),
            discovery_method: lowered(&self.discovery_method),
            discovery_facility: lowered(&self.discovery_facility),
        }
    }

    /// True when no control holds a value.
    pub fn is_empty(&self) -> bool {
        [
            &self.planet_type,
            &self.temp_min,
            &self.temp_max,
            &self.dist_max,
            &self.discovery_method,
            &self.discovery_facility,
        ]
        .into_iter()
        .all(|v| lowered(v).is_none())
    }
}

impl PlanetCriteria {
    pub fn matches(&self, planet: &Planet) -> bool {
        if let Some(t) = &self.planet_type {
            if planet.planet_type.as_str() != t {
                return false;
            }
        }
        if planet.temperature < self.temp_min || planet.temperature > self.temp_max {
            return false;
        }
        if planet.distance > self.dist_max {
            return false;
        }
        contains(&self.discovery_method, &planet.discovery_method)
            && contains(&self.discovery_facility, &planet.discovery_facility)
    }
}

/// [`SystemFilters`] with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemCriteria {
    pub min_planets: f64,
    pub dist_max: f64,
    /// First letter of the requested spectral type, uppercased.
    pub spectral_class: Option<char>,
}

impl SystemFilters {
    pub fn criteria(&self) -> SystemCriteria {
        SystemCriteria {
            min_planets: parse_number(&self.min_planets).unwrap_or(2.0),
            dist_max: parse_number(&self.dist_max).unwrap_or(f64::INFINITY),
            spectral_class: lowered(&self.spectral_type).and_then(|s| first_letter(&s)),
        }
    }
}

impl SystemCriteria {
    pub fn matches(&self, system: &System) -> bool {
        if (system.planet_count() as f64) < self.min_planets {
            return false;
        }
        if system.distance > self.dist_max {
            return false;
        }
        match self.spectral_class {
            None => true,
            Some(wanted) => system
                .spectral_type()
                .and_then(first_letter)
                .is_some_and(|have| have == wanted),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a control value as a number; blank, unparseable and NaN values are
/// "not specified".
pub fn parse_number(value: &Option<String>) -> Option<f64> {
    let n = value.as_deref()?.trim().parse::<f64>().ok()?;
    (!n.is_nan()).then_some(n)
}

fn lowered(value: &Option<String>) -> Option<String> {
    let v = value.as_deref()?.trim();
    (!v.is_empty()).then(|| v.to_lowercase())
}

fn first_letter(s: &str) -> Option<char> {
    s.trim().chars().next().map(|c| c.to_ascii_uppercase())
}

/// Substring filter: an unspecified needle matches everything, a specified
/// one never matches a missing haystack.
fn contains(needle: &Option<String>, haystack: &Option<String>) -> bool {
    match (needle, haystack) {
        (None, _) => true,
        (Some(n), Some(h)) => h.to_lowercase().contains(n.as_str()),
        (Some(_), None) => false,
    }
}
