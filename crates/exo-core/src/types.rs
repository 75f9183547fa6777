//! Core types for exo-core.
//!
//! This module defines the fundamental data structures shared across all
//! architectural layers: the raw upstream [`RawRecord`], the normalised
//! [`Planet`], its derived [`PlanetType`], and the derived [`System`] view.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One record exactly as the archive proxy returned it.
///
/// Keys follow the upstream TAP schema (`pl_name`, `pl_rade`, `hostname`,
/// `sy_dist`, …). The map is kept untouched on the normalised [`Planet`] so
/// that nothing the archive sent is lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub serde_json::Map<String, serde_json::Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an upstream key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Builder-style insert, mostly useful for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for RawRecord {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

/// Planet classification derived from density and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanetType {
    Terrestrial,
    SuperEarth,
    Neptune,
    Jupiter,
}

impl PlanetType {
    pub const ALL: [PlanetType; 4] = [
        PlanetType::Terrestrial,
        PlanetType::SuperEarth,
        PlanetType::Neptune,
        PlanetType::Jupiter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlanetType::Terrestrial => "terrestrial",
            PlanetType::SuperEarth => "super-earth",
            PlanetType::Neptune => "neptune",
            PlanetType::Jupiter => "jupiter",
        }
    }
}

impl std::fmt::Display for PlanetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlanetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        PlanetType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("unknown planet type: {s}"))
    }
}

/// A normalised exoplanet produced by the normalizer and held by the catalog.
///
/// Every numeric field is either `None` or within its documented bound, and
/// `name` / `host_star` are never empty. Instances are shared as
/// `Arc<Planet>` and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub name: String,
    pub host_star: String,

    /// Earth radii, 0.1–100.
    pub radius: f64,
    /// Earth masses, 0.01–10000.
    pub mass: f64,
    /// Equilibrium temperature in Kelvin, 0–10000.
    pub temperature: f64,
    /// g/cm³, 0.01–50.
    pub density: Option<f64>,
    /// Light-years from the Sun, never negative.
    pub distance: f64,

    pub orbital_period: Option<f64>,
    pub semi_major_axis: Option<f64>,
    pub orbital_eccentricity: Option<f64>,
    pub insolation_flux: Option<f64>,
    pub orbital_inclination: Option<f64>,
    pub longitude_of_periastron: Option<f64>,

    pub stellar_temp: Option<f64>,
    pub stellar_radius: Option<f64>,
    pub stellar_mass: Option<f64>,
    /// log10 of the luminosity in solar units, as the archive reports it.
    pub stellar_luminosity: Option<f64>,
    pub spectral_type: Option<String>,
    pub stellar_age: Option<f64>,

    pub discovery_method: Option<String>,
    pub discovery_facility: Option<String>,
    pub discovery_year: Option<i32>,

    pub number_of_stars: u32,
    pub number_of_planets: u32,

    #[serde(rename = "type")]
    pub planet_type: PlanetType,

    #[serde(skip_serializing)]
    pub raw: RawRecord,
}

impl Planet {
    /// The synthetic "home" entry prepended to every catalog.
    pub fn earth() -> Self {
        Planet {
            name: "Earth".to_string(),
            host_star: "Sun".to_string(),
            radius: 1.0,
            mass: 1.0,
            temperature: 255.0,
            density: Some(5.51),
            distance: 0.0,
            orbital_period: Some(365.256),
            semi_major_axis: Some(1.0),
            orbital_eccentricity: Some(0.0167),
            insolation_flux: Some(1.0),
            orbital_inclination: Some(0.0),
            longitude_of_periastron: Some(102.9),
            stellar_temp: Some(5772.0),
            stellar_radius: Some(1.0),
            stellar_mass: Some(1.0),
            stellar_luminosity: Some(0.0),
            spectral_type: Some("G2V".to_string()),
            stellar_age: Some(4.6),
            discovery_method: None,
            discovery_facility: None,
            discovery_year: None,
            number_of_stars: 1,
            number_of_planets: 8,
            planet_type: PlanetType::Terrestrial,
            raw: RawRecord::new(),
        }
    }

    /// Case-insensitive substring match on name or host star. `needle` must
    /// already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.host_star.to_lowercase().contains(needle)
    }
}

/// Planets sharing a host star. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub star_name: String,
    pub planets: Vec<Arc<Planet>>,
    /// Mean of the positive member distances, or the first member's distance
    /// when none is positive.
    pub distance: f64,
}

impl System {
    pub fn new(star_name: impl Into<String>, planets: Vec<Arc<Planet>>) -> Self {
        let distance = mean_distance(&planets);
        Self { star_name: star_name.into(), planets, distance }
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    /// Spectral type of the first member that reports one.
    pub fn spectral_type(&self) -> Option<&str> {
        self.planets.iter().find_map(|p| p.spectral_type.as_deref())
    }
}

fn mean_distance(planets: &[Arc<Planet>]) -> f64 {
    let positive: Vec<f64> = planets.iter().map(|p| p.distance).filter(|d| *d > 0.0).collect();
    if positive.is_empty() {
        planets.first().map(|p| p.distance).unwrap_or(0.0)
    } else {
        positive.iter().sum::<f64>() / positive.len() as f64
    }
}

/// Entry in the unified system/standalone-planet view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    System(SystemEntry),
    Planet(PlanetEntry),
}

impl SearchResult {
    pub fn distance(&self) -> f64 {
        match self {
            SearchResult::System(s) => s.distance,
            SearchResult::Planet(p) => p.planet.distance,
        }
    }

    /// Display name: the star for systems, the planet otherwise.
    pub fn name(&self) -> &str {
        match self {
            SearchResult::System(s) => &s.star_name,
            SearchResult::Planet(p) => &p.planet.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemEntry {
    pub star_name: String,
    pub planet_count: usize,
    pub distance: f64,
    pub planets: Vec<Arc<Planet>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetEntry {
    pub planet: Arc<Planet>,
    pub system_data: System,
}
