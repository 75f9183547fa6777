//! Catalog: the in-memory planet collection with search and filtering.
//!
//! The catalog is the single source of truth for the session: the front end
//! reads from it, never from the ingestor directly. It holds
//!
//! - the full ordered collection, with the reference entry ([`Planet::earth`])
//!   first,
//! - the currently filtered subset,
//! - a one-entry cache of the last unified search.
//!
//! Every mutator bumps a generation counter; the cache entry records the
//! generation it was computed under and is only reused when both the
//! generation and the normalised query match.

use crate::filters::{PlanetFilters, SystemFilters};
use crate::types::{Planet, PlanetEntry, PlanetType, SearchResult, System, SystemEntry};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

/// Minimum member count for a notable system.
pub const NOTABLE_MIN_PLANETS: usize = 3;

/// Shared result of [`Catalog::search_unified`]. Cache hits hand out clones of
/// the same `Arc`.
pub type UnifiedResults = Arc<[SearchResult]>;

struct CacheEntry {
    generation: u64,
    key: String,
    results: UnifiedResults,
}

/// Counts shown in the status bar and headless output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total: usize,
    pub filtered: usize,
    pub notable_systems: usize,
    pub by_type: Vec<(PlanetType, usize)>,
}

pub struct Catalog {
    planets: Vec<Arc<Planet>>,
    filtered: Vec<Arc<Planet>>,
    generation: u64,
    cache: Option<CacheEntry>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// A catalog holding only the reference entry.
    pub fn new() -> Self {
        let planets = vec![Arc::new(Planet::earth())];
        Self {
            filtered: planets.clone(),
            planets,
            generation: 0,
            cache: None,
            loaded_at: None,
        }
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Replace the collection. The reference entry is prepended, the
    /// filtered subset reset and the search cache invalidated.
    pub fn set_planets(&mut self, planets: Vec<Planet>) {
        let mut all = Vec::with_capacity(planets.len() + 1);
        all.push(Arc::new(Planet::earth()));
        all.extend(planets.into_iter().map(Arc::new));

        self.filtered = all.clone();
        self.planets = all;
        self.loaded_at = Some(Utc::now());
        self.invalidate();
        tracing::info!(planets = self.planets.len(), "catalog loaded");
    }

    /// Filter the full collection. The result becomes the filtered subset.
    pub fn apply_filters(&mut self, filters: &PlanetFilters) -> Vec<Arc<Planet>> {
        let criteria = filters.criteria();
        self.filtered = self
            .planets
            .iter()
            .filter(|p| criteria.matches(p))
            .cloned()
            .collect();
        self.invalidate();
        tracing::debug!(
            criteria = ?criteria,
            matched = self.filtered.len(),
            "filters applied"
        );
        self.filtered.clone()
    }

    /// Reset the filtered subset to the full collection.
    pub fn clear_filters(&mut self) {
        self.filtered = self.planets.clone();
        self.invalidate();
        tracing::debug!("filters cleared");
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.cache = None;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn planets(&self) -> &[Arc<Planet>] {
        &self.planets
    }

    pub fn filtered(&self) -> &[Arc<Planet>] {
        &self.filtered
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Case-insensitive substring search on name or host star over the full
    /// collection. A blank query returns the full collection.
    pub fn search(&self, query: &str) -> Vec<Arc<Planet>> {
        let needle = normalise_query(query);
        if needle.is_empty() {
            return self.planets.clone();
        }
        self.planets
            .iter()
            .filter(|p| p.matches_text(&needle))
            .cloned()
            .collect()
    }

    /// Group the filtered subset (narrowed by `query` when non-blank) into
    /// systems and standalone planets.
    ///
    /// Systems come first, nearest first, followed by standalone planets,
    /// nearest first. Repeating a query with no mutation in between returns
    /// the same `Arc`.
    pub fn search_unified(&mut self, query: &str) -> UnifiedResults {
        let key = normalise_query(query);

        if let Some(entry) = &self.cache {
            if entry.generation == self.generation && entry.key == key {
                tracing::debug!(query = %key, "unified search cache hit");
                return entry.results.clone();
            }
        }

        let matching: Vec<Arc<Planet>> = if key.is_empty() {
            self.filtered.clone()
        } else {
            self.filtered
                .iter()
                .filter(|p| p.matches_text(&key))
                .cloned()
                .collect()
        };

        let mut systems = Vec::new();
        let mut standalone = Vec::new();
        for (star_name, planets) in group_by_host(&matching) {
            if planets.len() >= 2 {
                systems.push(system_entry(star_name, planets));
            } else {
                let planet = planets[0].clone();
                standalone.push(PlanetEntry {
                    planet,
                    system_data: System::new(star_name, planets),
                });
            }
        }
        systems.sort_by(|a, b| by_distance(a.distance, b.distance));
        standalone.sort_by(|a, b| by_distance(a.planet.distance, b.planet.distance));

        let results: UnifiedResults = systems
            .into_iter()
            .map(SearchResult::System)
            .chain(standalone.into_iter().map(SearchResult::Planet))
            .collect();

        tracing::debug!(query = %key, results = results.len(), "unified search computed");
        self.cache = Some(CacheEntry {
            generation: self.generation,
            key,
            results: results.clone(),
        });
        results
    }

    /// Hosts with at least [`NOTABLE_MIN_PLANETS`] planets, largest first.
    /// Recomputed from the full collection on every call.
    pub fn notable_systems(&self) -> Vec<System> {
        let mut systems: Vec<System> = group_by_host(&self.planets)
            .into_iter()
            .filter(|(_, planets)| planets.len() >= NOTABLE_MIN_PLANETS)
            .map(|(star, planets)| System::new(star, planets))
            .collect();
        systems.sort_by(|a, b| b.planet_count().cmp(&a.planet_count()));
        systems
    }

    /// Filter the notable systems and return them as unified `system` entries.
    pub fn apply_system_filters(&self, filters: &SystemFilters) -> Vec<SearchResult> {
        let criteria = filters.criteria();
        let results: Vec<SearchResult> = self
            .notable_systems()
            .into_iter()
            .filter(|s| criteria.matches(s))
            .map(|s| SearchResult::System(system_entry(s.star_name, s.planets)))
            .collect();
        tracing::debug!(criteria = ?criteria, matched = results.len(), "system filters applied");
        results
    }

    /// Uniformly pick a planet from the filtered subset.
    pub fn random_planet(&self) -> Option<Arc<Planet>> {
        self.random_planet_with(&mut rand::rng())
    }

    pub fn random_planet_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<Planet>> {
        if self.filtered.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.filtered.len());
        Some(self.filtered[idx].clone())
    }

    pub fn summary(&self) -> CatalogSummary {
        let by_type = PlanetType::ALL
            .into_iter()
            .map(|t| (t, self.filtered.iter().filter(|p| p.planet_type == t).count()))
            .collect();
        CatalogSummary {
            total: self.planets.len(),
            filtered: self.filtered.len(),
            notable_systems: self.notable_systems().len(),
            by_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalise_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Group planets by host star, preserving first-seen host order and member
/// order.
fn group_by_host(planets: &[Arc<Planet>]) -> Vec<(String, Vec<Arc<Planet>>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Arc<Planet>>)> = Vec::new();
    for planet in planets {
        match index.get(planet.host_star.as_str()) {
            Some(&i) => groups[i].1.push(planet.clone()),
            None => {
                index.insert(planet.host_star.as_str(), groups.len());
                groups.push((planet.host_star.clone(), vec![planet.clone()]));
            }
        }
    }
    groups
}

fn system_entry(star_name: String, mut planets: Vec<Arc<Planet>>) -> SystemEntry {
    planets.sort_by(|a, b| by_orbit(a, b));
    let system = System::new(star_name, planets);
    SystemEntry {
        planet_count: system.planet_count(),
        distance: system.distance,
        star_name: system.star_name,
        planets: system.planets,
    }
}

/// Orbital period ascending with unknown periods last, then name.
fn by_orbit(a: &Planet, b: &Planet) -> Ordering {
    let period = match (a.orbital_period, b.orbital_period) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    period.then_with(|| a.name.cmp(&b.name))
}

fn by_distance(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
