//! exo-core: exoscope core library.
//!
//! This crate exposes the pipeline layers that do not touch the network or
//! the terminal, plus the shared types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! Ingestor ──► Catalog ──► Coordinator ──► UI
//!    │
//!    └── normalizer (RawRecord → Planet)
//! ```
//!
//! The ingestor lives in `exo-archive` and the coordinator in `exo-tui`;
//! both drive the types defined here on a single thread.

pub mod catalog;
pub mod config;
pub mod filters;
pub mod normalizer;
pub mod types;

pub use catalog::{Catalog, CatalogSummary, UnifiedResults};
pub use filters::{PlanetFilters, SystemFilters};
pub use normalizer::normalize;
pub use types::{Planet, PlanetEntry, PlanetType, RawRecord, SearchResult, System, SystemEntry};
