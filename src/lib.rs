//! exoscope: browse the NASA Exoplanet Archive from the terminal.
//!
//! The pipeline is split across workspace crates; this crate wires them into
//! the `exoscope` binary and exposes headless mode for scripts and tests.
//!
//! # Architecture
//!
//! ```text
//! ArchiveSource ──► Ingestor ──► Catalog ──► SearchCoordinator ──► UI / headless
//!                      │
//!                      └── normalizer (RawRecord → Planet)
//! ```
//!
//! | Crate | Layer |
//! |-------|-------|
//! | `exo-core` | types, normalizer, catalog, filters, config |
//! | `exo-archive` | HTTP and file sources, batch ingestor |
//! | `exo-tui` | search coordinator, ratatui front end |
//!
//! Everything runs on one thread: ingestion and debounce timers are
//! `spawn_local` tasks on a [`tokio::task::LocalSet`].

pub mod headless;

pub use exo_archive::{AnySource, ArchiveError, ArchiveSource, FileSource, HttpSource, Ingestor};
pub use exo_core::{Catalog, Planet, PlanetFilters, PlanetType, RawRecord, SearchResult, SystemFilters};
