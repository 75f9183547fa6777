//! Headless mode: one ingestion run, one filtered render, printed to stdout.
//!
//! Drives the same [`Ingestor`] and [`SearchCoordinator`] as the terminal UI,
//! so scripts see exactly what the results pane would show.

use exo_archive::{ArchiveError, ArchiveSource, Callbacks, Ingestor};
use exo_core::config::IngestConfig;
use exo_core::{Catalog, CatalogSummary, Planet, PlanetFilters, SearchResult, SystemFilters, UnifiedResults};
use exo_tui::{FilterControls, FilterMode, SearchCoordinator};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything headless mode needs besides the source.
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub query: String,
    pub planet_filters: PlanetFilters,
    pub system_filters: SystemFilters,
    pub mode: FilterMode,
    pub format: OutputFormat,
}

impl FilterControls for HeadlessOptions {
    fn query(&self) -> String {
        self.query.clone()
    }
    fn planet_filters(&self) -> PlanetFilters {
        self.planet_filters.clone()
    }
    fn system_filters(&self) -> SystemFilters {
        self.system_filters.clone()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    summary: &'a CatalogSummary,
    results: &'a [SearchResult],
}

/// Ingest everything from `source`, apply `options` and render the report.
///
/// Must be awaited inside a [`tokio::task::LocalSet`].
pub async fn run<S>(source: S, ingest: &IngestConfig, options: HeadlessOptions) -> Result<String, ArchiveError>
where
    S: ArchiveSource + 'static,
{
    let planets = ingest_all(source, ingest).await?;

    let catalog = Rc::new(RefCell::new(Catalog::new()));
    catalog.borrow_mut().set_planets(planets);

    let rendered: Rc<RefCell<Option<UnifiedResults>>> = Rc::default();
    let sink = {
        let rendered = rendered.clone();
        move |results: UnifiedResults| *rendered.borrow_mut() = Some(results)
    };

    let format = options.format;
    let mode = options.mode;
    let mut coordinator = SearchCoordinator::new(catalog.clone(), Rc::new(options), Rc::new(sink));
    coordinator.change_filter_mode(mode);

    let results = rendered.borrow_mut().take().unwrap_or_else(|| UnifiedResults::from(Vec::new()));
    let summary = catalog.borrow().summary();
    tracing::info!(results = results.len(), mode = mode.as_str(), "headless render");

    Ok(match format {
        OutputFormat::Text => render_text(&summary, &results),
        OutputFormat::Json => render_json(&summary, &results)?,
    })
}

async fn ingest_all<S>(source: S, config: &IngestConfig) -> Result<Vec<Planet>, ArchiveError>
where
    S: ArchiveSource + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let done = tx.clone();

    let mut ingestor = Ingestor::from_config(source, config);
    ingestor.fetch(Callbacks::new(
        |_: &[Planet], _: &[Planet]| {},
        move |planets: Vec<Planet>| {
            let _ = done.send(Ok(planets));
        },
        move |error: ArchiveError| {
            let _ = tx.send(Err(error));
        },
    ));

    match rx.recv().await {
        Some(outcome) => outcome,
        None => Err(ArchiveError::Transport("ingestion ended without a result".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render_text(summary: &CatalogSummary, results: &[SearchResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} planets, {} shown, {} notable systems, {} results",
        summary.total,
        summary.filtered,
        summary.notable_systems,
        results.len()
    );
    for result in results {
        let _ = match result {
            SearchResult::System(s) => writeln!(
                out,
                "system  {:<28} {:>2} planets   {:>10.1} ly",
                s.star_name, s.planet_count, s.distance
            ),
            SearchResult::Planet(p) => writeln!(
                out,
                "planet  {:<28} {:<11}  {:>10.1} ly",
                p.planet.name,
                p.planet.planet_type.as_str(),
                p.planet.distance
            ),
        };
    }
    out
}

pub fn render_json(summary: &CatalogSummary, results: &[SearchResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Report { summary, results })
}
