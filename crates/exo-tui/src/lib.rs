//! exo-tui: search coordinator and ratatui front end for exoscope.
//!
//! The [`coordinator`] module is UI-agnostic and is also used by headless
//! callers; everything else renders the catalog in a terminal.

pub mod app;
pub mod commands;
pub mod coordinator;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use coordinator::{FilterControls, FilterMode, ResultSink, SearchCoordinator};

use exo_archive::ArchiveSource;
use exo_core::config::Config;

/// Run the interactive terminal UI until the user quits.
///
/// Ingestion starts immediately; the catalog shows the reference entry until
/// the first run completes.
pub async fn run<S: ArchiveSource + 'static>(config: Config, source: S) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    let local = tokio::task::LocalSet::new();
    local.run_until(App::new(source, config, theme).run()).await
}
