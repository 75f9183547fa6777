//! Search coordinator: debounced text search plus immediate filter renders.
//!
//! The coordinator sits between the input controls and the [`Catalog`]. Text
//! search is debounced: every [`search`](SearchCoordinator::search) call
//! aborts the pending timer and starts a new one, and only when a timer runs
//! to completion is the query read from the controls and executed. Filter
//! changes render synchronously.
//!
//! At most one timer task is alive at any moment. Timer tasks are spawned on
//! the current [`tokio::task::LocalSet`].

use exo_core::{Catalog, PlanetFilters, SearchResult, SystemFilters, UnifiedResults};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Live values of the search and filter inputs. Read at the moment a query
/// executes, never cached by the coordinator.
pub trait FilterControls {
    fn query(&self) -> String;
    fn planet_filters(&self) -> PlanetFilters;
    fn system_filters(&self) -> SystemFilters;
}

/// Receives every rendered result list.
pub trait ResultSink {
    fn show(&self, results: UnifiedResults);
}

impl<F> ResultSink for F
where
    F: Fn(UnifiedResults),
{
    fn show(&self, results: UnifiedResults) {
        self(results)
    }
}

/// Which filter set drives the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Planets,
    Systems,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Planets => "planets",
            FilterMode::Systems => "systems",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            FilterMode::Planets => FilterMode::Systems,
            FilterMode::Systems => FilterMode::Planets,
        }
    }
}

impl std::str::FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planets" | "planet" | "p" => Ok(FilterMode::Planets),
            "systems" | "system" | "s" => Ok(FilterMode::Systems),
            other => Err(format!("unknown filter mode: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

pub struct SearchCoordinator<C, S> {
    catalog: Rc<RefCell<Catalog>>,
    controls: Rc<C>,
    sink: Rc<S>,
    mode: FilterMode,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<C, S> SearchCoordinator<C, S>
where
    C: FilterControls + 'static,
    S: ResultSink + 'static,
{
    pub fn new(catalog: Rc<RefCell<Catalog>>, controls: Rc<C>, sink: Rc<S>) -> Self {
        Self {
            catalog,
            controls,
            sink,
            mode: FilterMode::default(),
            debounce: DEFAULT_DEBOUNCE,
            pending: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Restart the debounce timer. When it fires, the current query is run
    /// through [`Catalog::search_unified`] and the results are shown.
    ///
    /// Must be called from within a [`tokio::task::LocalSet`].
    pub fn search(&mut self) {
        self.cleanup();

        let catalog = self.catalog.clone();
        let controls = self.controls.clone();
        let sink = self.sink.clone();
        let delay = self.debounce;

        self.pending = Some(tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            let query = controls.query();
            let results = catalog.borrow_mut().search_unified(&query);
            tracing::debug!(query = %query, results = results.len(), "debounced search fired");
            sink.show(results);
        }));
    }

    /// Re-filter with the current controls and render immediately.
    pub fn apply_filters(&mut self) {
        self.cleanup();
        let results = match self.mode {
            FilterMode::Planets => {
                let filters = self.controls.planet_filters();
                let query = self.controls.query();
                let mut catalog = self.catalog.borrow_mut();
                catalog.apply_filters(&filters);
                catalog.search_unified(&query)
            }
            FilterMode::Systems => self.system_results(),
        };
        self.sink.show(results);
    }

    /// Drop every planet filter and render the unified view.
    pub fn clear_filters(&mut self) {
        self.cleanup();
        let query = self.controls.query();
        let results = {
            let mut catalog = self.catalog.borrow_mut();
            catalog.clear_filters();
            catalog.search_unified(&query)
        };
        self.sink.show(results);
    }

    pub fn change_filter_mode(&mut self, mode: FilterMode) {
        tracing::debug!(from = ?self.mode, to = ?mode, "filter mode changed");
        self.mode = mode;
        self.apply_filters();
    }

    /// Render the current view now, skipping the debounce and leaving the
    /// filtered subset untouched.
    pub fn refresh(&mut self) {
        self.cleanup();
        let results = match self.mode {
            FilterMode::Planets => {
                let query = self.controls.query();
                self.catalog.borrow_mut().search_unified(&query)
            }
            FilterMode::Systems => self.system_results(),
        };
        self.sink.show(results);
    }

    fn system_results(&self) -> UnifiedResults {
        let filters = self.controls.system_filters();
        let results: Vec<SearchResult> = self.catalog.borrow().apply_system_filters(&filters);
        Arc::from(results)
    }
}

impl<C, S> SearchCoordinator<C, S> {
    /// Abort the pending debounce timer, if any.
    pub fn cleanup(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<C, S> Drop for SearchCoordinator<C, S> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
