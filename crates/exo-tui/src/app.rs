//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, starts ingestion, drives the crossterm
//! event loop and tears everything down cleanly on exit or panic. It must be
//! awaited inside a [`tokio::task::LocalSet`]: the ingestor and the search
//! coordinator spawn their tasks there and share the catalog through
//! `Rc<RefCell<_>>`.
//!
//! ```text
//! ingestor task ──on_complete──► Catalog ◄── coordinator (debounce task)
//!        │                          ▲                 │
//!        └──► IngestProgress        │                 └──► ResultsInbox
//!                   │               │                          │
//!                   └────────► App::tick ◄─────────────────────┘
//! ```

use crate::{
    commands::{Command, FilterField},
    coordinator::{FilterControls, FilterMode, ResultSink, SearchCoordinator},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        details::Details,
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        results_list::{ResultsList, ResultsListState},
        status_bar::StatusBar,
    },
};
use chrono::{DateTime, Utc};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exo_archive::{ArchiveSource, Callbacks, Ingestor};
use exo_core::{config::Config, Catalog, CatalogSummary, Planet, PlanetFilters, SystemFilters, UnifiedResults};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::{io, time::Duration};

const FRAME: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Results,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestStatus {
    Idle,
    Loading { processed: usize },
    Loaded { planets: usize, at: DateTime<Utc> },
    Failed(String),
}

/// Written by ingestion callbacks, drained by [`App::tick`].
#[derive(Debug)]
struct IngestProgress {
    status: IngestStatus,
    /// Set when a run has just replaced the catalog and filters need
    /// re-applying.
    completed: bool,
}

/// Current values of the search box and filter controls.
#[derive(Debug, Default)]
pub struct Controls {
    query: RefCell<String>,
    planet: RefCell<PlanetFilters>,
    system: RefCell<SystemFilters>,
}

impl Controls {
    pub fn set_query(&self, query: &str) {
        *self.query.borrow_mut() = query.to_string();
    }

    pub fn set(&self, field: FilterField, value: Option<String>) {
        let mut planet = self.planet.borrow_mut();
        let mut system = self.system.borrow_mut();
        let slot = match field {
            FilterField::Type => &mut planet.planet_type,
            FilterField::TempMin => &mut planet.temp_min,
            FilterField::TempMax => &mut planet.temp_max,
            FilterField::DistMax => &mut planet.dist_max,
            FilterField::Method => &mut planet.discovery_method,
            FilterField::Facility => &mut planet.discovery_facility,
            FilterField::MinPlanets => &mut system.min_planets,
            FilterField::SystemDistMax => &mut system.dist_max,
            FilterField::Spectral => &mut system.spectral_type,
        };
        *slot = value;
    }

    /// Reset every filter. The query is left alone.
    pub fn clear(&self) {
        *self.planet.borrow_mut() = PlanetFilters::default();
        *self.system.borrow_mut() = SystemFilters::default();
    }
}

impl FilterControls for Controls {
    fn query(&self) -> String {
        self.query.borrow().clone()
    }
    fn planet_filters(&self) -> PlanetFilters {
        self.planet.borrow().clone()
    }
    fn system_filters(&self) -> SystemFilters {
        self.system.borrow().clone()
    }
}

/// Holds the most recent result list until the next tick picks it up.
#[derive(Debug, Default)]
pub struct ResultsInbox(RefCell<Option<UnifiedResults>>);

impl ResultsInbox {
    fn take(&self) -> Option<UnifiedResults> {
        self.0.borrow_mut().take()
    }
}

impl ResultSink for ResultsInbox {
    fn show(&self, results: UnifiedResults) {
        *self.0.borrow_mut() = Some(results);
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub mode: FilterMode,
    pub query: QueryBarState,
    pub results: ResultsListState,
    /// Planet chosen by `random`; cleared when the selection moves.
    pub pinned: Option<Arc<Planet>>,
    pub status: IngestStatus,
    pub summary: CatalogSummary,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<S: ArchiveSource + 'static> {
    state: AppState,
    catalog: Rc<RefCell<Catalog>>,
    controls: Rc<Controls>,
    inbox: Rc<ResultsInbox>,
    progress: Rc<RefCell<IngestProgress>>,
    coordinator: SearchCoordinator<Controls, ResultsInbox>,
    ingestor: Ingestor<S>,
}

impl<S: ArchiveSource + 'static> App<S> {
    pub fn new(source: S, config: Config, theme: Theme) -> Self {
        let catalog = Rc::new(RefCell::new(Catalog::new()));
        let controls = Rc::new(Controls::default());
        let inbox = Rc::new(ResultsInbox::default());
        let coordinator = SearchCoordinator::new(catalog.clone(), controls.clone(), inbox.clone())
            .with_debounce(config.search.debounce());
        let ingestor = Ingestor::from_config(source, &config.ingest);
        let summary = catalog.borrow().summary();

        let state = AppState {
            focus: Focus::Results,
            prev_focus: Focus::Results,
            mode: FilterMode::default(),
            query: QueryBarState::default(),
            results: ResultsListState::default(),
            pinned: None,
            status: IngestStatus::Idle,
            summary,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };

        App {
            state,
            catalog,
            controls,
            inbox,
            progress: Rc::new(RefCell::new(IngestProgress {
                status: IngestStatus::Idle,
                completed: false,
            })),
            coordinator,
            ingestor,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> Rc<RefCell<Catalog>> {
        self.catalog.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.ingestor.is_processing()
    }

    /// Set up the terminal, run the event loop, and restore the terminal on
    /// exit.
    pub async fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.start_ingest();
        self.coordinator.refresh();
        let result = self.event_loop(&mut terminal).await;

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.tick();
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            // Never block in crossterm: ingestion and debounce tasks share
            // this thread and only run while we await.
            if ct_event::poll(Duration::ZERO)? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                let app_event = if is_insert_mode(self.state.focus) {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.handle(ev);
                }
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(FRAME).await;
            }
        }

        self.ingestor.cancel_processing();
        self.coordinator.cleanup();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Ingestion
    // -----------------------------------------------------------------------

    /// Start (or restart) ingestion. Results land in the catalog when the run
    /// completes; the next [`tick`](Self::tick) re-applies the filters.
    pub fn start_ingest(&mut self) {
        let on_batch = {
            let progress = self.progress.clone();
            move |_: &[Planet], processed: &[Planet]| {
                progress.borrow_mut().status = IngestStatus::Loading { processed: processed.len() };
            }
        };
        let on_complete = {
            let progress = self.progress.clone();
            let catalog = self.catalog.clone();
            move |planets: Vec<Planet>| {
                let count = planets.len();
                let mut catalog = catalog.borrow_mut();
                catalog.set_planets(planets);
                let mut p = progress.borrow_mut();
                p.status = IngestStatus::Loaded {
                    planets: count,
                    at: catalog.loaded_at().unwrap_or_else(Utc::now),
                };
                p.completed = true;
            }
        };
        let on_error = {
            let progress = self.progress.clone();
            move |e: exo_archive::ArchiveError| {
                progress.borrow_mut().status = IngestStatus::Failed(e.to_string());
            }
        };

        self.progress.borrow_mut().status = IngestStatus::Loading { processed: 0 };
        let run = self.ingestor.fetch(Callbacks::new(on_batch, on_complete, on_error));
        tracing::info!(run, "ingestion requested");
    }

    /// Fold shared state written by background tasks into [`AppState`].
    pub fn tick(&mut self) {
        let completed = {
            let mut p = self.progress.borrow_mut();
            self.state.status = p.status.clone();
            std::mem::take(&mut p.completed)
        };
        if completed {
            self.coordinator.apply_filters();
        }
        if let Some(results) = self.inbox.take() {
            self.state.results.set_results(results);
            self.state.summary = self.catalog.borrow().summary();
        }
    }

    // -----------------------------------------------------------------------
    // Event handling
    // -----------------------------------------------------------------------

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.state.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.state.show_help = false;
            }
            return;
        }

        if self.state.focus == Focus::Command {
            self.handle_command_bar(event);
            return;
        }

        if self.state.focus == Focus::QueryBar {
            match event {
                AppEvent::Escape | AppEvent::FocusNext => self.state.focus = Focus::Results,
                AppEvent::Enter => self.coordinator.refresh(),
                AppEvent::Quit => self.state.quit = true,
                AppEvent::Resize(_, _) => {}
                other => {
                    if self.state.query.handle(&other) {
                        self.controls.set_query(&self.state.query.query);
                        self.coordinator.search();
                    }
                }
            }
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.state.show_help = true;
            }
            AppEvent::Char(':') => {
                self.state.prev_focus = self.state.focus;
                self.state.command_bar.clear();
                self.state.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.state.quit = true;
            }
            AppEvent::FocusNext | AppEvent::QueryFocus => self.state.focus = Focus::QueryBar,
            AppEvent::ToggleMode => self.execute(Command::Mode(self.state.mode.toggled())),
            AppEvent::Random => self.execute(Command::Random),
            AppEvent::ClearFilters => self.execute(Command::Clear),
            AppEvent::Reload => self.execute(Command::Reload),
            AppEvent::Escape => self.state.pinned = None,
            AppEvent::Nav(Direction::Up | Direction::Down)
            | AppEvent::ScrollUp
            | AppEvent::ScrollDown
            | AppEvent::ScrollToTop
            | AppEvent::ScrollToEnd => {
                self.state.pinned = None;
                self.state.results.handle(&event);
            }
            _ => {}
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        let s = &mut self.state;
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                s.command_bar.clear();
                s.focus = s.prev_focus;
            }
            AppEvent::Quit => s.quit = true,
            AppEvent::Enter => match Command::parse(&s.command_bar.input) {
                Ok(cmd) => {
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                    self.execute(cmd);
                }
                Err(msg) if msg.is_empty() => {
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                Err(msg) => s.command_bar.error = Some(msg),
            },
            other => s.command_bar.handle(&other),
        }
    }

    /// Execute a parsed [`Command`].
    pub fn execute(&mut self, cmd: Command) {
        tracing::debug!(command = ?cmd, "executing command");
        match cmd {
            Command::Quit => self.state.quit = true,
            Command::Help => self.state.show_help = !self.state.show_help,
            Command::Theme(name) => self.state.theme = Theme::by_name(&name),
            Command::Filter(field, value) => {
                self.controls.set(field, value);
                // System fields only matter in systems mode, but re-rendering
                // is cheap and keeps the view in step with the controls.
                self.coordinator.apply_filters();
            }
            Command::Mode(mode) => {
                self.state.mode = mode;
                self.coordinator.change_filter_mode(mode);
            }
            Command::Clear => {
                self.controls.clear();
                if self.state.mode == FilterMode::Systems {
                    self.state.mode = FilterMode::Planets;
                    self.coordinator.change_filter_mode(FilterMode::Planets);
                }
                self.coordinator.clear_filters();
            }
            Command::Random => {
                self.state.pinned = self.catalog.borrow().random_planet();
                if let Some(p) = &self.state.pinned {
                    tracing::debug!(planet = %p.name, "random planet");
                }
            }
            Command::Reload => self.start_ingest(),
        }
        self.tick();
    }
}

/// Returns true when a text-input widget has focus.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let pct = state.config.ui.detail_pane_width_pct.min(90);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Percentage(pct)])
        .split(vert[1]);

    frame.render_widget(StatusBar::new(&state.status, &state.summary, &state.theme), vert[0]);
    frame.render_widget(
        ResultsList::new(&state.results, state.focus == Focus::Results, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        Details::new(state.results.selected(), state.pinned.as_deref(), &state.theme),
        horiz[1],
    );
    frame.render_widget(
        QueryBar::new(&state.query, state.mode, state.focus == Focus::QueryBar, &state.theme),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, state.mode, true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[2]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
