//! Results list widget: the scrollable unified result pane on the left.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `g` / `G` | First / last row |
//!
//! `offset` is the index of the first visible row. The cursor always stays
//! inside the visible window; moving it past an edge scrolls the window.

use std::cell::Cell;
use std::sync::Arc;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use exo_core::{SearchResult, UnifiedResults};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ResultsListState {
    pub results: UnifiedResults,
    /// Index of the highlighted row.
    pub cursor: usize,
    /// Index of the first visible row.
    offset: Cell<usize>,
    /// Cached from the last render so `handle()` can page by screenfuls.
    last_height: Cell<usize>,
}

impl Default for ResultsListState {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}

impl ResultsListState {
    pub fn new(results: UnifiedResults) -> Self {
        Self {
            results,
            cursor: 0,
            offset: Cell::new(0),
            last_height: Cell::new(20),
        }
    }

    /// Replace the list. The cursor returns to the top unless the list is the
    /// very same allocation (a cache hit), in which case nothing moves.
    pub fn set_results(&mut self, results: UnifiedResults) {
        if Arc::ptr_eq(&self.results, &results) {
            return;
        }
        self.results = results;
        self.cursor = 0;
        self.offset.set(0);
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.cursor)
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn last(&self) -> usize {
        self.results.len().saturating_sub(1)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if self.results.is_empty() {
            return;
        }
        let before = self.cursor;
        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(self.last()),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(self.height().min(PAGE_STEP)),
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + self.height().min(PAGE_STEP)).min(self.last())
            }
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToEnd => self.cursor = self.last(),
            _ => return,
        }
        self.follow_cursor();
        if before != self.cursor {
            tracing::debug!(cursor = self.cursor, offset = self.offset.get(), "results: cursor moved");
        }
    }

    /// Shift the window so the cursor is visible.
    fn follow_cursor(&self) {
        let height = self.height();
        let offset = self.offset.get();
        if self.cursor < offset {
            self.offset.set(self.cursor);
        } else if self.cursor >= offset + height {
            self.offset.set(self.cursor + 1 - height);
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsList<'a> {
    state: &'a ResultsListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsList<'a> {
    pub fn new(state: &'a ResultsListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let total = self.state.results.len();
        let block = Block::bordered()
            .title(format!("Results ({total})"))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cache for handle(); draw always runs before handle().
        self.state.last_height.set(height);
        self.state.follow_cursor();

        let start = self.state.offset.get().min(total);
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.state.results[start..end]
            .iter()
            .enumerate()
            .map(|(row, result)| {
                let line = render_result(result, self.theme);
                if start + row == self.state.cursor {
                    let style = if self.focused {
                        self.theme.result_selected
                    } else {
                        self.theme.result_selected.add_modifier(Modifier::DIM)
                    };
                    line.patch_style(style)
                } else {
                    line
                }
            })
            .collect();

        if lines.is_empty() {
            Paragraph::new(Line::from(Span::styled("no matching planets", self.theme.muted)))
                .render(inner, buf);
            return;
        }

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };
        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

pub(crate) fn format_distance(ly: f64) -> String {
    if ly >= 10_000.0 {
        format!("{:.0} ly", ly)
    } else {
        format!("{:.1} ly", ly)
    }
}

fn render_result(result: &SearchResult, theme: &Theme) -> Line<'static> {
    match result {
        SearchResult::System(system) => Line::from(vec![
            Span::styled("★ ", theme.star_style(&system.star_name)),
            Span::styled(format!("{:<24} ", system.star_name), theme.result_system),
            Span::raw(format!("{:>2} planets  ", system.planet_count)),
            Span::styled(format_distance(system.distance), theme.muted),
        ]),
        SearchResult::Planet(entry) => {
            let planet = &entry.planet;
            Line::from(vec![
                Span::styled("● ", theme.star_style(&planet.host_star)),
                Span::raw(format!("{:<24} ", planet.name)),
                Span::styled(format!("{:<11} ", planet.planet_type.as_str()), theme.type_style(planet.planet_type)),
                Span::styled(format_distance(planet.distance), theme.muted),
            ])
        }
    }
}
