//! Status bar: ingestion progress and catalog counts on the top row.

use crate::app::IngestStatus;
use crate::theme::Theme;
use exo_core::CatalogSummary;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Renders the 1-line strip at the top of the screen.
///
/// Keybinding hints (`q:quit  ?:help`) are right-aligned in the same row.
pub struct StatusBar<'a> {
    status: &'a IngestStatus,
    summary: &'a CatalogSummary,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a IngestStatus, summary: &'a CatalogSummary, theme: &'a Theme) -> Self {
        Self { status, summary, theme }
    }
}

pub(crate) fn status_span(status: &IngestStatus, theme: &Theme) -> Span<'static> {
    match status {
        IngestStatus::Idle => Span::styled("idle", theme.muted),
        IngestStatus::Loading { processed } => {
            Span::styled(format!("loading… {processed} normalised"), theme.status_loading)
        }
        IngestStatus::Loaded { planets, at } => Span::styled(
            format!("{planets} planets loaded at {}", at.format("%H:%M:%S")),
            theme.status_loaded,
        ),
        IngestStatus::Failed(reason) => Span::styled(format!("load failed: {reason}"), theme.status_failed),
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(" exoscope ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("│ ", self.theme.muted),
            status_span(self.status, self.theme),
            Span::styled(" │ ", self.theme.muted),
            Span::raw(format!(
                "{} / {} shown · {} notable systems",
                self.summary.filtered, self.summary.total, self.summary.notable_systems
            )),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let hint = " /:search  ::command  q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text() {
        let theme = Theme::load_default();
        let span = status_span(&IngestStatus::Loading { processed: 300 }, &theme);
        assert_eq!(span.content, "loading… 300 normalised");
        let span = status_span(&IngestStatus::Failed("archive responded with HTTP 503".into()), &theme);
        assert_eq!(span.content, "load failed: archive responded with HTTP 503");
    }
}
