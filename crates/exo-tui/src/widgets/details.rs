//! Details pane: every known field of the selected planet or system.

use super::results_list::format_distance;
use crate::theme::Theme;
use exo_core::{Planet, SearchResult, SystemEntry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const LABEL_WIDTH: usize = 16;

/// What the pane shows: a pinned planet (from `random`) wins over the list
/// selection.
pub struct Details<'a> {
    selected: Option<&'a SearchResult>,
    pinned: Option<&'a Planet>,
    theme: &'a Theme,
}

impl<'a> Details<'a> {
    pub fn new(selected: Option<&'a SearchResult>, pinned: Option<&'a Planet>, theme: &'a Theme) -> Self {
        Self { selected, pinned, theme }
    }
}

impl Widget for Details<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, lines) = match (self.pinned, self.selected) {
            (Some(planet), _) => (" Random pick ".to_string(), planet_lines(planet, self.theme)),
            (None, Some(SearchResult::Planet(entry))) => {
                (format!(" {} ", entry.planet.name), planet_lines(&entry.planet, self.theme))
            }
            (None, Some(SearchResult::System(system))) => {
                (format!(" {} system ", system.star_name), system_lines(system, self.theme))
            }
            (None, None) => (
                " Details ".to_string(),
                vec![Line::from(Span::styled("nothing selected", self.theme.muted))],
            ),
        };

        let block = Block::bordered().title(title).border_style(self.theme.border_unfocused);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Line builders
// ---------------------------------------------------------------------------

fn field(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), theme.muted),
        Span::raw(value),
    ])
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().add_modifier(Modifier::BOLD)))
}

fn opt(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{unit}"),
        None => "unknown".to_string(),
    }
}

fn opt_text(value: Option<&str>) -> String {
    value.unwrap_or("unknown").to_string()
}

pub(crate) fn planet_lines(planet: &Planet, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(planet.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(planet.planet_type.as_str(), theme.type_style(planet.planet_type)),
        ]),
        field("host star", planet.host_star.clone(), theme),
        field("distance", format_distance(planet.distance), theme),
        Line::default(),
        heading("Planet"),
        field("radius", format!("{:.2} R⊕", planet.radius), theme),
        field("mass", format!("{:.2} M⊕", planet.mass), theme),
        field("temperature", format!("{:.0} K", planet.temperature), theme),
        field("density", opt(planet.density, " g/cm³"), theme),
        field("orbital period", opt(planet.orbital_period, " d"), theme),
        field("semi-major axis", opt(planet.semi_major_axis, " AU"), theme),
        field("eccentricity", opt(planet.orbital_eccentricity, ""), theme),
        field("insolation", opt(planet.insolation_flux, " S⊕"), theme),
        Line::default(),
        heading("Star"),
        field("spectral type", opt_text(planet.spectral_type.as_deref()), theme),
        field("temperature", opt(planet.stellar_temp, " K"), theme),
        field("radius", opt(planet.stellar_radius, " R☉"), theme),
        field("mass", opt(planet.stellar_mass, " M☉"), theme),
        field("age", opt(planet.stellar_age, " Gyr"), theme),
        field("system", format!("{} star(s), {} planet(s)", planet.number_of_stars, planet.number_of_planets), theme),
        Line::default(),
        heading("Discovery"),
        field("method", opt_text(planet.discovery_method.as_deref()), theme),
        field("facility", opt_text(planet.discovery_facility.as_deref()), theme),
        field(
            "year",
            planet.discovery_year.map(|y| y.to_string()).unwrap_or_else(|| "unknown".to_string()),
            theme,
        ),
    ]
}

pub(crate) fn system_lines(system: &SystemEntry, theme: &Theme) -> Vec<Line<'static>> {
    let spectral = system.planets.iter().find_map(|p| p.spectral_type.as_deref());
    let mut lines = vec![
        Line::from(Span::styled(system.star_name.clone(), theme.star_style(&system.star_name))),
        field("planets", system.planet_count.to_string(), theme),
        field("distance", format_distance(system.distance), theme),
        field("spectral type", opt_text(spectral), theme),
        Line::default(),
        heading("Members (by orbital period)"),
    ];
    lines.extend(system.planets.iter().map(|p| {
        Line::from(vec![
            Span::raw(format!("{:<24} ", p.name)),
            Span::styled(format!("{:<11} ", p.planet_type.as_str()), theme.type_style(p.planet_type)),
            Span::styled(opt(p.orbital_period, " d"), theme.muted),
        ])
    }));
    lines
}
