//! Colour theme for the exoscope TUI.
//!
//! Themes are defined as TOML files embedded in the binary via
//! [`include_str!`], so the application works without any files on disk.
//!
//! # Star colours
//!
//! Host-star names are hashed to a stable index into the palette, so a system
//! keeps its colour for the whole session no matter where it appears in the
//! result list.

use config::{Config, File, FileFormat};
use exo_core::PlanetType;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawTypes {
    terrestrial: RawStyle,
    super_earth: RawStyle,
    neptune: RawStyle,
    jupiter: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    system: RawStyle,
    selected: RawStyle,
    muted: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    loading: RawStyle,
    loaded: RawStyle,
    failed: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStars {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    types: RawTypes,
    borders: RawBorders,
    results: RawResults,
    status: RawStatus,
    stars: RawStars,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub type_terrestrial: Style,
    pub type_super_earth: Style,
    pub type_neptune: Style,
    pub type_jupiter: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    /// Header line of a multi-planet system entry.
    pub result_system: Style,
    /// Row under the list cursor.
    pub result_selected: Style,
    /// Secondary text (distances, units, placeholders).
    pub muted: Style,

    pub status_loading: Style,
    pub status_loaded: Style,
    pub status_failed: Style,

    star_palette: Vec<Color>,
}

impl Theme {
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme by the name used in config and the `:theme` command.
    /// Unknown names fall back to the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            "default" => Self::load_default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            type_terrestrial: raw.types.terrestrial.into_style(),
            type_super_earth: raw.types.super_earth.into_style(),
            type_neptune: raw.types.neptune.into_style(),
            type_jupiter: raw.types.jupiter.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            result_system: raw.results.system.into_style(),
            result_selected: raw.results.selected.into_style(),
            muted: raw.results.muted.into_style(),
            status_loading: raw.status.loading.into_style(),
            status_loaded: raw.status.loaded.into_style(),
            status_failed: raw.status.failed.into_style(),
            star_palette: raw.stars.palette.iter().filter_map(|s| parse_color(s)).collect(),
        })
    }

    pub fn type_style(&self, planet_type: PlanetType) -> Style {
        match planet_type {
            PlanetType::Terrestrial => self.type_terrestrial,
            PlanetType::SuperEarth => self.type_super_earth,
            PlanetType::Neptune => self.type_neptune,
            PlanetType::Jupiter => self.type_jupiter,
        }
    }

    /// Stable colour for a host star.
    pub fn star_style(&self, star: &str) -> Style {
        if self.star_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(star) % self.star_palette.len();
        Style::default().fg(self.star_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (`red`, `dark_gray`, …), hex RGB
/// (`#rrggbb`) and 256-colour indices (`indexed:N`).
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
