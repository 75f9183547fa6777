//! `:` command parsing.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `type [name]` | Planet type filter (`terrestrial`, `super-earth`, `neptune`, `jupiter`) |
//! | `tmin [K]`, `tmax [K]` | Temperature range |
//! | `dist [ly]` | Maximum planet distance |
//! | `method [text]`, `facility [text]` | Discovery substring filters |
//! | `planets [n]` | Minimum planets per system |
//! | `sdist [ly]` | Maximum system distance |
//! | `spectral [class]` | Spectral class of the host star |
//! | `mode <planets\|systems>` | Switch filter mode |
//! | `clear` | Reset every filter |
//! | `random` | Show a random planet from the filtered set |
//! | `reload` | Fetch the archive again |
//!
//! Filter commands without a value reset that filter.

use crate::coordinator::FilterMode;

/// A single filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Type,
    TempMin,
    TempMax,
    DistMax,
    Method,
    Facility,
    MinPlanets,
    SystemDistMax,
    Spectral,
}

impl FilterField {
    /// Fields that feed system filtering rather than planet filtering.
    pub fn is_system(self) -> bool {
        matches!(
            self,
            FilterField::MinPlanets | FilterField::SystemDistMax | FilterField::Spectral
        )
    }
}

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    /// Set (`Some`) or reset (`None`) one filter control.
    Filter(FilterField, Option<String>),
    Mode(FilterMode),
    Clear,
    Random,
    Reload,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// An empty string returns `Err("")` as a sentinel meaning "close without
    /// acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));
        let value = (!rest.is_empty()).then(|| rest.to_string());

        let field = match word {
            "q" | "quit" => return Ok(Command::Quit),
            "help" => return Ok(Command::Help),
            "clear" => return Ok(Command::Clear),
            "random" => return Ok(Command::Random),
            "reload" => return Ok(Command::Reload),
            "theme" => {
                return value
                    .map(Command::Theme)
                    .ok_or_else(|| "usage: theme <default|gruvbox>".to_string())
            }
            "mode" => {
                return rest
                    .parse::<FilterMode>()
                    .map(Command::Mode)
                    .map_err(|_| "usage: mode <planets|systems>".to_string())
            }
            "type" => FilterField::Type,
            "tmin" | "temp-min" => FilterField::TempMin,
            "tmax" | "temp-max" => FilterField::TempMax,
            "dist" | "dist-max" => FilterField::DistMax,
            "method" => FilterField::Method,
            "facility" => FilterField::Facility,
            "planets" | "min-planets" => FilterField::MinPlanets,
            "sdist" => FilterField::SystemDistMax,
            "spectral" => FilterField::Spectral,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(Command::Filter(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit  "), Ok(Command::Quit));
    }

    #[test]
    fn parse_theme() {
        assert_eq!(Command::parse("theme gruvbox"), Ok(Command::Theme("gruvbox".to_string())));
        assert!(Command::parse("theme").is_err());
    }

    #[test]
    fn parse_filter_with_value() {
        assert_eq!(
            Command::parse("method  Radial Velocity "),
            Ok(Command::Filter(FilterField::Method, Some("Radial Velocity".to_string())))
        );
        assert_eq!(
            Command::parse("tmin 200"),
            Ok(Command::Filter(FilterField::TempMin, Some("200".to_string())))
        );
    }

    #[test]
    fn filter_without_value_resets() {
        assert_eq!(Command::parse("type"), Ok(Command::Filter(FilterField::Type, None)));
    }

    #[test]
    fn unparseable_numbers_are_accepted() {
        // The filter layer later treats "warm" as unspecified.
        assert_eq!(
            Command::parse("tmax warm"),
            Ok(Command::Filter(FilterField::TempMax, Some("warm".to_string())))
        );
    }

    #[test]
    fn parse_mode() {
        assert_eq!(Command::parse("mode systems"), Ok(Command::Mode(FilterMode::Systems)));
        assert!(Command::parse("mode").is_err());
        assert!(Command::parse("mode stars").is_err());
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn system_fields() {
        assert!(FilterField::Spectral.is_system());
        assert!(!FilterField::DistMax.is_system());
    }
}
