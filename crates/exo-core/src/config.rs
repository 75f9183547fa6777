//! Configuration types for exoscope.
//!
//! [`Config::load`] reads `~/.config/exoscope/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[archive]
url          = "http://127.0.0.1:3000/api/exoplanets"
timeout_secs = 30

[ingest]
batch_size = 100
scheduler  = "idle"
frame_ms   = 16

[search]
debounce_ms = 300

[ui]
theme                 = "default"
detail_pane_width_pct = 40
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/exoscope/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[archive]` section: where the planet records come from.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String { "http://127.0.0.1:3000/api/exoplanets".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self { url: default_url(), timeout_secs: default_timeout_secs() }
    }
}

impl ArchiveConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How the ingestor hands control back between batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    /// Yield to the runtime and resume as soon as other ready work has run.
    Idle,
    /// Sleep for one frame (`frame_ms`) between batches.
    Frame,
}

/// `[ingest]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_scheduler")]
    pub scheduler: SchedulerKind,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
}

fn default_batch_size() -> usize { 100 }
fn default_scheduler() -> SchedulerKind { SchedulerKind::Idle }
fn default_frame_ms() -> u64 { 16 }

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            scheduler: default_scheduler(),
            frame_ms: default_frame_ms(),
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 { 300 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms() }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_detail_pane_width_pct")]
    pub detail_pane_width_pct: u16,
}

fn default_theme() -> String { "default".to_string() }
fn default_detail_pane_width_pct() -> u16 { 40 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            detail_pane_width_pct: default_detail_pane_width_pct(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/exoscope/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file layered on top of the built-in defaults. The
    /// file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("exoscope")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.ingest.batch_size, 100);
        assert_eq!(cfg.ingest.scheduler, SchedulerKind::Idle);
        assert_eq!(cfg.search.debounce(), Duration::from_millis(300));
        assert_eq!(cfg.archive.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.ui.theme, "default");
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ingest]\nbatch_size = 25\nscheduler = \"frame\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.ingest.batch_size, 25);
        assert_eq!(cfg.ingest.scheduler, SchedulerKind::Frame);
        assert_eq!(cfg.ingest.frame_ms, 16);
        assert_eq!(cfg.search.debounce_ms, 300);
    }
}
