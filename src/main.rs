use clap::Parser;
use exoscope::headless::{self, HeadlessOptions, OutputFormat};
use exoscope::{AnySource, FileSource, HttpSource, PlanetFilters, SystemFilters};
use exo_core::config::Config;
use exo_tui::FilterMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "exoscope", about = "exoscope: browse the NASA Exoplanet Archive from the terminal")]
struct Cli {
    /// Write debug logs to /tmp/exoscope-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Archive proxy URL; overrides `[archive] url` from the config file.
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Read the raw record array from a JSON file instead of the archive.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Config file to use instead of ~/.config/exoscope/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ingest once, print the filtered results and exit.
    #[arg(long)]
    headless: bool,

    #[arg(long, requires = "headless")]
    query: Option<String>,

    #[arg(long = "type", requires = "headless")]
    planet_type: Option<String>,

    #[arg(long, requires = "headless")]
    temp_min: Option<String>,

    #[arg(long, requires = "headless")]
    temp_max: Option<String>,

    #[arg(long, requires = "headless")]
    dist_max: Option<String>,

    #[arg(long, requires = "headless")]
    method: Option<String>,

    #[arg(long, requires = "headless")]
    facility: Option<String>,

    /// Show notable systems instead of planets.
    #[arg(long, requires = "headless")]
    systems: bool,

    #[arg(long, requires = "headless")]
    min_planets: Option<String>,

    #[arg(long, requires = "headless")]
    spectral: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    fn source(&self, config: &Config) -> AnySource {
        match &self.file {
            Some(path) => AnySource::File(FileSource::new(path)),
            None => {
                let url = self.url.clone().unwrap_or_else(|| config.archive.url.clone());
                AnySource::Http(HttpSource::new(url, config.archive.timeout()))
            }
        }
    }

    fn headless_options(&self) -> HeadlessOptions {
        HeadlessOptions {
            query: self.query.clone().unwrap_or_default(),
            planet_filters: PlanetFilters {
                planet_type: self.planet_type.clone(),
                temp_min: self.temp_min.clone(),
                temp_max: self.temp_max.clone(),
                dist_max: self.dist_max.clone(),
                discovery_method: self.method.clone(),
                discovery_facility: self.facility.clone(),
            },
            system_filters: SystemFilters {
                min_planets: self.min_planets.clone(),
                dist_max: self.dist_max.clone(),
                spectral_type: self.spectral.clone(),
            },
            mode: if self.systems { FilterMode::Systems } else { FilterMode::Planets },
            format: self.format,
        }
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/exoscope-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("exoscope debug log started, tail -f /tmp/exoscope-debug.log");
    } else if cli.headless {
        // The TUI owns the terminal, so only headless runs log to stderr.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config load failed, using defaults");
            Config::defaults()
        }),
    };

    let source = cli.source(&config);
    tracing::info!(source = %source.describe(), "archive source selected");

    if cli.headless {
        let local = tokio::task::LocalSet::new();
        let report = local
            .run_until(headless::run(source, &config.ingest, cli.headless_options()))
            .await?;
        print!("{report}");
        return Ok(());
    }

    exo_tui::run(config, source).await
}
