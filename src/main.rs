//! Marquee CLI
//!
//! Command-line front end for the catalog dashboard:
//! - Show the overview tiles
//! - Show the genre chart
//! - Run the whole dashboard
//! - Render a standalone HTML page

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee::config::{generate_default_config, Config, GenresConfig, LoggingConfig};
use marquee::dashboard::{Dashboard, DashboardReport, GenreAggregator, MetricsLoader};
use marquee::render::{HtmlPage, HtmlRegion, JsonSink, TerminalSink};
use marquee::{CatalogClient, ChartOrder, MovieQuery};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Catalog metrics and genre popularity at a glance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the overview tiles
    Tiles,

    /// Show the genre chart
    Genres {
        #[command(flatten)]
        genres: GenreArgs,
    },

    /// Load tiles and genre chart together
    Show {
        #[command(flatten)]
        genres: GenreArgs,
    },

    /// Write a standalone HTML dashboard
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        genres: GenreArgs,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Clone, Default)]
pub struct GenreArgs {
    /// Maximum pages to scan
    #[arg(long)]
    pub page_cap: Option<u32>,
    /// Movies per page
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Number of genres to chart
    #[arg(long)]
    pub top: Option<usize>,
    /// Bar order (first-seen, by-count)
    #[arg(long)]
    pub order: Option<ChartOrder>,
    /// Only movies whose title matches
    #[arg(long)]
    pub q: Option<String>,
    /// Only movies from this year
    #[arg(long)]
    pub year: Option<i32>,
    /// Only movies matching this genre
    #[arg(long)]
    pub genre: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Html,
}

impl GenreArgs {
    /// Apply the flags on top of the `[genres]` config section
    fn apply(&self, genres: &mut GenresConfig) {
        if let Some(page_size) = self.page_size {
            genres.page_size = page_size;
        }
        if let Some(page_cap) = self.page_cap {
            genres.page_cap = page_cap;
        }
        if let Some(top) = self.top {
            genres.top_n = top;
        }
        if let Some(order) = self.order {
            genres.order = order;
        }
    }

    fn query(&self) -> MovieQuery {
        MovieQuery {
            q: self.q.clone(),
            year: self.year,
            genre: self.genre.clone(),
        }
    }

    fn aggregator(&self, config: &Config) -> GenreAggregator {
        let mut genres = config.genres.clone();
        self.apply(&mut genres);
        genres.aggregator().query(self.query())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_errors) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Vec::new()),
        None => {
            let loaded = Config::load_default();
            (loaded.config, loaded.errors)
        }
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);

    for error in &config_errors {
        tracing::warn!(error = %error, "Skipped config file");
        eprintln!("Warning: {}", error);
    }

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    tracing::debug!(api = %config.api.base_url, "Marquee v{}", env!("CARGO_PKG_VERSION"));
    let client = CatalogClient::new(config.api.client_config())?;

    let ok = match &cli.command {
        Commands::Tiles => run_tiles(&client, cli.format).await?,
        Commands::Genres { genres } => run_genres(&client, genres.aggregator(&config), cli.format).await?,
        Commands::Show { genres } => {
            let dashboard = Dashboard::new(genres.aggregator(&config));
            run_show(&client, &dashboard, cli.format).await?
        }
        Commands::Render { output, genres } => {
            let dashboard = Dashboard::new(genres.aggregator(&config));
            run_render(&client, &dashboard, output.as_ref()).await?
        }
        Commands::Config { .. } => true,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("marquee={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries the rendered dashboard
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn emit(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

async fn run_tiles(client: &CatalogClient, format: OutputFormat) -> anyhow::Result<bool> {
    let loader = MetricsLoader::new();
    let result = match format {
        OutputFormat::Table => {
            let mut sink = TerminalSink::new(Vec::new());
            let result = loader.load(client, &mut sink).await;
            emit(&sink.into_inner())?;
            result.map(|_| ())
        }
        OutputFormat::Json => {
            let mut sink = JsonSink::new(Vec::new());
            let result = loader.load(client, &mut sink).await;
            emit(&sink.into_inner())?;
            result.map(|_| ())
        }
        OutputFormat::Html => {
            let mut region = HtmlRegion::new("tiles");
            let result = loader.load(client, &mut region).await;
            println!("{}", region.markup());
            result.map(|_| ())
        }
    };

    Ok(report_error("tiles", result.err()))
}

async fn run_genres(
    client: &CatalogClient,
    aggregator: GenreAggregator,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let result = match format {
        OutputFormat::Table => {
            let mut sink = TerminalSink::new(Vec::new());
            let result = aggregator.load(client, &mut sink).await;
            emit(&sink.into_inner())?;
            result.map(|_| ())
        }
        OutputFormat::Json => {
            let mut sink = JsonSink::new(Vec::new());
            let result = aggregator.load(client, &mut sink).await;
            emit(&sink.into_inner())?;
            result.map(|_| ())
        }
        OutputFormat::Html => {
            let mut region = HtmlRegion::new("chart");
            let result = aggregator.load(client, &mut region).await;
            println!("{}", region.markup());
            result.map(|_| ())
        }
    };

    Ok(report_error("genres", result.err()))
}

async fn run_show(
    client: &CatalogClient,
    dashboard: &Dashboard,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let report = match format {
        OutputFormat::Table => {
            let mut tiles = TerminalSink::new(Vec::new());
            let mut chart = TerminalSink::new(Vec::new());
            let report = dashboard.load(client, &mut tiles, &mut chart).await;
            emit(&tiles.into_inner())?;
            println!();
            emit(&chart.into_inner())?;
            report
        }
        OutputFormat::Json => {
            let mut tiles = JsonSink::new(Vec::new());
            let mut chart = JsonSink::new(Vec::new());
            let report = dashboard.load(client, &mut tiles, &mut chart).await;
            emit(&tiles.into_inner())?;
            emit(&chart.into_inner())?;
            report
        }
        OutputFormat::Html => {
            let mut tiles = HtmlRegion::new("tiles");
            let mut chart = HtmlRegion::new("chart");
            let report = dashboard.load(client, &mut tiles, &mut chart).await;
            println!("{}\n{}", tiles.markup(), chart.markup());
            report
        }
    };

    Ok(report_dashboard(&report))
}

async fn run_render(
    client: &CatalogClient,
    dashboard: &Dashboard,
    output: Option<&PathBuf>,
) -> anyhow::Result<bool> {
    let mut tiles = HtmlRegion::new("tiles");
    let mut chart = HtmlRegion::new("chart");
    let report = dashboard.load(client, &mut tiles, &mut chart).await;

    let page = HtmlPage::default().render(&tiles, &chart);
    match output {
        Some(path) => {
            std::fs::write(path, page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote dashboard to {}", path.display());
        }
        None => emit(page.as_bytes())?,
    }

    Ok(report_dashboard(&report))
}

fn report_error(what: &str, error: Option<marquee::LoadError>) -> bool {
    match error {
        Some(e) => {
            eprintln!("Failed to load {}: {}", what, e);
            false
        }
        None => true,
    }
}

fn report_dashboard(report: &DashboardReport) -> bool {
    for error in report.errors() {
        eprintln!("Dashboard error ({}): {}", report.load_id, error);
    }
    report.is_success()
}
