//! # Marquee
//!
//! Movie Catalog Dashboard - loads catalog metrics and genre popularity from
//! a movie API and renders them as summary tiles and a bar chart.
//!
//! ## Features
//!
//! - **Overview tiles**: users, movies, ratings, ratings per user, coverage
//! - **Genre chart**: genre counts tallied over a bounded scan of the movie listing
//! - **Pluggable output**: HTML (Chart.js), terminal, or JSON sinks
//! - **Explicit start**: nothing touches the network until a loader runs
//!
//! ## Modules
//!
//! - [`catalog`]: REST client, wire types and paginated scans
//! - [`genres`]: insertion-ordered genre tally
//! - [`render`]: tile/chart content and output sinks
//! - [`dashboard`]: the two loaders and the routine that runs them
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marquee::catalog::{CatalogClient, ClientConfig};
//! use marquee::dashboard::Dashboard;
//! use marquee::render::{HtmlPage, HtmlRegion};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::default())?;
//!
//!     let mut tiles = HtmlRegion::new("tiles");
//!     let mut chart = HtmlRegion::new("chart");
//!     let report = Dashboard::default().load(&client, &mut tiles, &mut chart).await;
//!
//!     for error in report.errors() {
//!         eprintln!("{}", error);
//!     }
//!     println!("{}", HtmlPage::default().render(&tiles, &chart));
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod genres;
pub mod render;

// Re-export top-level types for convenience
pub use catalog::{
    ApiError, ApiResult, CatalogClient, CatalogSource, ClientConfig, MovieQuery, MovieRecord,
    OverviewMetrics, PagePlan,
};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardReport, GenreAggregator, LoadError, MetricsLoader};
pub use genres::{ChartOrder, GenreTally};
pub use render::{BarChart, ChartSink, Tile, TilePanel, TileSink};
