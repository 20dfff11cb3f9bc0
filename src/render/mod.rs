//! Dashboard Rendering
//!
//! Display-independent content for the two dashboard regions and the sink
//! traits that show it.
//!
//! ## Content
//!
//! - [`TilePanel`]: five labelled summary values
//! - [`BarChart`]: genre labels with parallel counts, convertible to a
//!   Chart.js bar configuration
//!
//! ## Sinks
//!
//! A sink owns one display region. Every `replace_*` call swaps out whatever
//! the region showed before; `*_unavailable` swaps in a visible placeholder.
//!
//! - [`HtmlRegion`] / [`HtmlPage`]: markup for a browser page
//! - [`TerminalSink`]: plain text tiles and an ASCII bar chart
//! - [`JsonSink`]: machine-readable output

mod html;
mod json;
mod terminal;

pub use html::{escape_html, HtmlPage, HtmlRegion};
pub use json::JsonSink;
pub use terminal::TerminalSink;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::OverviewMetrics;
use crate::genres::{ChartOrder, GenreTally};

/// Dataset label shown in the genre chart legend
pub const GENRE_DATASET_LABEL: &str = "Top Genres (by movies)";

/// Default number of bars in the genre chart
pub const DEFAULT_TOP_N: usize = 12;

/// One labelled summary value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub label: String,
    pub value: String,
}

impl Tile {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The fixed set of overview tiles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilePanel {
    pub tiles: Vec<Tile>,
}

impl TilePanel {
    /// Lay out the five overview tiles
    ///
    /// Numbers use their shortest form (`2.0` shows as `2`); coverage gets
    /// a trailing `%`.
    pub fn from_overview(metrics: &OverviewMetrics) -> Self {
        Self {
            tiles: vec![
                Tile::new("Total Users", metrics.total_users.to_string()),
                Tile::new("Total Movies", metrics.total_movies.to_string()),
                Tile::new("Total Ratings", metrics.total_ratings.to_string()),
                Tile::new("Avg Ratings/User", metrics.avg_ratings_per_user.to_string()),
                Tile::new("Coverage %", format!("{}%", metrics.coverage_pct)),
            ],
        }
    }

    pub fn values(&self) -> Vec<&str> {
        self.tiles.iter().map(|t| t.value.as_str()).collect()
    }
}

/// Bar chart content with parallel label/value vectors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub responsive: bool,
    pub show_legend: bool,
}

impl BarChart {
    /// Build the genre chart from a tally, keeping at most `top_n` bars
    pub fn from_tally(tally: &GenreTally, top_n: usize, order: ChartOrder) -> Self {
        let (labels, values): (Vec<String>, Vec<u64>) = tally.top(top_n, order).into_iter().unzip();
        Self {
            dataset_label: GENRE_DATASET_LABEL.to_string(),
            labels,
            values,
            responsive: true,
            show_legend: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Chart.js configuration for this chart
    pub fn to_chart_js(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "bar",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "label": self.dataset_label,
                    "data": self.values,
                }],
            },
            "options": {
                "responsive": self.responsive,
                "plugins": {
                    "legend": { "display": self.show_legend },
                },
            },
        })
    }
}

/// Errors raised while writing to a sink
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Region that displays the overview tiles
pub trait TileSink {
    /// Replace the region's content with `panel`
    fn replace_tiles(&mut self, panel: &TilePanel) -> RenderResult<()>;

    /// Replace the region's content with a placeholder
    fn tiles_unavailable(&mut self, message: &str) -> RenderResult<()>;
}

/// Region that displays the genre chart
pub trait ChartSink {
    /// Replace the region's content with `chart`
    fn replace_chart(&mut self, chart: &BarChart) -> RenderResult<()>;

    /// Replace the region's content with a placeholder
    fn chart_unavailable(&mut self, message: &str) -> RenderResult<()>;
}
