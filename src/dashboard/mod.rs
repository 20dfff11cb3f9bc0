//! Dashboard Loaders
//!
//! The two independent loaders behind the dashboard and the routine that
//! starts them.
//!
//! ## Architecture
//!
//! - **MetricsLoader**: overview metrics → tile region
//! - **GenreAggregator**: bounded page scan → genre tally → chart region
//! - **Dashboard**: runs both concurrently against one catalog source
//!
//! Nothing happens until [`Dashboard::load`] (or one of the loaders) is
//! called. The loaders write to separate sinks and share no state, so
//! either may finish first and a failure in one never touches the other.

mod chart;
mod tiles;

pub use chart::{GenreAggregator, CHART_FALLBACK};
pub use tiles::{MetricsLoader, TILES_FALLBACK};

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::catalog::{ApiError, CatalogSource};
use crate::render::{BarChart, ChartSink, RenderError, TilePanel, TileSink};

/// Errors that stop a loader
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type alias for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Both dashboard loaders, configured together
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub metrics: MetricsLoader,
    pub genres: GenreAggregator,
}

/// Outcome of one dashboard load
#[derive(Debug)]
pub struct DashboardReport {
    /// Correlates the log lines of this load
    pub load_id: Uuid,
    pub tiles: LoadResult<TilePanel>,
    pub chart: LoadResult<BarChart>,
}

impl DashboardReport {
    pub fn is_success(&self) -> bool {
        self.tiles.is_ok() && self.chart.is_ok()
    }

    /// Errors of the loaders that failed
    pub fn errors(&self) -> Vec<&LoadError> {
        [self.tiles.as_ref().err(), self.chart.as_ref().err()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Dashboard {
    pub fn new(genres: GenreAggregator) -> Self {
        Self {
            metrics: MetricsLoader::new(),
            genres,
        }
    }

    /// Run both loaders concurrently, each writing to its own sink
    pub async fn load<S, T, C>(&self, source: &S, tiles: &mut T, chart: &mut C) -> DashboardReport
    where
        S: CatalogSource + ?Sized,
        T: TileSink + ?Sized,
        C: ChartSink + ?Sized,
    {
        let load_id = Uuid::new_v4();
        let span = tracing::info_span!("dashboard_load", load_id = %load_id);

        async move {
            tracing::info!(
                page_size = self.genres.plan.page_size,
                page_cap = self.genres.plan.page_cap,
                "Loading dashboard"
            );

            let (tiles, chart) = tokio::join!(
                self.metrics.load(source, tiles),
                self.genres.load(source, chart)
            );

            let report = DashboardReport {
                load_id,
                tiles,
                chart,
            };

            if report.is_success() {
                tracing::info!("Dashboard loaded");
            } else {
                tracing::warn!(failed = report.errors().len(), "Dashboard loaded with errors");
            }

            report
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fake::FakeCatalog;
    use crate::catalog::{
        CatalogClient, ClientConfig, MovieQuery, MovieRecord, OverviewMetrics, PagePlan,
    };
    use crate::genres::ChartOrder;
    use crate::render::HtmlRegion;

    /// Keeps only the most recent content, like a real display region
    #[derive(Default)]
    struct RecordingSink {
        tiles: Option<TilePanel>,
        chart: Option<BarChart>,
        placeholder: Option<String>,
        writes: usize,
    }

    impl TileSink for RecordingSink {
        fn replace_tiles(&mut self, panel: &TilePanel) -> crate::render::RenderResult<()> {
            self.tiles = Some(panel.clone());
            self.placeholder = None;
            self.writes += 1;
            Ok(())
        }

        fn tiles_unavailable(&mut self, message: &str) -> crate::render::RenderResult<()> {
            self.tiles = None;
            self.placeholder = Some(message.to_string());
            self.writes += 1;
            Ok(())
        }
    }

    impl ChartSink for RecordingSink {
        fn replace_chart(&mut self, chart: &BarChart) -> crate::render::RenderResult<()> {
            self.chart = Some(chart.clone());
            self.placeholder = None;
            self.writes += 1;
            Ok(())
        }

        fn chart_unavailable(&mut self, message: &str) -> crate::render::RenderResult<()> {
            self.chart = None;
            self.placeholder = Some(message.to_string());
            self.writes += 1;
            Ok(())
        }
    }

    fn sample_overview() -> OverviewMetrics {
        OverviewMetrics {
            total_users: 10,
            total_movies: 5,
            total_ratings: 20,
            avg_ratings_per_user: 2.0,
            coverage_pct: 50.0,
        }
    }

    #[tokio::test]
    async fn test_tiles_end_to_end() {
        let catalog = FakeCatalog::with_pages(Vec::new()).with_overview(sample_overview());
        let mut sink = RecordingSink::default();

        let panel = MetricsLoader::new().load(&catalog, &mut sink).await.unwrap();

        assert_eq!(panel.values(), vec!["10", "5", "20", "2", "50%"]);
        assert_eq!(sink.tiles, Some(panel));
        assert_eq!(sink.writes, 1);
    }

    #[tokio::test]
    async fn test_tiles_failure_shows_placeholder() {
        let catalog = FakeCatalog::with_pages(Vec::new());
        let mut sink = RecordingSink::default();

        let result = MetricsLoader::new().load(&catalog, &mut sink).await;

        assert!(matches!(result, Err(LoadError::Api(ApiError::Network(_)))));
        assert!(sink.tiles.is_none());
        assert_eq!(sink.placeholder.as_deref(), Some(TILES_FALLBACK));
    }

    #[tokio::test]
    async fn test_chart_end_to_end() {
        let catalog = FakeCatalog::with_pages(vec![vec![
            MovieRecord::with_genres("Action|Drama"),
            MovieRecord::with_genres("Action"),
        ]]);
        let mut sink = RecordingSink::default();
        let aggregator = GenreAggregator::default();

        let tally = aggregator.aggregate(&catalog).await.unwrap();
        assert_eq!(tally.get("Action"), Some(2));
        assert_eq!(tally.get("Drama"), Some(1));
        assert_eq!(tally.len(), 2);

        let chart = aggregator.load(&catalog, &mut sink).await.unwrap();
        assert_eq!(chart.labels, vec!["Action", "Drama"]);
        assert_eq!(chart.values, vec![2, 1]);
        assert_eq!(sink.chart, Some(chart));
    }

    #[tokio::test]
    async fn test_tally_total_matches_tokens_across_pages() {
        let pages = vec![
            vec![
                MovieRecord::with_genres("Action| Comedy |  "),
                MovieRecord::default(),
            ],
            vec![MovieRecord::with_genres("Comedy|Romance")],
            vec![MovieRecord::with_genres(" ")],
        ];
        let catalog = FakeCatalog::with_pages(pages);

        let tally = GenreAggregator::default().aggregate(&catalog).await.unwrap();

        assert_eq!(tally.total(), 4);
        assert_eq!(tally.get("Comedy"), Some(2));
        assert_eq!(catalog.requested_pages(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_chart_truncates_to_top_n_in_first_seen_order() {
        let genres: Vec<String> = (0..20).map(|i| format!("G{}", i)).collect();
        let catalog = FakeCatalog::with_pages(vec![
            vec![MovieRecord::with_genres(genres[..10].join("|"))],
            vec![MovieRecord::with_genres(genres[10..].join("|"))],
        ]);
        let mut sink = RecordingSink::default();

        let chart = GenreAggregator::default().load(&catalog, &mut sink).await.unwrap();

        assert_eq!(chart.labels.len(), 12);
        assert_eq!(chart.labels, genres[..12].to_vec());
    }

    #[tokio::test]
    async fn test_by_count_order() {
        let catalog = FakeCatalog::with_pages(vec![vec![
            MovieRecord::with_genres("Western|Drama"),
            MovieRecord::with_genres("Drama"),
        ]]);
        let mut sink = RecordingSink::default();

        let chart = GenreAggregator::default()
            .order(ChartOrder::ByCount)
            .top_n(1)
            .load(&catalog, &mut sink)
            .await
            .unwrap();

        assert_eq!(chart.labels, vec!["Drama"]);
        assert_eq!(chart.values, vec![2]);
    }

    #[tokio::test]
    async fn test_chart_failure_mid_scan_shows_placeholder() {
        let catalog = FakeCatalog::endless(MovieRecord::with_genres("Action")).failing_on(3);
        let mut sink = RecordingSink::default();

        let result = GenreAggregator::default().load(&catalog, &mut sink).await;

        assert!(result.is_err());
        assert!(sink.chart.is_none());
        assert_eq!(sink.placeholder.as_deref(), Some(CHART_FALLBACK));
        assert_eq!(catalog.requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_dashboard_failures_are_independent() {
        let catalog = FakeCatalog::with_pages(vec![vec![MovieRecord::with_genres("Horror")]]);
        let mut tiles = HtmlRegion::new("tiles");
        let mut chart = HtmlRegion::new("chart");

        let report = Dashboard::default().load(&catalog, &mut tiles, &mut chart).await;

        assert!(!report.is_success());
        assert!(report.tiles.is_err());
        assert!(report.chart.is_ok());
        assert_eq!(report.errors().len(), 1);
        assert!(tiles.markup().contains(TILES_FALLBACK));
        assert!(chart.markup().contains("Horror"));
    }

    #[tokio::test]
    async fn test_dashboard_success() {
        let catalog = FakeCatalog::with_pages(vec![vec![MovieRecord::with_genres("Action|Drama")]])
            .with_overview(sample_overview());
        let mut tiles = HtmlRegion::new("tiles");
        let mut chart = HtmlRegion::new("chart");

        let report = Dashboard::default().load(&catalog, &mut tiles, &mut chart).await;

        assert!(report.is_success());
        assert!(report.errors().is_empty());
        assert_eq!(tiles.markup().matches("class=\"tile\"").count(), 5);
        assert!(tiles.markup().contains("<h2>50%</h2>"));
    }

    #[tokio::test]
    async fn test_page_cap_over_http_with_endless_listing() {
        use axum::{extract::Query, routing::get, Json, Router};
        use std::collections::HashMap;
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let hits = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&hits);
        let router = Router::new().route(
            "/api/movies",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let page = params.get("page").cloned().unwrap_or_default();
                    Json(serde_json::json!([{ "title": format!("Movie {}", page), "genres": "Drama" }]))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = CatalogClient::new(ClientConfig {
            base_url: format!("http://{}", addr),
            ..Default::default()
        })
        .unwrap();

        let tally = GenreAggregator::new(PagePlan::default())
            .query(MovieQuery::default())
            .aggregate(&client)
            .await
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 10);
        assert_eq!(tally.get("Drama"), Some(10));
    }
}
