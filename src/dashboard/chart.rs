//! Genre Aggregator
//!
//! Scans a bounded number of movie pages, tallies genres and shows the
//! first `top_n` of them as a bar chart.

use futures_util::{pin_mut, StreamExt};

use crate::catalog::{page_stream, ApiResult, CatalogSource, MovieQuery, PagePlan};
use crate::genres::{ChartOrder, GenreTally};
use crate::render::{BarChart, ChartSink, DEFAULT_TOP_N};

use super::LoadResult;

/// Placeholder shown when the genre scan fails
pub const CHART_FALLBACK: &str = "Genre chart unavailable";

/// Builds the genre chart from the paginated movie listing
#[derive(Debug, Clone)]
pub struct GenreAggregator {
    /// Page size and page cap for the scan
    pub plan: PagePlan,
    /// Maximum number of bars
    pub top_n: usize,
    pub order: ChartOrder,
    /// Filters applied to every page request
    pub query: MovieQuery,
}

impl Default for GenreAggregator {
    fn default() -> Self {
        Self {
            plan: PagePlan::default(),
            top_n: DEFAULT_TOP_N,
            order: ChartOrder::default(),
            query: MovieQuery::default(),
        }
    }
}

impl GenreAggregator {
    pub fn new(plan: PagePlan) -> Self {
        Self {
            plan,
            ..Default::default()
        }
    }

    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn order(mut self, order: ChartOrder) -> Self {
        self.order = order;
        self
    }

    pub fn query(mut self, query: MovieQuery) -> Self {
        self.query = query;
        self
    }

    /// Tally genres over the pages selected by the plan
    ///
    /// Pages are fetched one after another. The first failed page fails the
    /// whole scan.
    pub async fn aggregate<S>(&self, source: &S) -> ApiResult<GenreTally>
    where
        S: CatalogSource + ?Sized,
    {
        let mut tally = GenreTally::new();
        let mut pages = 0u32;
        let mut records = 0usize;

        let stream = page_stream(source, self.plan, &self.query);
        pin_mut!(stream);

        while let Some(page) = stream.next().await {
            let page = page?;
            pages += 1;
            records += page.len();
            tally.add_records(&page);
        }

        tracing::info!(
            pages,
            records,
            genres = tally.len(),
            occurrences = tally.total(),
            "Genre scan complete"
        );

        Ok(tally)
    }

    /// Chart content for a finished tally
    pub fn chart(&self, tally: &GenreTally) -> BarChart {
        BarChart::from_tally(tally, self.top_n, self.order)
    }

    /// Scan, tally and replace the sink's content with the chart
    ///
    /// On failure the sink shows [`CHART_FALLBACK`] and the error is returned.
    pub async fn load<S, K>(&self, source: &S, sink: &mut K) -> LoadResult<BarChart>
    where
        S: CatalogSource + ?Sized,
        K: ChartSink + ?Sized,
    {
        let tally = match self.aggregate(source).await {
            Ok(tally) => tally,
            Err(e) => {
                tracing::error!(error = %e, "Failed to aggregate genres");
                if let Err(render_err) = sink.chart_unavailable(CHART_FALLBACK) {
                    tracing::warn!(error = %render_err, "Failed to show chart placeholder");
                }
                return Err(e.into());
            }
        };

        let chart = self.chart(&tally);
        sink.replace_chart(&chart)?;

        tracing::info!(bars = chart.labels.len(), "Rendered genre chart");

        Ok(chart)
    }
}
