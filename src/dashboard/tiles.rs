//! Metrics Loader
//!
//! Loads the overview metrics and shows them as tiles.

use crate::catalog::CatalogSource;
use crate::render::{TilePanel, TileSink};

use super::LoadResult;

/// Placeholder shown when the overview cannot be loaded
pub const TILES_FALLBACK: &str = "Metrics unavailable";

/// Fills the tile region from `GET /api/metrics/overview`
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLoader;

impl MetricsLoader {
    pub fn new() -> Self {
        Self
    }

    /// Fetch the overview and replace the sink's content with its tiles
    ///
    /// On failure the sink shows [`TILES_FALLBACK`] and the error is returned.
    pub async fn load<S, K>(&self, source: &S, sink: &mut K) -> LoadResult<TilePanel>
    where
        S: CatalogSource + ?Sized,
        K: TileSink + ?Sized,
    {
        let metrics = match source.overview().await {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load overview metrics");
                if let Err(render_err) = sink.tiles_unavailable(TILES_FALLBACK) {
                    tracing::warn!(error = %render_err, "Failed to show tiles placeholder");
                }
                return Err(e.into());
            }
        };

        let panel = TilePanel::from_overview(&metrics);
        sink.replace_tiles(&panel)?;

        tracing::info!(
            total_users = metrics.total_users,
            total_movies = metrics.total_movies,
            total_ratings = metrics.total_ratings,
            "Rendered overview tiles"
        );

        Ok(panel)
    }
}
