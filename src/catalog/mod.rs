//! Movie Catalog API
//!
//! Read side of the catalog backend used by the dashboard.
//!
//! ## Endpoints
//!
//! - `GET /api/metrics/overview` - aggregate metrics
//! - `GET /api/movies?page={n}&size={m}` - one page of movies, `[]` past the end
//!
//! The [`CatalogSource`] trait is the seam between the loaders and the
//! network: [`CatalogClient`] implements it over HTTP, tests implement it
//! in memory.

mod client;
mod error;
mod pages;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{CatalogClient, ClientConfig};
pub use error::{ApiError, ApiResult};
pub use pages::{page_stream, PagePlan};
pub use types::{MovieQuery, MovieRecord, OverviewMetrics};

use async_trait::async_trait;

/// Anything that can answer the two catalog queries the dashboard needs
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the aggregate metrics
    async fn overview(&self) -> ApiResult<OverviewMetrics>;

    /// Fetch one page of movies (pages start at 1)
    ///
    /// An empty vector means there is no more data.
    async fn movies_page(
        &self,
        page: u32,
        size: u32,
        query: &MovieQuery,
    ) -> ApiResult<Vec<MovieRecord>>;
}
