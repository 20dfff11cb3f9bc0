//! Page Sequences
//!
//! Turns the paginated movie listing into a lazy, bounded stream.
//!
//! Pages are requested one at a time, each only after the previous one has
//! been consumed. The stream ends on the first empty page, after
//! `page_cap` pages, or right after yielding an error. Calling
//! [`page_stream`] again starts over from page 1, and dropping the stream
//! abandons whatever pages were not fetched yet.

use futures_util::stream::{self, Stream};

use super::{ApiResult, CatalogSource, MovieQuery, MovieRecord};

/// Paging parameters for a bounded scan of the movie listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    /// Records requested per page
    pub page_size: u32,
    /// Maximum number of pages fetched
    pub page_cap: u32,
}

impl Default for PagePlan {
    fn default() -> Self {
        Self {
            page_size: 50,
            page_cap: 10,
        }
    }
}

impl PagePlan {
    pub fn new(page_size: u32, page_cap: u32) -> Self {
        Self {
            page_size,
            page_cap,
        }
    }

    /// Upper bound on records a scan with this plan can see
    pub fn max_records(&self) -> u64 {
        self.page_size as u64 * self.page_cap as u64
    }
}

/// Stream the pages of the movie listing according to `plan`
pub fn page_stream<'a, S>(
    source: &'a S,
    plan: PagePlan,
    query: &'a MovieQuery,
) -> impl Stream<Item = ApiResult<Vec<MovieRecord>>> + 'a
where
    S: CatalogSource + ?Sized,
{
    pages_from(source, plan, query, 1)
}

fn pages_from<'a, S>(
    source: &'a S,
    plan: PagePlan,
    query: &'a MovieQuery,
    first: u32,
) -> impl Stream<Item = ApiResult<Vec<MovieRecord>>> + 'a
where
    S: CatalogSource + ?Sized,
{
    // `None` once the sequence has terminated
    stream::unfold(Some(first), move |next| async move {
        let page = next.filter(|page| *page <= plan.page_cap)?;

        match source.movies_page(page, plan.page_size, query).await {
            Ok(records) if records.is_empty() => {
                tracing::debug!(page, "Empty page, end of listing");
                None
            }
            Ok(records) => {
                tracing::debug!(page, records = records.len(), "Fetched movie page");
                if page == plan.page_cap {
                    tracing::debug!(page_cap = plan.page_cap, "Page cap reached");
                }
                Some((Ok(records), page.checked_add(1)))
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "Failed to fetch movie page");
                Some((Err(e), None))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fake::FakeCatalog;
    use crate::catalog::ApiError;
    use futures_util::StreamExt;

    #[test]
    fn test_default_plan() {
        let plan = PagePlan::default();
        assert_eq!(plan.page_size, 50);
        assert_eq!(plan.page_cap, 10);
        assert_eq!(plan.max_records(), 500);
    }

    #[tokio::test]
    async fn test_stops_on_empty_page() {
        let catalog = FakeCatalog::with_pages(vec![
            vec![MovieRecord::with_genres("Action")],
            vec![MovieRecord::with_genres("Drama")],
        ]);
        let query = MovieQuery::default();

        let pages: Vec<_> = page_stream(&catalog, PagePlan::default(), &query).collect().await;

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.is_ok()));
        // Third request returned the empty page
        assert_eq!(catalog.requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_cap_enforced_on_endless_listing() {
        let catalog = FakeCatalog::endless(MovieRecord::with_genres("Comedy"));
        let query = MovieQuery::default();

        let pages: Vec<_> = page_stream(&catalog, PagePlan::default(), &query).collect().await;

        assert_eq!(pages.len(), 10);
        assert_eq!(catalog.requested_pages(), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_custom_plan_is_forwarded() {
        let catalog = FakeCatalog::endless(MovieRecord::with_genres("Comedy"));
        let query = MovieQuery::default();

        let pages: Vec<_> = page_stream(&catalog, PagePlan::new(20, 3), &query).collect().await;

        assert_eq!(pages.len(), 3);
        assert_eq!(catalog.requested_sizes(), vec![20, 20, 20]);
    }

    #[tokio::test]
    async fn test_zero_cap_fetches_nothing() {
        let catalog = FakeCatalog::endless(MovieRecord::with_genres("Comedy"));
        let query = MovieQuery::default();

        let pages: Vec<_> = page_stream(&catalog, PagePlan::new(50, 0), &query).collect().await;

        assert!(pages.is_empty());
        assert!(catalog.requested_pages().is_empty());
    }

    #[tokio::test]
    async fn test_error_terminates_stream() {
        let catalog = FakeCatalog::endless(MovieRecord::with_genres("Comedy")).failing_on(2);
        let query = MovieQuery::default();

        let pages: Vec<_> = page_stream(&catalog, PagePlan::default(), &query).collect().await;

        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_ok());
        assert!(matches!(pages[1], Err(ApiError::Network(_))));
        assert_eq!(catalog.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_stream_is_lazy_and_restartable() {
        let catalog = FakeCatalog::endless(MovieRecord::with_genres("Comedy"));
        let query = MovieQuery::default();

        let stream = page_stream(&catalog, PagePlan::default(), &query);
        assert!(catalog.requested_pages().is_empty());

        let first_two: Vec<_> = stream.take(2).collect().await;
        assert_eq!(first_two.len(), 2);
        assert_eq!(catalog.requested_pages(), vec![1, 2]);

        let again: Vec<_> = page_stream(&catalog, PagePlan::new(50, 1), &query).collect().await;
        assert_eq!(again.len(), 1);
        assert_eq!(catalog.requested_pages(), vec![1, 2, 1]);
    }

    #[tokio::test]
    async fn test_last_page_number_ends_stream() {
        let catalog = FakeCatalog::endless(MovieRecord::with_genres("Comedy"));
        let query = MovieQuery::default();
        let plan = PagePlan::new(50, u32::MAX);

        let pages: Vec<_> = pages_from(&catalog, plan, &query, u32::MAX).collect().await;

        assert_eq!(pages.len(), 1);
        assert_eq!(catalog.requested_pages(), vec![u32::MAX]);
    }
}
