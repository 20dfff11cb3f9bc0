//! In-memory catalog used by tests

use async_trait::async_trait;
use std::sync::Mutex;

use super::{ApiError, ApiResult, CatalogSource, MovieQuery, MovieRecord, OverviewMetrics};

enum Listing {
    /// Fixed pages, then empty pages forever
    Pages(Vec<Vec<MovieRecord>>),
    /// Every page holds the same single record
    Endless(MovieRecord),
}

pub(crate) struct FakeCatalog {
    overview: Option<OverviewMetrics>,
    listing: Listing,
    fail_on_page: Option<u32>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl FakeCatalog {
    pub(crate) fn with_pages(pages: Vec<Vec<MovieRecord>>) -> Self {
        Self {
            overview: None,
            listing: Listing::Pages(pages),
            fail_on_page: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn endless(record: MovieRecord) -> Self {
        Self {
            listing: Listing::Endless(record),
            ..Self::with_pages(Vec::new())
        }
    }

    pub(crate) fn with_overview(mut self, overview: OverviewMetrics) -> Self {
        self.overview = Some(overview);
        self
    }

    pub(crate) fn failing_on(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub(crate) fn requested_pages(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    pub(crate) fn requested_sizes(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(_, s)| *s).collect()
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn overview(&self) -> ApiResult<OverviewMetrics> {
        self.overview
            .clone()
            .ok_or_else(|| ApiError::Network("connection refused".to_string()))
    }

    async fn movies_page(
        &self,
        page: u32,
        size: u32,
        _query: &MovieQuery,
    ) -> ApiResult<Vec<MovieRecord>> {
        self.requests.lock().unwrap().push((page, size));

        if self.fail_on_page == Some(page) {
            return Err(ApiError::Network("connection reset".to_string()));
        }

        Ok(match &self.listing {
            Listing::Pages(pages) => pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default(),
            Listing::Endless(record) => vec![record.clone()],
        })
    }
}
