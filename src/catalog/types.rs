//! Catalog data types
//!
//! Wire types for the two endpoints the dashboard reads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Aggregate catalog metrics from `GET /api/metrics/overview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    pub total_users: u64,
    pub total_movies: u64,
    pub total_ratings: u64,
    pub avg_ratings_per_user: f64,
    /// Percentage of movies with at least one rating (0-100)
    pub coverage_pct: f64,
}

/// A movie as listed by `GET /api/movies`
///
/// Only `genres` matters to the dashboard; the rest is kept so callers
/// can reuse the type. Every field decodes leniently: a missing, null or
/// mistyped value falls back to its default instead of failing the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    /// `|`-separated genre names, e.g. `"Action|Sci-Fi"`
    #[serde(default, deserialize_with = "lenient")]
    pub genres: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub avg_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating_count: u64,
}

/// Decode a field, falling back to `T::default()` when the value has the wrong type
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl MovieRecord {
    /// Create a record carrying only a genre field
    pub fn with_genres(genres: impl Into<String>) -> Self {
        Self {
            genres: Some(genres.into()),
            ..Default::default()
        }
    }
}

/// Optional filters for the movie listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieQuery {
    /// Title search
    pub q: Option<String>,
    pub year: Option<i32>,
    /// Partial genre match ("Action" matches "Action|Sci-Fi")
    pub genre: Option<String>,
}

impl MovieQuery {
    /// Render the filters as extra query parameters (`&q=..&year=..`)
    pub fn to_query_suffix(&self) -> String {
        let mut out = String::new();
        if let Some(q) = self.q.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("&q={}", urlencoding::encode(q)));
        }
        if let Some(year) = self.year {
            out.push_str(&format!("&year={}", year));
        }
        if let Some(genre) = self.genre.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("&genre={}", urlencoding::encode(genre)));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.to_query_suffix().is_empty()
    }
}
