//! Genre Tally
//!
//! Counts genre occurrences across movie records while remembering the
//! order in which each genre was first seen.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::MovieRecord;

/// Separator between genre names in a movie's `genres` field
pub const GENRE_SEPARATOR: char = '|';

/// How tallied genres are ordered before truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartOrder {
    /// Order in which genres first appeared across the scan
    #[default]
    FirstSeen,
    /// Highest count first; equal counts keep first-seen order
    ByCount,
}

impl std::str::FromStr for ChartOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "first_seen" => Ok(ChartOrder::FirstSeen),
            "by_count" => Ok(ChartOrder::ByCount),
            other => Err(format!("unknown chart order: {}", other)),
        }
    }
}

/// Insertion-ordered genre → count mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreTally {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl GenreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `genre`
    ///
    /// The name is trimmed; blank names are ignored. Returns whether
    /// anything was counted.
    pub fn increment(&mut self, genre: &str) -> bool {
        let key = genre.trim();
        if key.is_empty() {
            return false;
        }

        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
        true
    }

    /// Count every genre in a `|`-separated field, returning how many were counted
    pub fn add_field(&mut self, field: &str) -> usize {
        field
            .split(GENRE_SEPARATOR)
            .filter(|genre| self.increment(genre))
            .count()
    }

    /// Count the genres of one movie; records without genres are skipped
    pub fn add_record(&mut self, record: &MovieRecord) -> usize {
        match record.genres.as_deref() {
            Some(field) if !field.is_empty() => self.add_field(field),
            _ => 0,
        }
    }

    /// Count the genres of a whole page of movies
    pub fn add_records<'a>(&mut self, records: impl IntoIterator<Item = &'a MovieRecord>) -> usize {
        records.into_iter().map(|r| self.add_record(r)).sum()
    }

    pub fn get(&self, genre: &str) -> Option<u64> {
        self.index.get(genre).map(|&pos| self.entries[pos].1)
    }

    /// Number of distinct genres
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(genre, count)| (genre.as_str(), *count))
    }

    /// At most `limit` entries, ordered by `order`
    pub fn top(&self, limit: usize, order: ChartOrder) -> Vec<(String, u64)> {
        let mut entries = self.entries.clone();
        if order == ChartOrder::ByCount {
            // stable: ties stay in first-seen order
            entries.sort_by(|a, b| b.1.cmp(&a.1));
        }
        entries.truncate(limit);
        entries
    }
}
