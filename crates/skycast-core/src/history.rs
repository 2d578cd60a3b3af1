//! Bounded, deduplicated recent-search list.

use serde::{Deserialize, Serialize};

/// Ordered sequence of distinct city names, most recent first.
///
/// Mutated only by the search session, and only on successful searches.
/// Matching is case-sensitive on the exact string that was searched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Maximum number of retained entries.
    pub const MAX_ENTRIES: usize = 5;

    /// Promote a city to the front, removing any prior occurrence of the
    /// same string, then truncate to the bound.
    pub fn record(&mut self, city: &str) {
        self.entries.retain(|entry| entry != city);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(Self::MAX_ENTRIES);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
