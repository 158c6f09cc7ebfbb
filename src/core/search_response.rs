use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::Item;

/// Type of search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchResultType {
    /// Empty query: the whole section, unranked
    Browse,
    /// Ranked fuzzy matches
    Fuzzy,
    /// Query matched nothing
    NoMatches,
}

/// One row of a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: Arc<Item>,

    /// Best field rating; `None` when browsing
    pub score: Option<f64>,
}

/// Section search response with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub section: String,

    pub query: String,

    pub result_type: SearchResultType,

    /// Ordered best first (insertion order when browsing)
    #[serde(default)]
    pub results: Vec<ScoredItem>,

    /// Search latency in milliseconds
    pub latency_ms: f64,
}

impl SearchResponse {
    /// Shared handles to the result items, in order
    pub fn items(&self) -> Vec<Arc<Item>> {
        self.results.iter().map(|r| Arc::clone(&r.item)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "[{}] {:?} -> {} result(s) ({:?}, {:.2}ms)",
            self.section,
            self.query,
            self.results.len(),
            self.result_type,
            self.latency_ms
        )
    }
}
