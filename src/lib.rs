//! # Catalog Search
//!
//! Catalog browsing engine with:
//! - LCS-based fuzzy matching over item names and tags
//! - Stable best-first ranking with a configurable accuracy bound
//! - Sectioned catalogs loaded from JSON
//! - Stock tracking and purchases
//! - Multiple interfaces: Rust library, CLI, HTTP API
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use catalog_search::{Ranker, SearchConfig, SearchableRecord};
//!
//! let scarf = Arc::new(SearchableRecord::new("Orange Winter Scarf", &["Scarf", "Winter"]));
//! let wagon = Arc::new(SearchableRecord::new("Puppy Wagon", &["Dog"]));
//!
//! let ranker = Ranker::new(SearchConfig::new(false, 1.2), vec![scarf.clone(), wagon]);
//! let results = ranker.search("winter");
//!
//! assert_eq!(results.len(), 1);
//! assert!(Arc::ptr_eq(&results[0], &scarf));
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod ranking;

// Re-export primary types
pub use catalog::{CatalogData, ItemEntry, SectionData};
pub use config::SearchConfig;
pub use crate::core::{
    Item, PurchaseReceipt, ScoredItem, SearchResponse, SearchResultType, StockLevel, StockStatus,
};
pub use engine::CatalogEngine;
pub use error::{CatalogError, Result};
pub use ranking::{RankedCandidate, Ranker, Searchable, SearchableRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
