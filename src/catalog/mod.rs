//! Catalog file format.
//!
//! ```json
//! {
//!   "search": { "include_whitespace": false, "accuracy": 1.2 },
//!   "sections": [
//!     { "name": "Gear", "items": [
//!       { "id": "gravity-coil", "name": "Gravity Coil", "price": 250,
//!         "tags": ["Gear"], "stock": 10, "warn_low_stock": true,
//!         "low_stock_threshold": 5 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Item ids are unique across the whole catalog, section names are unique.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::SearchConfig;
use crate::core::{Item, StockLevel};
use crate::error::{CatalogError, Result};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// One item as stored in a catalog file: the item plus its starting stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemEntry {
    #[serde(flatten)]
    pub item: Item,

    #[serde(flatten)]
    pub stock: StockLevel,
}

impl ItemEntry {
    pub fn new(item: Item, stock: StockLevel) -> Self {
        Self { item, stock }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionData {
    pub name: String,

    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogData {
    /// Overrides the default search config when present
    #[serde(default)]
    pub search: Option<SearchConfig>,

    #[serde(default)]
    pub sections: Vec<SectionData>,
}

impl CatalogData {
    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Load a catalog file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let data = Self::from_json(&json)?;

        tracing::info!(
            "Loaded catalog {} ({} sections, {} items)",
            path.display(),
            data.sections.len(),
            data.item_count()
        );

        Ok(data)
    }

    /// The catalog shipped with the crate (Winter and Gear sections)
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Reject duplicate section names and duplicate item ids
    pub fn validate(&self) -> Result<()> {
        let mut sections = HashSet::new();
        let mut ids = HashSet::new();

        for section in &self.sections {
            if !sections.insert(section.name.as_str()) {
                return Err(CatalogError::DuplicateSection(section.name.clone()));
            }
            for entry in &section.items {
                if !ids.insert(entry.item.id.as_str()) {
                    return Err(CatalogError::DuplicateItem(entry.item.id.clone()));
                }
            }
        }

        Ok(())
    }
}
