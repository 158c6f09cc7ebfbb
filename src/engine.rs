use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::{CatalogData, ItemEntry};
use crate::config::SearchConfig;
use crate::core::{
    Item, PurchaseReceipt, ScoredItem, SearchResponse, SearchResultType, StockLevel, StockStatus,
};
use crate::error::{CatalogError, Result};
use crate::ranking::Ranker;

/// A named, separately searchable group of items
#[derive(Debug, Clone)]
struct Section {
    name: String,
    ranker: Ranker<Item>,
}

/// Catalog orchestrator: sections, search and stock.
///
/// Searching takes `&self`; adding items and purchasing take `&mut self`.
/// Threaded hosts share it behind a reader/writer lock.
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    config: SearchConfig,
    sections: Vec<Section>,
    items: HashMap<String, Arc<Item>>,
    stock: HashMap<String, StockLevel>,
}

impl CatalogEngine {
    /// Build from catalog data, using its search config or the default
    pub fn new(data: CatalogData) -> Result<Self> {
        let config = data.search.unwrap_or_default();
        Self::with_config(data, config)
    }

    /// Build from catalog data with an explicit search config
    pub fn with_config(data: CatalogData, config: SearchConfig) -> Result<Self> {
        data.validate()?;

        let mut engine = Self {
            config,
            sections: Vec::with_capacity(data.sections.len()),
            items: HashMap::new(),
            stock: HashMap::new(),
        };

        for section in data.sections {
            engine.sections.push(Section {
                name: section.name.clone(),
                ranker: Ranker::new(config, Vec::new()),
            });
            for entry in section.items {
                engine.add_item(&section.name, entry)?;
            }
        }

        tracing::info!(
            "Catalog engine ready: {} sections, {} items ({})",
            engine.sections.len(),
            engine.items.len(),
            engine.config
        );

        Ok(engine)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Section names in catalog order
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    fn section(&self, name: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CatalogError::UnknownSection(name.to_string()))
    }

    /// Items of a section in insertion order
    pub fn section_items(&self, name: &str) -> Result<&[Arc<Item>]> {
        Ok(self.section(name)?.ranker.records())
    }

    /// Search one section.
    ///
    /// An empty query lists the whole section unranked; anything else,
    /// including blank text, goes through the ranker.
    pub fn browse(&self, section: &str, query: &str) -> Result<SearchResponse> {
        let start = Instant::now();
        let ranker = &self.section(section)?.ranker;

        let (results, result_type) = if query.is_empty() {
            let results = ranker
                .records()
                .iter()
                .map(|item| ScoredItem {
                    item: Arc::clone(item),
                    score: None,
                })
                .collect();
            (results, SearchResultType::Browse)
        } else {
            let results: Vec<ScoredItem> = ranker
                .search_scored(query)
                .into_iter()
                .map(|ranked| ScoredItem {
                    item: ranked.record,
                    score: Some(ranked.score),
                })
                .collect();
            let result_type = if results.is_empty() {
                SearchResultType::NoMatches
            } else {
                SearchResultType::Fuzzy
            };
            (results, result_type)
        };

        let response = SearchResponse {
            section: section.to_string(),
            query: query.to_string(),
            result_type,
            results,
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        tracing::debug!("{}", response.display());

        Ok(response)
    }

    /// Every item of every section, in section order
    pub fn featured(&self) -> Vec<Arc<Item>> {
        self.sections
            .iter()
            .flat_map(|s| s.ranker.records().iter().cloned())
            .collect()
    }

    /// Append an item to a section and register its stock
    pub fn add_item(&mut self, section: &str, entry: ItemEntry) -> Result<()> {
        let id = entry.item.id.clone();
        if self.items.contains_key(&id) {
            return Err(CatalogError::DuplicateItem(id));
        }

        let target = self
            .sections
            .iter_mut()
            .find(|s| s.name == section)
            .ok_or_else(|| CatalogError::UnknownSection(section.to_string()))?;

        let item = Arc::new(entry.item);
        target.ranker.add_item(Arc::clone(&item));
        self.items.insert(id.clone(), item);
        self.stock.insert(id, entry.stock);

        Ok(())
    }

    pub fn item(&self, id: &str) -> Option<Arc<Item>> {
        self.items.get(id).cloned()
    }

    pub fn stock(&self, id: &str) -> Option<StockLevel> {
        self.stock.get(id).copied()
    }

    /// Buy `quantity` units of an item with `funds`.
    ///
    /// Stock only changes when the purchase succeeds.
    pub fn purchase(&mut self, id: &str, quantity: u32, funds: u64) -> Result<PurchaseReceipt> {
        let item = self
            .items
            .get(id)
            .ok_or_else(|| CatalogError::UnknownItem(id.to_string()))?;
        let level = self
            .stock
            .get_mut(id)
            .ok_or_else(|| CatalogError::UnknownItem(id.to_string()))?;

        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity {
                item: id.to_string(),
                quantity,
            });
        }
        if !level.is_purchasable() {
            return Err(CatalogError::SoldOut(id.to_string()));
        }
        if quantity > level.stock {
            return Err(CatalogError::InsufficientStock {
                item: id.to_string(),
                requested: quantity,
                available: level.stock,
            });
        }

        let total = item
            .price
            .checked_mul(u64::from(quantity))
            .ok_or_else(|| CatalogError::InvalidQuantity {
                item: id.to_string(),
                quantity,
            })?;
        if funds < total {
            return Err(CatalogError::InsufficientFunds {
                item: id.to_string(),
                required: total,
                offered: funds,
            });
        }

        level.stock -= quantity;
        let status = level.status();

        tracing::info!(
            "Sold {} x {} for {} (change {})",
            quantity,
            item.display_name(),
            total,
            funds - total
        );
        match status {
            StockStatus::LowStock => {
                tracing::warn!("Low stock: {} ({} left)", item.name, level.stock)
            }
            StockStatus::SoldOut => tracing::warn!("Sold out: {}", item.name),
            StockStatus::Available => {}
        }

        Ok(PurchaseReceipt {
            item_id: id.to_string(),
            quantity,
            total,
            change: funds - total,
            remaining_stock: level.stock,
            status,
            purchased_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CatalogEngine {
        CatalogEngine::new(CatalogData::builtin().unwrap()).unwrap()
    }

    fn names(response: &SearchResponse) -> Vec<String> {
        response.results.iter().map(|r| r.item.name.clone()).collect()
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine();
        assert_eq!(engine.sections(), ["Winter", "Gear"]);
        assert_eq!(engine.config().accuracy(), 1.2);
        assert_eq!(engine.featured().len(), 10);
        assert_eq!(engine.featured()[6].name, "Golden Super Fly Boombox");
    }

    #[test]
    fn test_browse_empty_query_lists_everything() {
        let engine = engine();
        let response = engine.browse("Gear", "").unwrap();
        assert_eq!(response.result_type, SearchResultType::Browse);
        assert_eq!(
            names(&response),
            ["Golden Super Fly Boombox", "Gravity Coil", "Red Convertible", "Robot Guard Dog"]
        );
        assert!(response.results.iter().all(|r| r.score.is_none()));
    }

    #[test]
    fn test_browse_fuzzy() {
        let engine = engine();
        let response = engine.browse("Winter", "scarf").unwrap();
        assert_eq!(response.result_type, SearchResultType::Fuzzy);
        assert_eq!(
            names(&response),
            ["Orange Winter Scarf", "Purple Winter Scarf", "Wild Neon Blue Scarf"]
        );
        assert_eq!(response.results[0].score, Some(5.5));
    }

    #[test]
    fn test_browse_searches_only_the_section() {
        let engine = engine();
        let response = engine.browse("Winter", "dog").unwrap();
        assert_eq!(names(&response), ["Puppy Wagon"]);

        let response = engine.browse("Gear", "dog").unwrap();
        assert_eq!(names(&response), ["Robot Guard Dog"]);
    }

    #[test]
    fn test_browse_no_matches() {
        let engine = engine();
        let response = engine.browse("Gear", "zzz").unwrap();
        assert_eq!(response.result_type, SearchResultType::NoMatches);
        assert!(response.is_empty());

        // blank text is not the empty query
        let response = engine.browse("Gear", "  ").unwrap();
        assert_eq!(response.result_type, SearchResultType::NoMatches);
    }

    #[test]
    fn test_unknown_section() {
        let engine = engine();
        assert!(matches!(
            engine.browse("Summer", "scarf"),
            Err(CatalogError::UnknownSection(name)) if name == "Summer"
        ));
    }

    #[test]
    fn test_results_share_catalog_items() {
        let engine = engine();
        let response = engine.browse("Gear", "gravity").unwrap();
        let coil = engine.item("gravity-coil").unwrap();
        assert!(Arc::ptr_eq(&response.results[0].item, &coil));
    }

    #[test]
    fn test_add_item() {
        let mut engine = engine();
        let before = engine.browse("Gear", "boombox").unwrap();

        let entry = ItemEntry::new(
            Item::new("classic-boombox", "Classic Boombox")
                .with_price(100)
                .with_tags(&["Gear", "Musical"]),
            StockLevel::new(5),
        );
        engine.add_item("Gear", entry.clone()).unwrap();

        let after = engine.browse("Gear", "boombox").unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(names(&after), ["Golden Super Fly Boombox", "Classic Boombox"]);
        assert_eq!(engine.stock("classic-boombox"), Some(StockLevel::new(5)));

        assert!(matches!(
            engine.add_item("Gear", entry.clone()),
            Err(CatalogError::DuplicateItem(_))
        ));
        let other = ItemEntry::new(Item::new("new", "New"), StockLevel::new(1));
        assert!(matches!(
            engine.add_item("Summer", other),
            Err(CatalogError::UnknownSection(_))
        ));
    }

    #[test]
    fn test_purchase_success() {
        let mut engine = engine();
        let receipt = engine.purchase("gravity-coil", 2, 600).unwrap();

        assert_eq!(receipt.total, 500);
        assert_eq!(receipt.change, 100);
        assert_eq!(receipt.remaining_stock, 8);
        assert_eq!(receipt.status, StockStatus::Available);
        assert_eq!(engine.stock("gravity-coil").unwrap().stock, 8);
    }

    #[test]
    fn test_purchase_low_stock_then_sold_out() {
        let mut engine = engine();

        // 4 in stock, warns at 2
        let receipt = engine.purchase("red-convertible", 2, 20_000).unwrap();
        assert_eq!(receipt.status, StockStatus::LowStock);
        assert_eq!(receipt.change, 0);

        let receipt = engine.purchase("red-convertible", 2, 25_000).unwrap();
        assert_eq!(receipt.status, StockStatus::SoldOut);
        assert_eq!(receipt.change, 5_000);

        assert!(matches!(
            engine.purchase("red-convertible", 1, 10_000),
            Err(CatalogError::SoldOut(_))
        ));
    }

    #[test]
    fn test_purchase_rejections_leave_stock() {
        let mut engine = engine();

        assert!(matches!(
            engine.purchase("puppy-wagon", 0, 1_000),
            Err(CatalogError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(matches!(
            engine.purchase("puppy-wagon", 4, 1_000),
            Err(CatalogError::InsufficientStock { requested: 4, available: 3, .. })
        ));
        assert!(matches!(
            engine.purchase("puppy-wagon", 2, 100),
            Err(CatalogError::InsufficientFunds { required: 120, offered: 100, .. })
        ));
        assert!(matches!(
            engine.purchase("missing", 1, 100),
            Err(CatalogError::UnknownItem(_))
        ));

        assert_eq!(engine.stock("puppy-wagon").unwrap().stock, 3);
    }

    #[test]
    fn test_explicit_config_overrides_catalog() {
        let data = CatalogData::builtin().unwrap();
        let engine = CatalogEngine::with_config(data, SearchConfig::new(false, 0.5)).unwrap();
        assert_eq!(engine.config().accuracy(), 1.0);
        assert!(engine.browse("Winter", "scarf").unwrap().is_empty());
    }
}
