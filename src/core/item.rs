use serde::{Deserialize, Serialize};

use crate::ranking::Searchable;

/// A catalog entry.
///
/// Items are immutable once built; they are shared as `Arc<Item>` between
/// sections, rankers and search results. Live stock is tracked separately
/// in [`StockLevel`](crate::core::StockLevel).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Unique id within a catalog
    pub id: String,

    /// Display name, matched with the name bonus
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    /// Unit price in catalog currency
    #[serde(default)]
    pub price: u64,

    /// Tags/keywords, matched without bonus
    #[serde(default)]
    tags: Vec<String>,
}

impl Item {
    /// Create a new item with required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            author: String::new(),
            price: 0,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = price;
        self
    }

    /// Copies `tags` into the item; later changes to the caller's slice
    /// have no effect.
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = tags.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        if self.author.is_empty() {
            self.name.clone()
        } else {
            format!("{} by {}", self.name, self.author)
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Searchable for Item {
    fn primary_name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
