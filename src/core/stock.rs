use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Availability of an item after the latest stock change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Available,
    /// At or under the warning threshold, but not empty
    LowStock,
    SoldOut,
}

/// Live stock for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub stock: u32,

    /// Whether to report `LowStock` at all
    #[serde(default)]
    pub warn_low_stock: bool,

    #[serde(default)]
    pub low_stock_threshold: u32,
}

impl StockLevel {
    pub fn new(stock: u32) -> Self {
        Self {
            stock,
            warn_low_stock: false,
            low_stock_threshold: 0,
        }
    }

    pub fn with_low_stock_warning(mut self, threshold: u32) -> Self {
        self.warn_low_stock = true;
        self.low_stock_threshold = threshold;
        self
    }

    pub fn is_purchasable(&self) -> bool {
        self.stock > 0
    }

    pub fn status(&self) -> StockStatus {
        if self.stock == 0 {
            StockStatus::SoldOut
        } else if self.warn_low_stock && self.stock <= self.low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::Available
        }
    }
}

/// Successful purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub item_id: String,
    pub quantity: u32,

    /// `unit price * quantity`
    pub total: u64,

    /// `funds - total`
    pub change: u64,

    /// Stock left after the purchase
    pub remaining_stock: u32,

    pub status: StockStatus,

    pub purchased_at: DateTime<Utc>,
}
