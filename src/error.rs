use thiserror::Error;

/// Main error type for the catalog engine.
///
/// Searching never fails; these variants cover catalog loading, lookups
/// and purchases.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Filesystem errors while loading a catalog
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No section with this name
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// No item with this id
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Item id already present in the catalog
    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    /// Section name already present in the catalog
    #[error("Duplicate section: {0}")]
    DuplicateSection(String),

    /// Zero or overflowing purchase quantity
    #[error("Invalid quantity {quantity} for item '{item}'")]
    InvalidQuantity { item: String, quantity: u32 },

    /// Nothing left to sell
    #[error("Item '{0}' is sold out")]
    SoldOut(String),

    /// More requested than in stock
    #[error("Insufficient stock for '{item}': requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: u32,
        available: u32,
    },

    /// Offered funds do not cover the total
    #[error("Insufficient funds for '{item}': required {required}, offered {offered}")]
    InsufficientFunds {
        item: String,
        required: u64,
        offered: u64,
    },

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl CatalogError {
    /// True for rejections caused by the purchase request itself
    /// (as opposed to a missing item or a broken catalog).
    pub fn is_purchase_rejection(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidQuantity { .. }
                | CatalogError::SoldOut(_)
                | CatalogError::InsufficientStock { .. }
                | CatalogError::InsufficientFunds { .. }
        )
    }
}

impl From<String> for CatalogError {
    fn from(s: String) -> Self {
        CatalogError::Other(s)
    }
}

impl From<&str> for CatalogError {
    fn from(s: &str) -> Self {
        CatalogError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
