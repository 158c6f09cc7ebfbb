pub mod item;
pub mod search_response;
pub mod stock;

pub use item::Item;
pub use search_response::{ScoredItem, SearchResponse, SearchResultType};
pub use stock::{PurchaseReceipt, StockLevel, StockStatus};
