use serde::{Deserialize, Serialize};

/// A shop search result that passed parsing and the minimum-price filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedListing {
    /// Listing title with provider markup stripped.
    pub title: String,
    /// Item price plus shipping fee, in minor currency units. The ranking key.
    pub total_price: i64,
    pub link: String,
    pub mall_name: String,
}
