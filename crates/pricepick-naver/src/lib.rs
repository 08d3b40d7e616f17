pub mod client;
pub mod error;
pub mod rank;
pub mod types;

pub use client::NaverShopClient;
pub use error::NaverError;
pub use rank::pick_lowest;
pub use types::{ShopItem, ShopSearchResponse};
