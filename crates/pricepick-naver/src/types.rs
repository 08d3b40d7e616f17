//! Naver shop-search API response types.
//!
//! All types model the JSON returned by the `shop.json` endpoint. Numeric
//! fields arrive string-encoded on the wire; the types keep them as `String`
//! and leave interpretation to [`crate::rank`].

use serde::Deserialize;

/// Envelope for a shop-search response.
///
/// `items` is kept as raw JSON values: the ranker deserializes each entry
/// individually so that one malformed item never poisons the whole batch.
/// A missing `items` key deserializes to an empty vec, which callers treat
/// as "no matches", not as an error.
#[derive(Debug, Deserialize)]
pub struct ShopSearchResponse {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub display: i64,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

/// A single shop listing.
///
/// `lprice` is a string-encoded integer (`"12900"`). `shippingFee` is either
/// a digit string or a sentinel such as `"무료"`; treating it as a number
/// causes deserialization failure, so it stays a `String`. `title` may
/// contain `<b>…</b>` highlight markup.
#[derive(Debug, Deserialize)]
pub struct ShopItem {
    pub title: String,
    pub lprice: String,
    #[serde(default, rename = "shippingFee")]
    pub shipping_fee: Option<String>,
    pub link: String,
    #[serde(default, rename = "mallName")]
    pub mall_name: Option<String>,
}
