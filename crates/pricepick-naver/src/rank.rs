//! Result filtering and lowest-total-price selection.
//!
//! The provider returns items in relevance order; ranking by total price
//! (item price + shipping fee) happens here, after discarding listings
//! that fail to parse or fall at or below the minimum-price floor.

use pricepick_core::ProcessedListing;
use regex::Regex;

use crate::types::ShopItem;

/// Mall name substituted when the provider omits one.
const FALLBACK_MALL_NAME: &str = "네이버쇼핑";

/// Picks the cheapest listing by total price.
///
/// Each raw item is parsed independently; an item that fails to parse is
/// skipped without affecting the rest of the batch. Listings whose total
/// falls at or below `min_total` are discarded as likely part/accessory
/// matches. On ties the earlier item wins, so the provider's relevance
/// order is the tie-breaker.
///
/// Returns `None` when no listing survives.
#[must_use]
pub fn pick_lowest(items: &[serde_json::Value], min_total: i64) -> Option<ProcessedListing> {
    let tags = Regex::new(r"<.*?>").expect("valid regex");

    let mut best: Option<ProcessedListing> = None;
    for value in items {
        let Some(listing) = process_item(value, &tags, min_total) else {
            continue;
        };
        // Strict comparison keeps the first of equal totals.
        let better = match &best {
            Some(current) => listing.total_price < current.total_price,
            None => true,
        };
        if better {
            best = Some(listing);
        }
    }
    best
}

/// Parses one raw item into a [`ProcessedListing`].
///
/// Returns `None` when required fields are missing, `lprice` is not an
/// integer, or the total falls at or below the floor.
fn process_item(
    value: &serde_json::Value,
    tags: &Regex,
    min_total: i64,
) -> Option<ProcessedListing> {
    let item: ShopItem = serde_json::from_value(value.clone()).ok()?;
    let price: i64 = item.lprice.parse().ok()?;
    let shipping = item.shipping_fee.as_deref().map_or(0, shipping_fee_value);
    let total_price = price + shipping;
    if total_price <= min_total {
        return None;
    }

    Some(ProcessedListing {
        title: tags.replace_all(&item.title, "").into_owned(),
        total_price,
        link: item.link,
        mall_name: item
            .mall_name
            .unwrap_or_else(|| FALLBACK_MALL_NAME.to_string()),
    })
}

/// Shipping-fee contribution of a raw `shippingFee` value: the parsed
/// number for a non-empty digit string, 0 for sentinels such as `"무료"`.
fn shipping_fee_value(raw: &str) -> i64 {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse().unwrap_or(0)
    } else {
        0
    }
}
