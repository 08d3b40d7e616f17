//! The lowest-price lookup operation: normalize the product name, query the
//! shop-search API, and return the cheapest listing by total price.

use axum::{extract::State, Extension, Json};
use pricepick_naver::pick_lowest;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub struct LowestPriceRequest {
    /// Raw product name; a missing field is treated as the empty string.
    #[serde(default)]
    pub product_name: String,
}

/// Successful lookup payload.
///
/// `lprice` carries the computed total (item price + shipping fee), not the
/// provider's raw low-price field. Existing clients key on this name, so
/// the historical alias stays.
#[derive(Debug, Serialize)]
pub struct LowestPriceResponse {
    pub title: String,
    pub lprice: i64,
    pub naver_link: String,
    pub coupang_link: String,
    #[serde(rename = "mallName")]
    pub mall_name: String,
}

/// `POST /get_lowest_price`
///
/// Two distinct empty outcomes map to 404: the provider returned no items
/// at all ("no search results") vs every item being filtered out or
/// unparsable ("no valid items after filtering"). Outbound failures map
/// to 500 with the client error's display text.
pub async fn get_lowest_price(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<LowestPriceRequest>,
) -> Result<Json<LowestPriceResponse>, ApiError> {
    let keyword = state.query_rules.normalize(&request.product_name);
    tracing::debug!(request_id = %request_id.0, keyword = %keyword, "searching shop listings");

    let items = state.search.search(&keyword).await.map_err(|e| {
        tracing::error!(request_id = %request_id.0, error = %e, "shop search failed");
        ApiError::internal(e.to_string())
    })?;

    if items.is_empty() {
        return Err(ApiError::not_found("no search results"));
    }

    let Some(best) = pick_lowest(&items, state.min_total_price) else {
        return Err(ApiError::not_found("no valid items after filtering"));
    };

    tracing::info!(
        request_id = %request_id.0,
        keyword = %keyword,
        total_price = best.total_price,
        mall = %best.mall_name,
        "lowest listing selected"
    );

    Ok(Json(LowestPriceResponse {
        title: best.title,
        lprice: best.total_price,
        naver_link: best.link,
        coupang_link: state.affiliate_link.clone(),
        mall_name: best.mall_name,
    }))
}
