//! HTTP client for the Naver shop-search API.
//!
//! Wraps `reqwest` with credential-header management and typed error
//! handling. Credentials travel only in request headers and are never
//! logged or embedded in URLs.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::NaverError;
use crate::types::ShopSearchResponse;

const DEFAULT_BASE_URL: &str = "https://openapi.naver.com/v1/search/shop.json";

/// Results requested per call. Ten relevance-ordered items are enough to
/// surface a complete-product listing; asking for more mostly adds
/// accessory matches.
const DISPLAY_COUNT: &str = "10";

/// Relevance sort. Sorting by price would put parts and accessories first;
/// ranking by total price happens locally over the relevance-ordered set.
const SORT_MODE: &str = "sim";

/// Client for the Naver shop-search API.
///
/// Manages the HTTP client, credential headers, and base URL. Use
/// [`NaverShopClient::new`] for production or
/// [`NaverShopClient::with_base_url`] to point at a mock server in tests.
pub struct NaverShopClient {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: Url,
}

impl NaverShopClient {
    /// Creates a new client pointed at the production search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
    ) -> Result<Self, NaverError> {
        Self::with_base_url(client_id, client_secret, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NaverError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NaverError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pricepick/0.1 (lowest-price-lookup)")
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| NaverError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            base_url,
        })
    }

    /// Searches shop listings for the given keyword.
    ///
    /// Issues one GET with `display=10` and `sort=sim` and returns the
    /// envelope's `items` array verbatim. An empty vec is a valid result
    /// meaning "no matches". An empty keyword is sent as-is; the provider
    /// simply returns nothing relevant.
    ///
    /// # Errors
    ///
    /// - [`NaverError::Http`] on network failure or a non-2xx status.
    /// - [`NaverError::Deserialize`] if the body is not JSON or does not
    ///   match the envelope shape.
    pub async fn search(&self, query: &str) -> Result<Vec<serde_json::Value>, NaverError> {
        let url = self.build_url(query);
        let body = self.request_json(&url).await?;

        let envelope: ShopSearchResponse =
            serde_json::from_value(body).map_err(|e| NaverError::Deserialize {
                context: format!("shop search(query={query})"),
                source: e,
            })?;

        tracing::debug!(
            total = envelope.total,
            returned = envelope.items.len(),
            "shop search response"
        );
        Ok(envelope.items)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            pairs.append_pair("display", DISPLAY_COUNT);
            pairs.append_pair("sort", SORT_MODE);
        }
        url
    }

    /// Sends a GET with the credential headers, asserts a 2xx status, and
    /// parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Http`] on network failure or a non-2xx status.
    /// Returns [`NaverError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, NaverError> {
        let response = self
            .client
            .get(url.clone())
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| NaverError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
