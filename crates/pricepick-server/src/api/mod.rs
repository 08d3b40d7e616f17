mod lowest_price;

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use pricepick_core::QueryRules;
use pricepick_naver::NaverShopClient;
use serde::Serialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<NaverShopClient>,
    pub query_rules: Arc<QueryRules>,
    pub min_total_price: i64,
    pub affiliate_link: String,
}

/// Error body on the wire: a flat `{"error": "…"}` object.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/get_lowest_price",
            post(lowest_price::get_lowest_price).options(preflight),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// Legacy clients probe the endpoint with a bare OPTIONS call and expect a
/// JSON body; real CORS preflights are answered by the cors layer.
async fn preflight() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(base_url: &str) -> Router {
        let search = NaverShopClient::with_base_url("test-id", "test-secret", 5, base_url)
            .expect("client construction should not fail");
        build_app(AppState {
            search: Arc::new(search),
            query_rules: Arc::new(QueryRules::new(vec!["정품".to_string()], 25)),
            min_total_price: 5000,
            affiliate_link: "https://link.coupang.com/a/test".to_string(),
        })
    }

    async fn post_product(app: Router, product_name: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/get_lowest_price")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "product_name": product_name }).to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json parse"))
    }

    fn shop_body(items: serde_json::Value) -> serde_json::Value {
        json!({
            "total": items.as_array().map_or(0, Vec::len),
            "start": 1,
            "display": items.as_array().map_or(0, Vec::len),
            "items": items
        })
    }

    #[tokio::test]
    async fn returns_lowest_total_with_affiliate_link() {
        let server = MockServer::start().await;
        let items = json!([
            {
                "title": "<b>무선 키보드</b> 풀세트",
                "link": "https://search.shopping.naver.com/gate?id=1",
                "lprice": "15000",
                "shippingFee": "0",
                "mallName": "비싼몰"
            },
            {
                "title": "무선 키보드",
                "link": "https://search.shopping.naver.com/gate?id=2",
                "lprice": "10000",
                "shippingFee": "2000",
                "mallName": "싼몰"
            }
        ]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shop_body(items)))
            .mount(&server)
            .await;

        let (status, body) = post_product(test_app(&server.uri()), "무선 키보드").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lprice"], 12_000);
        assert_eq!(
            body["naver_link"],
            "https://search.shopping.naver.com/gate?id=2"
        );
        assert_eq!(body["coupang_link"], "https://link.coupang.com/a/test");
        assert_eq!(body["mallName"], "싼몰");
    }

    #[tokio::test]
    async fn lprice_carries_computed_total_not_raw_price() {
        let server = MockServer::start().await;
        let items = json!([{
            "title": "무선 키보드",
            "link": "https://search.shopping.naver.com/gate?id=1",
            "lprice": "10000",
            "shippingFee": "2500",
            "mallName": "키보드샵"
        }]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shop_body(items)))
            .mount(&server)
            .await;

        let (status, body) = post_product(test_app(&server.uri()), "무선 키보드").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lprice"], 12_500);
        assert_eq!(body["title"], "무선 키보드");
    }

    #[tokio::test]
    async fn no_items_returns_404_no_search_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shop_body(json!([]))))
            .mount(&server)
            .await;

        let (status, body) = post_product(test_app(&server.uri()), "없는상품").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no search results");
    }

    #[tokio::test]
    async fn all_filtered_returns_404_no_valid_items() {
        let server = MockServer::start().await;
        let items = json!([{
            "title": "키보드 키캡 1개",
            "link": "https://search.shopping.naver.com/gate?id=1",
            "lprice": "3000",
            "shippingFee": "0",
            "mallName": "부품몰"
        }]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shop_body(items)))
            .mount(&server)
            .await;

        let (status, body) = post_product(test_app(&server.uri()), "키보드").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no valid items after filtering");
    }

    #[tokio::test]
    async fn provider_failure_returns_500_with_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let (status, body) = post_product(test_app(&server.uri()), "키보드").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body["error"].as_str().is_some_and(|e| !e.is_empty()),
            "500 body should carry an error message: {body}"
        );
    }

    #[tokio::test]
    async fn handler_normalizes_query_before_searching() {
        let server = MockServer::start().await;
        // The mock only matches the cleaned keyword; expect(1) fails the
        // test if the raw decorated name reaches the provider instead.
        Mock::given(method("GET"))
            .and(query_param("query", "무선 키보드"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shop_body(json!([]))))
            .expect(1)
            .mount(&server)
            .await;

        let (status, _) = post_product(test_app(&server.uri()), "[박스] 정품 무선 키보드").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_product_name_defaults_to_empty_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("query", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(shop_body(json!([]))))
            .expect(1)
            .mount(&server)
            .await;

        let app = test_app(&server.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/get_lowest_price")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn options_returns_status_ok_body() {
        let server = MockServer::start().await;
        let app = test_app(&server.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/get_lowest_price")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let server = MockServer::start().await;
        let app = test_app(&server.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["status"], "ok");
    }
}
