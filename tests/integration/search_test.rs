// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::{create_test_app, create_test_app_with};

#[tokio::test]
async fn test_shopping_search_passthrough() {
    let app = create_test_app().await;
    let upstream_body = json!({"total": 2, "items": [{"title": "a"}, {"title": "b"}]});
    Mock::given(method("GET"))
        .and(path("/v1/search/shop.json"))
        .and(query_param("query", "가방"))
        .and(header("X-Naver-Client-Id", "client-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/api/search/shopping")
        .json(&json!({"keyword": "가방"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"], upstream_body);
}

#[tokio::test]
async fn test_shopping_without_credentials_is_bad_request() {
    let app = create_test_app_with(|settings| settings.shopping.client_secret = None).await;

    let response = app
        .server
        .post("/api/search/shopping")
        .json(&json!({"keyword": "가방"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.upstream_requests().await, 0);
}

#[tokio::test]
async fn test_shopping_upstream_outage_is_forwarded() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/api/search/shopping")
        .json(&json!({"keyword": "가방"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_coupang_requires_keyword() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/search/coupang")
        .json(&json!({"keyword": "   "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_coupang_browser_failure_is_internal_error() {
    let app = create_test_app_with(|settings| {
        settings.headless.chrome_executable = Some("/nonexistent/marketscrape/chrome".to_string())
    })
    .await;

    let response = app
        .server
        .post("/api/search/coupang")
        .json(&json!({"keyword": "마우스"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(body["detail"].as_str().unwrap().contains("launch"));
}
