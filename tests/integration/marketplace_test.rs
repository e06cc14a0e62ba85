// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::{create_test_app, create_test_app_with, TEST_API_KEY};

#[tokio::test]
async fn test_ggook_detail_with_images() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/ssl/api/"))
        .and(query_param("aid", TEST_API_KEY))
        .and(query_param("no", "777"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domeggook": {
                "basis": {"title": "테스트 상품"},
                "desc": {"contents": {"item": "<p><img src=\"https://img.test/1.jpg\"></p>"}}
            }
        })))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/api/scrape/ggook")
        .json(&json!({"productNo": "777"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["domeggook"]["basis"]["title"], "테스트 상품");
    assert_eq!(body["data"]["detail_images"], json!(["https://img.test/1.jpg"]));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_ggook_missing_api_key_is_bad_request() {
    let app = create_test_app_with(|settings| settings.marketplace.api_key = None).await;

    let response = app
        .server
        .post("/api/scrape/ggook")
        .json(&json!({"productNo": "777"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.upstream_requests().await, 0);
}

#[tokio::test]
async fn test_ggook_upstream_failure_is_server_error() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/ssl/api/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/api/scrape/ggook")
        .json(&json!({"productNo": "777"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>()["detail"]
        .as_str()
        .unwrap()
        .contains("503"));
}
