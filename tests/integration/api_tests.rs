// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::{json, Value};

use super::helpers::create_test_app;

/// 请求体格式错误或缺少必填字段时返回 400，且不触发任何上游请求
#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let app = create_test_app().await;

    let endpoints = [
        "/api/scrape",
        "/api/login",
        "/api/scrape/ggook",
        "/api/search/shopping",
        "/api/search/coupang",
    ];

    for endpoint in endpoints {
        let broken = app
            .server
            .post(endpoint)
            .bytes(Bytes::from_static(b"{not json"))
            .content_type("application/json")
            .await;
        assert_eq!(broken.status_code(), StatusCode::BAD_REQUEST, "{}", endpoint);
        assert_eq!(broken.json::<Value>()["status"], "error");

        let empty = app.server.post(endpoint).json(&json!({})).await;
        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST, "{}", endpoint);
    }

    assert_eq!(app.upstream_requests().await, 0);
}

#[tokio::test]
async fn test_blank_fields_are_bad_requests() {
    let app = create_test_app().await;

    let cases = [
        ("/api/scrape", json!({"url": "not a url"})),
        ("/api/login", json!({"username": "  ", "password": "pw"})),
        ("/api/login", json!({"username": "u", "password": ""})),
        ("/api/scrape/ggook", json!({"productNo": "   "})),
        ("/api/search/coupang", json!({"keyword": ""})),
    ];

    for (endpoint, body) in cases {
        let response = app.server.post(endpoint).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{} {}", endpoint, body);
    }

    assert_eq!(app.upstream_requests().await, 0);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app().await;
    let response = app.server.get("/api/unknown").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
