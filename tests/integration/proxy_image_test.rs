// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::create_test_app;

#[tokio::test]
async fn test_proxy_streams_image() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/img/item"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89u8, b'P', b'N', b'G'], "image/png"))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/proxy-image")
        .add_query_param("url", format!("{}/img/item#fragment", app.upstream.uri()))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains("item.png"));
    assert_eq!(response.as_bytes().as_ref(), &[0x89u8, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_proxy_timeout_is_gateway_timeout() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/slow.jpg"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/proxy-image")
        .add_query_param("url", format!("{}/slow.jpg", app.upstream.uri()))
        .add_query_param("timeout", 1)
        .await;

    assert_eq!(response.status_code(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_proxy_forwards_upstream_status() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/proxy-image")
        .add_query_param("url", format!("{}/missing.jpg", app.upstream.uri()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_proxy_requires_url() {
    let app = create_test_app().await;

    let response = app.server.get("/api/proxy-image").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let blank = app.server.get("/api/proxy-image").add_query_param("url", "").await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);
}
