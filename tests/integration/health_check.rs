// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use marketscrape::presentation::routes;
use tower::util::ServiceExt;

use super::helpers::create_test_app;

/// 健康检查测试
///
/// 路由本身不依赖任何组件
#[tokio::test]
async fn health_check_works() {
    let app = routes::routes();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = create_test_app().await;

    let response = app.server.get("/").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn cors_allows_configured_origin_with_credentials() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/health")
        .add_header("origin", "http://localhost:3000")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        "http://localhost:3000"
    );
    assert_eq!(response.header("access-control-allow-credentials"), "true");
}
