// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use regex::Regex;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::create_test_app;

const MEMBER_PAGE: &str = r#"<html><head><title>회원 페이지</title></head><body>
<form action="/order" method="post">
  <input type="text" name="qty" required>
  <select name="option"></select>
  <textarea id="memo"></textarea>
</form>
<form><input type="hidden" name="token" value="abc"></form>
</body></html>"#;

/// 未登录时抓取被拒绝，且不会访问目标站点
#[tokio::test]
async fn test_scrape_without_login_is_rejected_without_requests() {
    let app = create_test_app().await;
    let target = format!("{}/member", app.upstream.uri());

    let response = app.server.post("/api/scrape").json(&json!({ "url": target })).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(body["detail"].as_str().unwrap().contains("login"));
    assert_eq!(app.upstream_requests().await, 0);
}

/// 登录后抓取：返回完整结果并按时间戳命名保存
#[tokio::test]
async fn test_scrape_after_login_returns_and_persists_result() {
    let app = create_test_app().await;
    app.login().await;

    let long_page = format!("{}<!--{}-->", MEMBER_PAGE, "x".repeat(2000));
    Mock::given(method("GET"))
        .and(path("/member"))
        .and(header("cookie", "SID=session-1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(long_page.clone(), "text/html"))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let target = format!("{}/member", app.upstream.uri());
    let response = app.server.post("/api/scrape").json(&json!({ "url": target })).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["url"], target);
    assert_eq!(body["data"]["title"], "회원 페이지");
    assert_eq!(body["data"]["html"], long_page);

    let forms = body["data"]["forms"].as_array().unwrap();
    assert_eq!(forms.len(), 2);
    assert_eq!(forms[0]["method"], "post");
    assert_eq!(forms[0]["fields"].as_array().unwrap().len(), 3);
    assert_eq!(forms[0]["fields"][0]["required"], true);
    assert_eq!(forms[1]["method"], "get");
    assert_eq!(forms[1]["fields"][0]["type"], "hidden");

    let filename = body["filename"].as_str().unwrap();
    assert!(Regex::new(r"^scraped_\d{14}\.json$").unwrap().is_match(filename));

    // 磁盘上的副本被截断，响应中的 HTML 完整
    let stored = std::fs::read_to_string(app.data_dir.path().join(filename)).unwrap();
    let stored: Value = serde_json::from_str(&stored).unwrap();
    let stored_html = stored["html"].as_str().unwrap();
    assert_eq!(stored_html.chars().count(), 1003);
    assert!(stored_html.ends_with("..."));
}

#[tokio::test]
async fn test_scrape_upstream_failure_is_bad_request() {
    let app = create_test_app().await;
    app.login().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/api/scrape")
        .json(&json!({ "url": format!("{}/broken", app.upstream.uri()) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_login_failure_is_unauthorized() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/main/member/login.php"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/api/login")
        .json(&json!({"username": "tester", "password": "wrong"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["status"], "error");
    assert!(!app.components.sessions.is_logged_in());
}

#[tokio::test]
async fn test_login_success_message() {
    let app = create_test_app().await;
    app.login().await;
    assert!(app.components.sessions.is_logged_in());
}

/// 凭据原样转发，不做裁剪
#[tokio::test]
async fn test_login_forwards_credentials_verbatim() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path("/main/member/login.php"))
        .and(body_string_contains("id=+tester+&"))
        .and(body_string_contains("pw=+pw+&"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/api/login")
        .json(&json!({"username": " tester ", "password": " pw "}))
        .await;

    response.assert_status_ok();
    assert!(app.components.sessions.is_logged_in());
}
