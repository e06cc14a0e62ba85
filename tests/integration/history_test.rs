// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use chrono::{Local, TimeZone};
use marketscrape::domain::models::scrape_result::{
    FieldDescriptor, FormDescriptor, ScrapeResult,
};
use serde_json::Value;

use super::helpers::create_test_app;

fn result(url: &str, timestamp: &str) -> ScrapeResult {
    ScrapeResult {
        url: url.to_string(),
        timestamp: timestamp.to_string(),
        html: "<html></html>".to_string(),
        title: String::new(),
        forms: vec![FormDescriptor {
            action: "/go".to_string(),
            method: "get".to_string(),
            fields: vec![FieldDescriptor {
                field_type: "email".to_string(),
                name: String::new(),
                id: "mail".to_string(),
                value: String::new(),
                required: true,
            }],
        }],
    }
}

#[tokio::test]
async fn test_history_is_sorted_newest_first() {
    let app = create_test_app().await;
    let store = &app.components.store;

    for (hour, url) in [(10, "http://b.test"), (9, "http://a.test"), (11, "http://c.test")] {
        let at = Local.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap();
        let ts = format!("2025-03-01T{:02}:00:00.000000", hour);
        store.save_at(&result(url, &ts), at).await.unwrap();
    }

    let response = app.server.get("/api/history").await;
    response.assert_status_ok();
    let entries: Vec<Value> = response.json();

    let urls: Vec<_> = entries.iter().map(|e| e["url"].as_str().unwrap()).collect();
    assert_eq!(urls, vec!["http://c.test", "http://b.test", "http://a.test"]);
    assert_eq!(entries[0]["filename"], "scraped_20250301110000.json");
}

#[tokio::test]
async fn test_history_fails_on_corrupt_file() {
    let app = create_test_app().await;
    std::fs::write(app.data_dir.path().join("scraped_broken.json"), "{oops").unwrap();

    let response = app.server.get("/api/history").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_download_and_export() {
    let app = create_test_app().await;
    let at = Local.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let key = app
        .components
        .store
        .save_at(&result("http://d.test", "2025-03-01T12:00:00.000000"), at)
        .await
        .unwrap();

    let download = app.server.get(&format!("/api/download/{}", key)).await;
    download.assert_status_ok();
    assert!(download
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains(&key));
    let saved: Value = download.json();
    assert_eq!(saved["url"], "http://d.test");

    let export = app.server.post(&format!("/api/export/{}", key)).await;
    export.assert_status_ok();
    let csv_key = export.json::<Value>()["filename"].as_str().unwrap().to_string();
    assert!(csv_key.ends_with(".csv"));

    let csv = app.server.get(&format!("/api/download/{}", csv_key)).await;
    csv.assert_status_ok();
    let text = csv.text();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Form,Action,Method,Field Name,Field Type,Required")
    );
    assert_eq!(lines.next(), Some("Form 1,/go,get,mail,email,Yes"));

    // CSV 导出不出现在历史中
    let history: Vec<Value> = app.server.get("/api/history").await.json();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_missing_files_are_not_found() {
    let app = create_test_app().await;

    let download = app.server.get("/api/download/scraped_20000101000000.json").await;
    assert_eq!(download.status_code(), StatusCode::NOT_FOUND);

    let export = app.server.post("/api/export/scraped_20000101000000.json").await;
    assert_eq!(export.status_code(), StatusCode::NOT_FOUND);
}
