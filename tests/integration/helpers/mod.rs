// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use marketscrape::config::settings::Settings;
use marketscrape::presentation::routes::{build_router, AppComponents};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    /// 模拟的上游站点（登录页、目标网页、各开放接口、图片源）
    pub upstream: MockServer,
    pub components: AppComponents,
    pub data_dir: TempDir,
}

impl TestApp {
    pub async fn upstream_requests(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// 挂载一个接受任何凭据的登录页并完成登录
    pub async fn login(&self) {
        Mock::given(method("POST"))
            .and(path("/main/member/login.php"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "SID=session-1; Path=/"),
            )
            .mount(&self.upstream)
            .await;

        let response = self
            .server
            .post("/api/login")
            .json(&serde_json::json!({"username": "tester", "password": "pw"}))
            .await;
        response.assert_status_ok();
    }
}

/// 所有上游地址都指向同一个 MockServer，数据目录为临时目录
pub fn test_settings(upstream: &MockServer, data_dir: &TempDir) -> Settings {
    let mut settings = Settings::from_defaults().expect("default settings are valid");
    settings.storage.data_dir = data_dir.path().to_string_lossy().into_owned();
    settings.session.login_url = format!("{}/main/member/login.php", upstream.uri());
    settings.session.referer = format!("{}/", upstream.uri());
    settings.session.timeout_secs = 5;
    settings.marketplace.api_url = format!("{}/ssl/api/", upstream.uri());
    settings.marketplace.api_key = Some(TEST_API_KEY.to_string());
    settings.shopping.api_url = format!("{}/v1/search/shop.json", upstream.uri());
    settings.shopping.client_id = Some("client-id".to_string());
    settings.shopping.client_secret = Some("client-secret".to_string());
    settings
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(|_| {}).await
}

pub async fn create_test_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    let upstream = MockServer::start().await;
    let data_dir = tempfile::tempdir().expect("create temp data dir");
    let mut settings = test_settings(&upstream, &data_dir);
    customize(&mut settings);

    let components = AppComponents::from_settings(&settings)
        .await
        .expect("build components");
    let router = build_router(components.clone(), &settings.cors);
    let server = TestServer::new(router).expect("start test server");

    TestApp {
        server,
        upstream,
        components,
        data_dir,
    }
}
