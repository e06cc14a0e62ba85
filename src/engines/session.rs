// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::RwLock;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::settings::SessionSettings;

/// 模拟桌面浏览器的 User-Agent
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// 登录与抓取共用的浏览器请求头
pub fn browser_headers(referer: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
    if let Ok(value) = HeaderValue::from_str(referer) {
        headers.insert(REFERER, value);
    }
    headers
}

/// 登录成功后的 HTTP 客户端，持有该次登录得到的 Cookie
#[derive(Debug)]
pub struct AuthenticatedClient {
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl AuthenticatedClient {
    fn build(settings: &SessionSettings) -> Result<Self, reqwest::Error> {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .default_headers(browser_headers(&settings.referer))
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, jar })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn cookies(&self) -> &Arc<Jar> {
        &self.jar
    }
}

/// 进程内唯一的登录会话
///
/// 多个读者并发抓取，只有 `login` 写入；最后一次成功的登录生效，
/// 失败的登录不会清除已有会话。
pub struct SessionManager {
    settings: SessionSettings,
    current: RwLock<Option<Arc<AuthenticatedClient>>>,
}

impl SessionManager {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            current: RwLock::new(None),
        }
    }

    /// 提交登录表单，HTTP 200 即视为成功
    ///
    /// 凭据错误与站点不可达不做区分，都返回 `false`。
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let session = match AuthenticatedClient::build(&self.settings) {
            Ok(session) => session,
            Err(e) => {
                warn!("Failed to build login client: {}", e);
                return false;
            }
        };

        let form = [
            ("mode", "login"),
            ("id", username),
            ("pw", password),
            ("save_id", "Y"),
        ];
        let response = match session
            .client
            .post(&self.settings.login_url)
            .form(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Login request failed: {}", e);
                return false;
            }
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("Login rejected with status {}", status);
            return false;
        }

        *self.current.write() = Some(Arc::new(session));
        info!("Login succeeded, session replaced");
        true
    }

    /// 当前会话的快照
    pub fn current(&self) -> Option<Arc<AuthenticatedClient>> {
        self.current.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.read().is_some()
    }
}
