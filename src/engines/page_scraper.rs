// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::session::SessionManager;
use crate::domain::models::scrape_result::ScrapeResult;
use crate::domain::services::form_extractor::parse_page;
use crate::utils::errors::ServiceError;
use crate::utils::text_encoding::decode_html;

/// 使用登录会话抓取网页并提取标题与表单
pub struct PageScraper {
    sessions: Arc<SessionManager>,
}

impl PageScraper {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// 抓取单个页面
    ///
    /// # 参数
    ///
    /// * `url` - 目标网页地址
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResult)` - 完整 HTML、标题与表单
    /// * `Err(ServiceError::Auth)` - 尚未登录，此时不会发出任何请求
    /// * `Err(ServiceError::Upstream)` - 目标站点返回非 200
    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult, ServiceError> {
        let session = self
            .sessions
            .current()
            .ok_or_else(|| ServiceError::Auth("login required before scraping".to_string()))?;

        let target = Url::parse(url.trim())
            .map_err(|e| ServiceError::validation(format!("invalid url '{}': {}", url, e)))?;

        info!("Scraping {}", target);
        let response = session
            .client()
            .get(target.as_str())
            .send()
            .await
            .map_err(|e| ServiceError::from_transport(e, "target page"))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ServiceError::upstream_status(status.as_u16(), "target page"));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::from_transport(e, "target page"))?;
        let (html, decoded_as) = decode_html(&bytes);
        debug!("Decoded {} bytes from {} as {:?}", bytes.len(), target, decoded_as);

        let page = parse_page(&html);
        info!(
            "Scraped {} ({} forms, title '{}')",
            target,
            page.forms.len(),
            page.title
        );
        Ok(ScrapeResult::new(url.to_string(), html, page.title, page.forms))
    }
}
