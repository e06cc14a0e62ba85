// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chromiumoxide::Page;
use tracing::{info, warn};
use url::Url;

use super::browser_session::{BrowserSession, LaunchOptions};
use crate::config::settings::HeadlessSettings;
use crate::domain::models::product::ProductRecord;
use crate::domain::services::product_extractor::{
    extract_products, CompiledSelectors, ProductSelectors,
};
use crate::utils::errors::ServiceError;
use crate::utils::wait::wait_for;

/// 单次搜索返回的商品数上限，配置值只能调低
pub const MAX_PRODUCTS: usize = 10;

/// 基于无头浏览器的商品搜索
///
/// 每次调用都启动一个独立浏览器，渲染搜索结果页后对 DOM 快照做提取。
pub struct CoupangSearchEngine {
    settings: HeadlessSettings,
    selectors: ProductSelectors,
    compiled: CompiledSelectors,
    origin: Url,
}

impl CoupangSearchEngine {
    pub fn new(settings: HeadlessSettings) -> Result<Self, ServiceError> {
        Self::with_selectors(settings, ProductSelectors::default())
    }

    pub fn with_selectors(
        settings: HeadlessSettings,
        selectors: ProductSelectors,
    ) -> Result<Self, ServiceError> {
        let compiled = CompiledSelectors::compile(&selectors).map_err(ServiceError::Parse)?;
        let origin = Url::parse(&settings.origin).map_err(|e| {
            ServiceError::validation(format!("invalid site origin '{}': {}", settings.origin, e))
        })?;
        Ok(Self {
            settings,
            selectors,
            compiled,
            origin,
        })
    }

    /// `<search_url>?q=<keyword>&channel=user`
    pub fn search_url(&self, keyword: &str) -> Result<Url, ServiceError> {
        Url::parse_with_params(
            &self.settings.search_url,
            &[("q", keyword), ("channel", "user")],
        )
        .map_err(|e| ServiceError::validation(format!("invalid search url: {}", e)))
    }

    /// 对已渲染的 HTML 做提取，不涉及浏览器
    pub fn extract(&self, html: &str) -> Vec<ProductRecord> {
        let limit = self.settings.max_results.min(MAX_PRODUCTS);
        extract_products(html, &self.origin, &self.compiled, limit)
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<ProductRecord>, ServiceError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ServiceError::validation("keyword is required"));
        }
        let url = self.search_url(keyword)?;

        let options = LaunchOptions {
            chrome_executable: self.settings.chrome_executable.clone(),
            request_timeout: Some(self.settings.navigation_timeout()),
            profile_root: None,
        };
        let session = BrowserSession::launch(&options).await?;

        let navigation_timeout = self.settings.navigation_timeout();
        let rendered = tokio::time::timeout(navigation_timeout, self.render(&session, &url)).await;
        session.close().await;

        let html = match rendered {
            Ok(result) => result?,
            Err(_) => {
                return Err(ServiceError::Timeout(format!(
                    "search page did not finish within {:?}",
                    navigation_timeout
                )))
            }
        };

        let products = self.extract(&html);
        info!("Headless search for '{}' returned {} products", keyword, products.len());
        Ok(products)
    }

    async fn render(&self, session: &BrowserSession, url: &Url) -> Result<String, ServiceError> {
        let page = session.new_page(url.as_str()).await?;

        let item_selector = self.selectors.item.as_str();
        wait_for(
            self.settings.wait_timeout(),
            self.settings.poll_interval(),
            || has_results(&page, item_selector),
        )
        .await
        .map_err(|e| {
            warn!("No search results appeared for {}", url);
            ServiceError::Timeout(format!("search results did not appear: {}", e))
        })?;

        page.content().await.map_err(|e| ServiceError::Upstream {
            status: None,
            message: format!("failed to read rendered page: {}", e),
        })
    }
}

async fn has_results(page: &Page, selector: &str) -> Option<()> {
    match page.find_elements(selector).await {
        Ok(elements) if !elements.is_empty() => Some(()),
        _ => None,
    }
}
