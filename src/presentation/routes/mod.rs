// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::settings::{CorsSettings, Settings};
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::engines::headless_search::CoupangSearchEngine;
use crate::engines::image_relay::ImageRelay;
use crate::engines::page_scraper::PageScraper;
use crate::engines::session::SessionManager;
use crate::infrastructure::marketplace::domeggook::DomeggookClient;
use crate::infrastructure::repositories::result_store::ResultStore;
use crate::infrastructure::search::shopping::ShoppingSearchClient;
use crate::infrastructure::storage::create_storage_repository;
use crate::presentation::handlers::{
    login_handler, marketplace_handler, proxy_handler, scrape_handler, search_handler,
};
use crate::utils::errors::ServiceError;

/// 所有处理器共享的组件
#[derive(Clone)]
pub struct AppComponents {
    pub sessions: Arc<SessionManager>,
    pub scraper: Arc<PageScraper>,
    pub store: Arc<ResultStore>,
    pub marketplace: Arc<DomeggookClient>,
    pub shopping: Arc<ShoppingSearchClient>,
    pub headless: Arc<CoupangSearchEngine>,
    pub images: Arc<ImageRelay>,
}

impl AppComponents {
    /// 按配置组装组件，结果目录使用本地文件系统
    pub async fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        let storage = create_storage_repository(&settings.storage);
        storage.ensure_dir().await?;
        Self::with_storage(settings, Arc::new(storage))
    }

    pub fn with_storage(
        settings: &Settings,
        storage: Arc<dyn StorageRepository>,
    ) -> Result<Self, ServiceError> {
        let sessions = Arc::new(SessionManager::new(settings.session.clone()));
        Ok(Self {
            scraper: Arc::new(PageScraper::new(sessions.clone())),
            sessions,
            store: Arc::new(ResultStore::new(storage)),
            marketplace: Arc::new(DomeggookClient::new(&settings.marketplace)?),
            shopping: Arc::new(ShoppingSearchClient::new(&settings.shopping)?),
            headless: Arc::new(CoupangSearchEngine::new(settings.headless.clone())?),
            images: Arc::new(ImageRelay::new(Duration::from_secs(
                settings.image_proxy.default_timeout_secs,
            ))),
        })
    }
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回未挂载组件的路由
pub fn routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/login", post(login_handler::login))
        .route("/api/scrape", post(scrape_handler::scrape))
        .route("/api/history", get(scrape_handler::history))
        .route("/api/download/{filename}", get(scrape_handler::download))
        .route("/api/export/{filename}", post(scrape_handler::export_csv))
        .route("/api/scrape/ggook", post(marketplace_handler::fetch_detail))
        .route("/api/proxy-image", get(proxy_handler::proxy_image))
        .route("/api/search/shopping", post(search_handler::shopping))
        .route("/api/search/coupang", post(search_handler::coupang))
}

/// 挂载组件、CORS 与请求追踪
pub fn build_router(components: AppComponents, cors: &CorsSettings) -> Router {
    routes()
        .layer(Extension(components.sessions))
        .layer(Extension(components.scraper))
        .layer(Extension(components.store))
        .layer(Extension(components.marketplace))
        .layer(Extension(components.shopping))
        .layer(Extension(components.headless))
        .layer(Extension(components.images))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// 允许配置中的来源，任意方法与请求头，并允许携带凭据
pub fn cors_layer(cors: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// 欢迎信息
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "marketscrape API is running" }))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}
