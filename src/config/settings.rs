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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、CORS、存储、登录会话、各上游接口与无头浏览器的所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 跨域配置
    pub cors: CorsSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 登录会话配置
    pub session: SessionSettings,
    /// 批发市场接口配置
    pub marketplace: MarketplaceSettings,
    /// 购物搜索接口配置
    pub shopping: ShoppingSettings,
    /// 无头浏览器搜索配置
    pub headless: HeadlessSettings,
    /// 图片代理配置
    pub image_proxy: ImageProxySettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 跨域配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// 允许的来源，逗号分隔
    pub allowed_origins: String,
}

impl CorsSettings {
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 抓取结果目录
    pub data_dir: String,
}

/// 登录会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 登录接口地址
    pub login_url: String,
    /// 请求时携带的 Referer
    pub referer: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

/// 批发市场（도매꾹）接口配置
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceSettings {
    pub api_url: String,
    /// 接口密钥，缺失时详情查询直接校验失败
    pub api_key: Option<String>,
    pub api_version: String,
    pub timeout_secs: u64,
}

/// 购物搜索接口配置
#[derive(Debug, Clone, Deserialize)]
pub struct ShoppingSettings {
    pub api_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// 每次返回的条数
    pub display: u32,
    pub timeout_secs: u64,
}

/// 无头浏览器搜索配置
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessSettings {
    /// 搜索结果页地址（不含查询串）
    pub search_url: String,
    /// 站点源，用于把相对链接转换为绝对链接
    pub origin: String,
    /// 等待结果元素出现的上限（秒）
    pub wait_timeout_secs: u64,
    /// 探测间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 整个搜索流程的上限（秒）
    pub navigation_timeout_secs: u64,
    /// 最多返回的商品数
    pub max_results: usize,
    /// 自定义浏览器可执行文件路径
    pub chrome_executable: Option<String>,
}

impl HeadlessSettings {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

/// 图片代理配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageProxySettings {
    /// 调用方未指定时的超时（秒）
    pub default_timeout_secs: u64,
}

/// 旧部署使用的扁平环境变量与配置键的对应关系
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("ALLOWED_ORIGINS", "cors.allowed_origins"),
    ("DATA_DIR", "storage.data_dir"),
    ("API_KEY", "marketplace.api_key"),
    ("NAVER_CLIENT_ID", "shopping.client_id"),
    ("NAVER_CLIENT_SECRET", "shopping.client_secret"),
];

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、配置文件、`MARKETSCRAPE__` 前缀环境变量以及旧的扁平环境变量加载配置
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("MARKETSCRAPE").separator("__"));

        for (var, key) in LEGACY_ENV_KEYS {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize()
    }

    /// 仅由默认值构成的配置，测试中用它再覆盖个别字段
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Server
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8000)?
            .set_default("cors.allowed_origins", "http://localhost:3000")?
            // Storage
            .set_default("storage.data_dir", "scraped_data")?
            // Login session
            .set_default("session.login_url", "https://domeggook.com/main/member/login.php")?
            .set_default("session.referer", "https://domeggook.com/")?
            .set_default("session.timeout_secs", 30)?
            // Marketplace API
            .set_default("marketplace.api_url", "https://domeggook.com/ssl/api/")?
            .set_default("marketplace.api_version", "4.4")?
            .set_default("marketplace.timeout_secs", 10)?
            // Shopping search API
            .set_default("shopping.api_url", "https://openapi.naver.com/v1/search/shop.json")?
            .set_default("shopping.display", 20)?
            .set_default("shopping.timeout_secs", 10)?
            // Headless search
            .set_default("headless.search_url", "https://www.coupang.com/np/search")?
            .set_default("headless.origin", "https://www.coupang.com")?
            .set_default("headless.wait_timeout_secs", 10)?
            .set_default("headless.poll_interval_ms", 250)?
            .set_default("headless.navigation_timeout_secs", 30)?
            .set_default("headless.max_results", 10)?
            // Image proxy
            .set_default("image_proxy.default_timeout_secs", 60)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
