// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::settings::ShoppingSettings;
use crate::utils::errors::ServiceError;

/// 购物搜索开放接口客户端
///
/// 上游 JSON 原样透传，不做任何字段映射。
pub struct ShoppingSearchClient {
    client: reqwest::Client,
    api_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    display: u32,
    timeout: Duration,
}

impl ShoppingSearchClient {
    pub fn new(settings: &ShoppingSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ServiceError::from_transport(e, "shopping search client"))?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            display: settings.display,
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }

    pub async fn search(&self, keyword: &str) -> Result<Value, ServiceError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ServiceError::validation("keyword is required"));
        }
        let (client_id, client_secret) = match (non_empty(&self.client_id), non_empty(&self.client_secret)) {
            (Some(id), Some(secret)) => (id, secret),
            _ => {
                return Err(ServiceError::validation(
                    "shopping search credentials are not configured",
                ))
            }
        };

        info!("Searching shopping API for '{}'", keyword);
        let display = self.display.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("query", keyword), ("display", display.as_str())])
            .header("X-Naver-Client-Id", client_id)
            .header("X-Naver-Client-Secret", client_secret)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ServiceError::from_transport(e, "shopping search API"))?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            return Err(ServiceError::Upstream {
                // 4xx 按网关错误处理
                status: (code >= 500).then_some(code),
                message: format!("shopping search API returned status {}", code),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(format!("invalid shopping search response: {}", e)))?;
        let item_count = body.get("items").and_then(Value::as_array).map_or(0, Vec::len);
        debug!("Shopping search returned {} items", item_count);
        Ok(body)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
