// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::xml_value::xml_to_value;
use crate::config::settings::MarketplaceSettings;
use crate::domain::models::marketplace::{MarketplaceDetail, VendorPayload};
use crate::utils::errors::ServiceError;
use crate::utils::text_encoding::truncate_chars;

const BODY_PREVIEW_CHARS: usize = 500;

/// 批发市场商品详情接口客户端
pub struct DomeggookClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    api_version: String,
    timeout: Duration,
}

impl DomeggookClient {
    pub fn new(settings: &MarketplaceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ServiceError::from_transport(e, "marketplace client"))?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }

    /// 查询商品详情并附加描述中的图片地址
    ///
    /// 缺少密钥或商品编号时不发起请求。
    pub async fn fetch_detail(&self, product_no: &str) -> Result<MarketplaceDetail, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ServiceError::validation("marketplace API key is not configured"))?;
        let product_no = product_no.trim();
        if product_no.is_empty() {
            return Err(ServiceError::validation("product number is required"));
        }

        info!("Fetching marketplace detail for product {}", product_no);
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("ver", self.api_version.as_str()),
                ("mode", "getItemView"),
                ("aid", api_key),
                ("no", product_no),
                ("om", "json"),
            ])
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ServiceError::from_transport(e, "marketplace API"))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::from_transport(e, "marketplace API"))?;

        debug!(
            "Marketplace API responded {} ({}): {}",
            status,
            content_type,
            truncate_chars(&body, BODY_PREVIEW_CHARS, "...")
        );

        if !status.is_success() {
            return Err(ServiceError::upstream_status(status.as_u16(), "marketplace API"));
        }

        let payload = decode_payload(&content_type, &body)?;
        let detail_images = payload.detail_images();
        debug!(
            "Decoded {} payload with {} detail images",
            payload.format(),
            detail_images.len()
        );

        match payload.into_value() {
            Value::Object(payload) => Ok(MarketplaceDetail {
                payload,
                detail_images,
            }),
            _ => Err(ServiceError::Parse(
                "marketplace API response is not an object".to_string(),
            )),
        }
    }
}

/// 按 content-type 选择解码方式
pub fn decode_payload(content_type: &str, body: &str) -> Result<VendorPayload, ServiceError> {
    if content_type.to_ascii_lowercase().contains("xml") {
        xml_to_value(body)
            .map(VendorPayload::Xml)
            .map_err(|e| ServiceError::Parse(format!("invalid marketplace XML: {}", e)))
    } else {
        serde_json::from_str(body)
            .map(VendorPayload::Json)
            .map_err(|e| ServiceError::Parse(format!("invalid marketplace JSON: {}", e)))
    }
}

#[cfg(test)]
#[path = "domeggook_test.rs"]
mod tests;
