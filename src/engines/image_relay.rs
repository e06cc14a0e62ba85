// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::header::{CONTENT_TYPE, REFERER, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::session::BROWSER_USER_AGENT;
use crate::utils::errors::ServiceError;
use crate::utils::url_utils::{last_path_segment, strip_fragment};

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// 扩展名与 MIME 类型对照
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

/// 转发中的图片
pub struct RelayedImage {
    pub content_type: String,
    pub filename: String,
    pub body: BoxStream<'static, Result<Bytes, reqwest::Error>>,
}

/// 图片代理：以浏览器身份取回第三方图片并流式转发
///
/// 不校验上游证书链，部分批发站点的证书配置有误。
pub struct ImageRelay {
    default_timeout: Duration,
}

impl ImageRelay {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    /// # 参数
    ///
    /// * `url` - 图片地址，末尾的 `#...` 会被去掉
    /// * `timeout` - 调用方指定的超时，缺省用配置值
    pub async fn relay(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<RelayedImage, ServiceError> {
        let raw = strip_fragment(url.trim());
        if raw.is_empty() {
            return Err(ServiceError::validation("image url is required"));
        }
        let target = Url::parse(raw)
            .map_err(|e| ServiceError::validation(format!("invalid image url '{}': {}", raw, e)))?;
        let timeout = timeout.unwrap_or(self.default_timeout);

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::from_transport(e, "image client"))?;

        let referer = format!("{}/", target.origin().ascii_serialization());
        info!("Relaying image {} (timeout {:?})", target, timeout);
        let response = client
            .get(target.as_str())
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, referer)
            .send()
            .await
            .map_err(|e| ServiceError::from_transport(e, "image host"))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ServiceError::upstream_status(status.as_u16(), "image host"));
        }

        let header_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = resolve_content_type(header_type.as_deref(), &target);
        let filename = download_filename(&target, &content_type);
        debug!("Image {} served as {} ({})", target, filename, content_type);

        Ok(RelayedImage {
            content_type,
            filename,
            body: response.bytes_stream().boxed(),
        })
    }
}

/// 响应头是 `image/*` 时使用它，否则按扩展名猜测
pub fn resolve_content_type(header: Option<&str>, url: &Url) -> String {
    if let Some(value) = header {
        if value.trim().to_ascii_lowercase().starts_with("image/") {
            return value.trim().to_string();
        }
    }
    extension_of(url)
        .and_then(|ext| mime_for_extension(&ext))
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// 路径最后一段作为文件名，没有扩展名时按类型补上
pub fn download_filename(url: &Url, content_type: &str) -> String {
    let name = last_path_segment(url).unwrap_or_else(|| "image".to_string());
    if name.contains('.') {
        name
    } else {
        format!("{}.{}", name, extension_for_mime(content_type))
    }
}

fn extension_of(url: &Url) -> Option<String> {
    let segment = last_path_segment(url)?;
    let (_, ext) = segment.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

fn extension_for_mime(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/vnd.microsoft.icon" => "ico",
        other => IMAGE_TYPES
            .iter()
            .find(|(_, mime)| *mime == other)
            .map(|(ext, _)| *ext)
            .unwrap_or("jpg"),
    }
}
