// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

static IMAGE_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"src="(https?://[^"]+)""#).expect("static image src pattern is valid")
});

/// 上游响应体解码后的形态
///
/// 接口可能按 content-type 返回 XML 或 JSON，两种形态都保留下来，
/// 直到映射为统一记录时才合并。
#[derive(Debug, Clone, PartialEq)]
pub enum VendorPayload {
    Json(Value),
    /// XML 已转换为 JSON 形态的树（属性为 `@name`，混合文本为 `#text`）
    Xml(Value),
}

impl VendorPayload {
    pub fn format(&self) -> &'static str {
        match self {
            VendorPayload::Json(_) => "json",
            VendorPayload::Xml(_) => "xml",
        }
    }

    pub fn as_value(&self) -> &Value {
        match self {
            VendorPayload::Json(v) | VendorPayload::Xml(v) => v,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            VendorPayload::Json(v) | VendorPayload::Xml(v) => v,
        }
    }

    /// 商品详情描述片段中的图片地址
    ///
    /// 只看 `domeggook.desc.contents.item`；其他任何结构都返回空列表。
    pub fn detail_images(&self) -> Vec<String> {
        let item = self
            .as_value()
            .get("domeggook")
            .and_then(|v| v.get("desc"))
            .and_then(|v| v.get("contents"))
            .and_then(|v| v.get("item"));

        let mut urls = Vec::new();
        if let Some(item) = item {
            collect_image_urls(item, &mut urls);
        }
        urls
    }
}

/// 递归遍历值中的所有字符串，收集 `src="http(s)://..."`
fn collect_image_urls(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(fragment) => out.extend(extract_image_urls(fragment)),
        Value::Array(items) => items.iter().for_each(|v| collect_image_urls(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_image_urls(v, out)),
        _ => {}
    }
}

/// 从 HTML 片段中提取图片地址（宽松匹配，不做完整解析）
pub fn extract_image_urls(fragment: &str) -> Vec<String> {
    IMAGE_SRC_RE
        .captures_iter(fragment)
        .map(|c| c[1].to_string())
        .collect()
}

/// 归一化后的商品详情：上游字段原样平铺，再加上 `detail_images`
#[derive(Debug, Clone, Serialize)]
pub struct MarketplaceDetail {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub detail_images: Vec<String>,
}
