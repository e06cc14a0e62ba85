// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 持久化副本中 HTML 保留的最大字符数
pub const PERSISTED_HTML_LIMIT: usize = 1000;
/// 截断后追加的标记
pub const TRUNCATION_MARKER: &str = "...";

/// 网页抓取结果
///
/// 每次抓取生成一个，生成后不再修改。返回给调用方的是完整 HTML，
/// 写入磁盘的副本会被截断（见 [`ScrapeResult::persisted_copy`]）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// 被抓取的网页地址
    pub url: String,
    /// ISO-8601 时间戳（本地时间，微秒精度）
    pub timestamp: String,
    /// 解码后的原始 HTML
    pub html: String,
    /// `<title>` 文本，没有则为空串
    pub title: String,
    /// 按文档顺序出现的表单
    pub forms: Vec<FormDescriptor>,
}

impl ScrapeResult {
    pub fn new(url: String, html: String, title: String, forms: Vec<FormDescriptor>) -> Self {
        Self {
            url,
            timestamp: iso_timestamp(Local::now()),
            html,
            title,
            forms,
        }
    }

    /// 用于写盘的副本：HTML 超过上限时截断并追加省略号
    pub fn persisted_copy(&self) -> Self {
        Self {
            html: crate::utils::text_encoding::truncate_chars(
                &self.html,
                PERSISTED_HTML_LIMIT,
                TRUNCATION_MARKER,
            ),
            ..self.clone()
        }
    }
}

/// 表单描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    /// action 属性，可能是相对路径或空串
    pub action: String,
    /// method 属性，保留原始大小写，缺省为 "get"
    pub method: String,
    pub fields: Vec<FieldDescriptor>,
}

/// 表单字段描述（input / select / textarea）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// type 属性，缺省为 "text"
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    pub id: String,
    /// value 属性（默认值）
    pub value: String,
    /// 存在 required 属性即为 true
    pub required: bool,
}

impl FieldDescriptor {
    /// 展示用的字段标识：name 为空时退回到 id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// 历史记录条目，由已保存的结果文件推导而来
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub url: String,
    pub timestamp: String,
}

/// 与 Python `datetime.isoformat()` 相同的无时区格式
pub fn iso_timestamp(at: DateTime<Local>) -> String {
    at.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
