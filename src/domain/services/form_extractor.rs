// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::domain::models::scrape_result::{FieldDescriptor, FormDescriptor};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static selector is valid"));
static FORM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("form").expect("static selector is valid"));
static FIELD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("input, select, textarea").expect("static selector is valid"));

/// 页面结构
#[derive(Debug, Clone, PartialEq)]
pub struct PageStructure {
    pub title: String,
    pub forms: Vec<FormDescriptor>,
}

/// 解析 HTML 并提取标题与表单（只看静态标记，不执行脚本）
pub fn parse_page(html: &str) -> PageStructure {
    let document = Html::parse_document(html);
    PageStructure {
        title: title_of(&document),
        forms: forms_of(&document),
    }
}

/// 第一个 `<title>` 的文本，没有则为空串
pub fn extract_title(html: &str) -> String {
    title_of(&Html::parse_document(html))
}

/// 按文档顺序提取全部表单及其字段
pub fn extract_forms(html: &str) -> Vec<FormDescriptor> {
    forms_of(&Html::parse_document(html))
}

fn title_of(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn forms_of(document: &Html) -> Vec<FormDescriptor> {
    document.select(&FORM_SELECTOR).map(form_descriptor).collect()
}

fn form_descriptor(form: ElementRef<'_>) -> FormDescriptor {
    let attrs = form.value();
    FormDescriptor {
        action: attrs.attr("action").unwrap_or_default().to_string(),
        method: attrs.attr("method").unwrap_or("get").to_string(),
        fields: form.select(&FIELD_SELECTOR).map(field_descriptor).collect(),
    }
}

fn field_descriptor(element: ElementRef<'_>) -> FieldDescriptor {
    let attrs = element.value();
    FieldDescriptor {
        field_type: attrs.attr("type").unwrap_or("text").to_string(),
        name: attrs.attr("name").unwrap_or_default().to_string(),
        id: attrs.attr("id").unwrap_or_default().to_string(),
        value: attrs.attr("value").unwrap_or_default().to_string(),
        required: attrs.attr("required").is_some(),
    }
}

#[cfg(test)]
#[path = "form_extractor_test.rs"]
mod tests;
