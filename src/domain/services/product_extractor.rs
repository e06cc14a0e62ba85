// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::domain::models::product::ProductRecord;
use crate::utils::url_utils::resolve_url;

/// 搜索结果页的CSS选择器
#[derive(Debug, Clone)]
pub struct ProductSelectors {
    /// 单个结果元素
    pub item: String,
    pub title: String,
    pub price: String,
    /// 优先使用的链接；找不到时退回到元素内第一个 `a[href]`
    pub link: String,
    pub image: String,
}

impl Default for ProductSelectors {
    fn default() -> Self {
        Self {
            item: "li.search-product".to_string(),
            title: "div.name".to_string(),
            price: "strong.price-value".to_string(),
            link: "a.search-product-link".to_string(),
            image: "img.search-product-wrap-img".to_string(),
        }
    }
}

/// 编译后的选择器
pub struct CompiledSelectors {
    item: Selector,
    title: Selector,
    price: Selector,
    link: Selector,
    any_link: Selector,
    image: Selector,
}

impl CompiledSelectors {
    pub fn compile(selectors: &ProductSelectors) -> Result<Self, String> {
        let parse = |s: &str| Selector::parse(s).map_err(|e| format!("invalid selector {:?}: {}", s, e));
        Ok(Self {
            item: parse(&selectors.item)?,
            title: parse(&selectors.title)?,
            price: parse(&selectors.price)?,
            link: parse(&selectors.link)?,
            any_link: parse("a[href]")?,
            image: parse(&selectors.image)?,
        })
    }
}

/// 从渲染后的结果页中提取商品
///
/// 按文档顺序逐个处理结果元素。标题、价格、链接任一缺失时跳过该元素继续处理，
/// 图片缺失时保留记录并置空。收集满 `limit` 条即停止。
pub fn extract_products(
    html: &str,
    origin: &Url,
    selectors: &CompiledSelectors,
    limit: usize,
) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let mut products = Vec::with_capacity(limit);

    for (index, item) in document.select(&selectors.item).enumerate() {
        if products.len() >= limit {
            break;
        }
        match extract_one(item, origin, selectors) {
            Some(product) => products.push(product),
            None => warn!("跳过第 {} 个结果：缺少标题、价格或链接", index + 1),
        }
    }

    products
}

fn extract_one(
    item: ElementRef<'_>,
    origin: &Url,
    selectors: &CompiledSelectors,
) -> Option<ProductRecord> {
    let title = first_text(item, &selectors.title)?;
    let price = first_text(item, &selectors.price)?;

    let href = item
        .select(&selectors.link)
        .chain(item.select(&selectors.any_link))
        .find_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|h| !h.is_empty())?;
    let link = resolve_url(origin, href).ok()?.to_string();

    let image = item
        .select(&selectors.image)
        .next()
        .and_then(|img| {
            img.value()
                .attr("src")
                .or_else(|| img.value().attr("data-img-src"))
        })
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .and_then(|src| resolve_url(origin, src).ok())
        .map(|u| u.to_string())
        .unwrap_or_default();

    Some(ProductRecord {
        title,
        price,
        link,
        image,
    })
}

fn first_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
#[path = "product_extractor_test.rs"]
mod tests;
