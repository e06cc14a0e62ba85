// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use wiremock::http::{HeaderName, HeaderValue};
use wiremock::{Match, Request};

/// 按完整取值匹配请求头
///
/// wiremock 会把收到的头按逗号拆开并去掉空白，这里对期望值做同样的拆分后再比较，
/// 因此 User-Agent 之类含逗号的值也能匹配。
pub struct FullHeader {
    name: HeaderName,
    parts: Vec<String>,
}

pub fn full_header(name: &str, value: &str) -> FullHeader {
    FullHeader {
        name: HeaderName::from(name.to_ascii_lowercase().as_str()),
        parts: value.split(',').map(|p| p.trim().to_string()).collect(),
    }
}

impl Match for FullHeader {
    fn matches(&self, request: &Request) -> bool {
        request.headers.get(&self.name).is_some_and(|values| {
            values
                .iter()
                .map(HeaderValue::as_str)
                .eq(self.parts.iter().map(String::as_str))
        })
    }
}
