// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use encoding_rs::EUC_KR;
use std::borrow::Cow;
use tracing::{debug, warn};

/// 解码时实际采用的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedAs {
    /// 严格 UTF-8
    Utf8,
    /// EUC-KR / CP949（WHATWG 的 euc-kr 即 CP949 超集）
    EucKr,
    /// UTF-8，非法字节替换为 U+FFFD
    Utf8Lossy,
}

/// 将网页字节解码为文本
///
/// 依次尝试 UTF-8、EUC-KR、有损 UTF-8，保证总能得到文本。
/// 声明了错误编码的页面会以牺牲准确度为代价仍然可读。
pub fn decode_html(bytes: &[u8]) -> (String, DecodedAs) {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), DecodedAs::Utf8);
    }

    if let Some(text) = EUC_KR.decode_without_bom_handling_and_without_replacement(bytes) {
        debug!("页面不是合法的UTF-8，已按EUC-KR解码");
        return (text.into_owned(), DecodedAs::EucKr);
    }

    warn!(
        "页面既不是UTF-8也不是EUC-KR，使用有损解码（{} 字节）",
        bytes.len()
    );
    let text = match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    };
    (text, DecodedAs::Utf8Lossy)
}

/// 按字符（而非字节）截断文本，超长时追加省略号
pub fn truncate_chars(text: &str, max_chars: usize, marker: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + marker.len());
            out.push_str(&text[..byte_idx]);
            out.push_str(marker);
            out
        }
        None => text.to_string(),
    }
}
