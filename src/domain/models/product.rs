// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 无头浏览器搜索得到的商品记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    /// 页面上展示的价格字符串，不解析为数字
    pub price: String,
    /// 绝对地址
    pub link: String,
    /// 绝对地址；取不到时为空串
    pub image: String,
}
