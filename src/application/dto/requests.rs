// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 去掉首尾空白后不能为空
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 网页抓取请求
///
/// 缺失字段反序列化为空串，由校验统一报告
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UrlRequestDto {
    #[serde(default)]
    #[validate(url(message = "A valid url is required"))]
    pub url: String,
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// 批发市场商品详情请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct GgookRequestDto {
    #[serde(default, rename = "productNo")]
    #[validate(custom(function = "non_blank", message = "productNo is required"))]
    pub product_no: String,
}

/// 关键词搜索请求（购物搜索与无头搜索共用）
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct KeywordRequestDto {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Keyword is required"))]
    pub keyword: String,
}

/// 图片代理查询参数
#[derive(Debug, Deserialize, Validate)]
pub struct ProxyImageQuery {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "url is required"))]
    pub url: String,
    /// 超时（秒）
    #[validate(range(min = 1, max = 600, message = "timeout must be between 1 and 600 seconds"))]
    pub timeout: Option<u64>,
}
