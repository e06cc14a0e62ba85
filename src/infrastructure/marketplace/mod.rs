// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 批发市场接口
///
/// - 商品详情客户端（domeggook）
/// - XML 响应到 JSON 树的转换（xml_value）
pub mod domeggook;
pub mod xml_value;
