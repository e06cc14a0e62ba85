// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 纯粹的 HTML 结构提取逻辑，不做任何网络或文件 I/O：
/// - 表单提取（form_extractor）：标题、表单与字段描述
/// - 商品提取（product_extractor）：搜索结果页中的商品记录，单项失败隔离
pub mod form_extractor;
pub mod product_extractor;
