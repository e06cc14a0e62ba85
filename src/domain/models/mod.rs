// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 抓取结果（scrape_result）：网页结构提取结果、表单/字段描述与历史条目
/// - 商品（product）：无头浏览器搜索得到的商品记录
/// - 批发市场（marketplace）：上游接口响应的标签化表示与归一化详情
pub mod marketplace;
pub mod product;
pub mod scrape_result;
