// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含与外部系统交互的技术实现：
/// - 批发市场接口（marketplace）：商品详情查询与 XML/JSON 解码
/// - 仓库实现（repositories）：抓取结果的保存、历史与导出
/// - 搜索（search）：购物搜索开放接口
/// - 存储（storage）：本地目录与内存存储
///
/// 基础设施层依赖于领域层的抽象接口，领域层不感知这些实现。
pub mod marketplace;
pub mod repositories;
pub mod search;
pub mod storage;
