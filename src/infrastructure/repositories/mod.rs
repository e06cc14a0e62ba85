// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于 `StorageRepository` 的抓取结果持久化：保存、历史列表与 CSV 导出
pub mod result_store;
