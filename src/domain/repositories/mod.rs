// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层的存储抽象，具体实现（本地目录、内存）由基础设施层提供。
pub mod storage_repository;
