// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求提取器模块
///
/// 在请求到达处理器之前完成反序列化与字段校验
pub mod validated;
