// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求处理器模块
///
/// 每个处理器只做参数提取、调用组件和错误到状态码的映射
pub mod login_handler;
pub mod marketplace_handler;
pub mod proxy_handler;
pub mod scrape_handler;
pub mod search_handler;
