// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 请求与响应的数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心数据结构、存储接口与 HTML 结构提取
pub mod domain;

/// 引擎模块
///
/// 登录会话、页面抓取、无头浏览器搜索与图片转发
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如文件存储、批发市场接口与购物搜索接口
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和提取器
pub mod presentation;

/// 工具模块
///
/// 提供各种辅助函数和工具
pub mod utils;
