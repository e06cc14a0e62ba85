// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::storage_repository::StorageError;

/// 服务层错误类型
///
/// 每个组件都返回这个错误枚举，HTTP 边界只做一次到状态码的映射。
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 缺少或非法的必填输入（用户可修正）
    #[error("{0}")]
    Validation(String),

    /// 未登录或登录被拒绝
    #[error("{0}")]
    Auth(String),

    /// 与外部站点/接口通信失败
    #[error("{message}")]
    Upstream {
        /// 上游返回的状态码（网络层失败时为空）
        status: Option<u16>,
        message: String,
    },

    /// 显式截止时间已过
    #[error("{0}")]
    Timeout(String),

    /// 响应体不符合预期格式
    #[error("{0}")]
    Parse(String),

    /// 请求的本地文件不存在
    #[error("{0}")]
    NotFound(String),

    /// 本地存储失败
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream_status(status: u16, context: &str) -> Self {
        Self::Upstream {
            status: Some(status),
            message: format!("{} returned status {}", context, status),
        }
    }

    /// 将 reqwest 传输层错误归类为超时或上游错误
    pub fn from_transport(err: reqwest::Error, context: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{} timed out: {}", context, err))
        } else {
            Self::Upstream {
                status: err.status().map(|s| s.as_u16()),
                message: format!("{} request failed: {}", context, err),
            }
        }
    }

    /// 错误种类的稳定名称，用于日志
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Auth(_) => "auth",
            Self::Upstream { .. } => "upstream",
            Self::Timeout(_) => "timeout",
            Self::Parse(_) => "parse",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage",
        }
    }
}
