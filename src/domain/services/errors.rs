// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::storage_repository::StorageError;
use crate::domain::repositories::user_repository::RepositoryError;

/// 领域服务错误类型
///
/// 表示层根据变体选择 HTTP 状态码，消息原样返回给客户端
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 请求参数或业务规则不满足
    #[error("{0}")]
    BadRequest(String),
    /// 身份无法确认
    #[error("{0}")]
    Unauthorized(String),
    /// 无权执行操作
    #[error("{0}")]
    Forbidden(String),
    /// 资源不存在
    #[error("{0}")]
    NotFound(String),
    /// 内部错误
    #[error("{0}")]
    Internal(String),
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// 存储错误
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
