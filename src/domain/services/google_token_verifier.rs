// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// Google 账号信息，来自已校验的 ID 令牌
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleProfile {
    /// Google 账号唯一标识（`sub`）
    pub subject: String,
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// ID 令牌校验错误
#[derive(Error, Debug)]
pub enum GoogleVerifyError {
    /// 令牌无效或 audience 不匹配
    #[error("{0}")]
    InvalidToken(String),
    /// 调用校验接口失败
    #[error("{0}")]
    Transport(String),
}

/// Google ID 令牌校验器特质
#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    /// 校验令牌并返回账号信息
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, GoogleVerifyError>;
}
