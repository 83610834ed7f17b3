// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::settings::JwtSettings;

/// JWT 处理错误
pub type JwtError = jsonwebtoken::errors::Error;

/// 令牌声明
///
/// 除标准的 `sub`/`iat`/`exp` 外，其余声明平铺在顶层
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JWT 服务
///
/// 使用 HS256 签发和校验访问令牌
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_ms: i64,
}

impl JwtService {
    /// 创建新的 JWT 服务实例
    pub fn new(settings: &JwtSettings) -> Self {
        let secret = settings.secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_ms: settings.expiration_ms,
        }
    }

    /// 令牌有效期（毫秒）
    pub fn expiration_ms(&self) -> i64 {
        self.expiration_ms
    }

    /// 签发令牌
    ///
    /// # 参数
    ///
    /// * `extra_claims` - 附加声明，例如 `roles`
    /// * `subject` - 令牌主体（用户名）
    pub fn generate_token(
        &self,
        extra_claims: Map<String, Value>,
        subject: &str,
    ) -> Result<String, JwtError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat + self.expiration_ms / 1000,
            extra: extra_claims,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// 解析并校验令牌，返回全部声明
    pub fn extract_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// 提取令牌主体
    pub fn extract_username(&self, token: &str) -> Result<String, JwtError> {
        self.extract_claims(token).map(|c| c.sub)
    }

    /// 提取单个附加声明
    pub fn extract_claim(&self, token: &str, name: &str) -> Result<Option<Value>, JwtError> {
        let mut claims = self.extract_claims(token)?;
        Ok(claims.extra.remove(name))
    }

    /// 签名有效、未过期且主体与用户名完全一致时返回 true
    pub fn is_token_valid(&self, token: &str, username: &str) -> bool {
        match self.extract_claims(token) {
            Ok(claims) => claims.sub == username,
            Err(e) => {
                tracing::debug!("Rejected JWT: {}", e);
                false
            }
        }
    }
}

/// 构造包含角色列表的附加声明
pub fn role_claims(roles: Vec<String>) -> Map<String, Value> {
    let mut claims = Map::new();
    claims.insert(
        "roles".to_string(),
        Value::Array(roles.into_iter().map(Value::String).collect()),
    );
    claims
}
