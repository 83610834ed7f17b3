// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::settings::GoogleSettings;
use crate::domain::services::google_token_verifier::{
    GoogleProfile, GoogleTokenVerifier, GoogleVerifyError,
};

/// tokeninfo 接口返回的字段
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: Option<String>,
    sub: Option<String>,
    email: Option<String>,
    /// Google 以字符串 "true"/"false" 返回
    email_verified: Option<Value>,
    name: Option<String>,
    picture: Option<String>,
    error_description: Option<String>,
}

/// 通过 Google tokeninfo 接口校验 ID 令牌
pub struct GoogleTokenInfoVerifier {
    client: reqwest::Client,
    token_info_url: String,
    client_id: String,
}

impl GoogleTokenInfoVerifier {
    pub fn new(settings: &GoogleSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            token_info_url: settings.token_info_url.clone(),
            client_id: settings.client_id.clone(),
        })
    }
}

#[async_trait]
impl GoogleTokenVerifier for GoogleTokenInfoVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, GoogleVerifyError> {
        if self.client_id.is_empty() {
            return Err(GoogleVerifyError::InvalidToken(
                "Google client id is not configured".to_string(),
            ));
        }

        let response = self
            .client
            .get(&self.token_info_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| GoogleVerifyError::Transport(e.to_string()))?;

        let status = response.status();
        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| GoogleVerifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GoogleVerifyError::InvalidToken(
                info.error_description
                    .unwrap_or_else(|| "Invalid Google ID token".to_string()),
            ));
        }

        if info.aud.as_deref() != Some(self.client_id.as_str()) {
            return Err(GoogleVerifyError::InvalidToken(
                "Token audience does not match".to_string(),
            ));
        }

        let subject = info
            .sub
            .ok_or_else(|| GoogleVerifyError::InvalidToken("Token has no subject".to_string()))?;
        let email = info
            .email
            .ok_or_else(|| GoogleVerifyError::InvalidToken("Token has no email".to_string()))?;
        let email_verified = match info.email_verified {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        };

        Ok(GoogleProfile {
            subject,
            email,
            email_verified,
            name: info.name,
            picture: info.picture,
        })
    }
}
