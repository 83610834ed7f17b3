// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::validators::not_blank;
use crate::domain::models::user::User;

/// 注册请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegistrationRequest {
    #[validate(
        custom(function = "not_blank", message = "Username is required"),
        length(min = 4, max = 50, message = "Username must be between 4 and 50 characters")
    )]
    pub username: String,
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(
        custom(function = "not_blank", message = "Password is required"),
        length(min = 8, message = "Password must be at least 8 characters long")
    )]
    pub password: String,
    #[validate(length(min = 1, message = "At least one role is required"))]
    pub roles: Vec<String>,
}

/// 用户名密码登录请求
///
/// 字段缺失时按无效用户名或密码处理，不做校验
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Google 登录请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    #[validate(custom(function = "not_blank", message = "ID token is required"))]
    pub id_token: String,
}

/// 注册成功后返回的用户信息
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            roles: user.role_names(),
            profile_picture: user.profile_picture_url.clone(),
        }
    }
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub roles: Vec<String>,
    pub token: String,
}

/// Google 登录响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub profile_picture_url: Option<String>,
    pub auth_provider: String,
    pub roles: Vec<String>,
    pub token: String,
}
