// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::validators::not_blank;
use crate::domain::models::user::User;

/// 修改密码请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(custom(function = "not_blank", message = "Old password is required"))]
    pub old_password: String,
    #[validate(
        custom(function = "not_blank", message = "New password is required"),
        length(min = 8, message = "New password must be at least 8 characters long")
    )]
    pub new_password: String,
    #[validate(custom(function = "not_blank", message = "Confirm new password is required"))]
    pub confirm_new_password: String,
}

/// 邮箱验证请求
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(default)]
pub struct VerifyEmailRequest {
    #[validate(custom(function = "not_blank", message = "Token is required"))]
    pub token: String,
}

/// 用户资料
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub profile_picture_url: Option<String>,
    pub auth_provider: String,
    pub roles: Vec<String>,
}

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
            profile_picture_url: user.profile_picture_url.clone(),
            auth_provider: user.auth_provider.to_string(),
            roles: user.role_names(),
        }
    }
}
