// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::role::{Role, ROLE_ADMIN};

/// 账号来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthProvider {
    /// 用户名密码注册
    Local,
    /// Google 登录
    Google,
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthProvider::Local => write!(f, "LOCAL"),
            AuthProvider::Google => write!(f, "GOOGLE"),
        }
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCAL" => Ok(AuthProvider::Local),
            "GOOGLE" => Ok(AuthProvider::Google),
            other => Err(format!("Unknown auth provider: {}", other)),
        }
    }
}

/// 用户实体
///
/// Google 账号没有密码，`password_hash` 为空。
/// 角色随用户一起加载。
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub google_id: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
    pub email_verification_token: Option<String>,
    pub token_expiry_date: Option<DateTime<Utc>>,
    pub profile_picture_url: Option<String>,
    pub auth_provider: AuthProvider,
    pub password_hash: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub roles: Vec<Role>,
}

impl User {
    /// 角色名列表
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }

    /// 是否拥有指定角色
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// 本地账号在邮箱验证前处于未激活状态，此时仍允许登录以便重新发送验证邮件
    pub fn is_pending_verification(&self) -> bool {
        self.auth_provider == AuthProvider::Local && !self.email_verified
    }
}

/// 待创建的用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub google_id: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
    pub profile_picture_url: Option<String>,
    pub auth_provider: AuthProvider,
    pub password_hash: Option<String>,
    pub active: bool,
    /// 需要关联的角色
    pub roles: Vec<Role>,
}

/// 用户文件统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_files_uploaded: i64,
    /// 字节数
    pub total_storage_used: i64,
    pub total_downloads: i64,
}
