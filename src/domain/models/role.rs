// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 管理员角色名
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
/// 普通用户角色名
pub const ROLE_USER: &str = "ROLE_USER";

/// 角色实体
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: i64,
    pub name: String,
}
