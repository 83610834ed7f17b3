// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::role::Role;
use crate::domain::repositories::user_repository::RepositoryError;
use async_trait::async_trait;

/// 角色仓库特质
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// 根据名称查找角色
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError>;
    /// 按 ID 顺序返回所有角色
    async fn find_all(&self) -> Result<Vec<Role>, RepositoryError>;
    /// 创建角色
    async fn create(&self, name: &str) -> Result<Role, RepositoryError>;
}
