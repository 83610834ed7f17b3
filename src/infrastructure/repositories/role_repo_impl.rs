// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::role::Role;
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::repositories::user_repository::RepositoryError;
use crate::infrastructure::database::entities::role;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 角色仓库实现
#[derive(Clone)]
pub struct RoleRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RoleRepositoryImpl {
    /// 创建新的角色仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleRepositoryImpl {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Role>, RepositoryError> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, name: &str) -> Result<Role, RepositoryError> {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let model = model.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }
}

impl From<role::Model> for Role {
    fn from(model: role::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
