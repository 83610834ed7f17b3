// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::role::Role;
use crate::domain::models::user::{NewUser, User};
use crate::domain::repositories::user_repository::{RepositoryError, UserRepository};
use crate::infrastructure::database::entities::{role, user, user_role};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;

/// 用户仓库实现
///
/// 角色通过 user_roles 关联表加载
#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    /// 创建新的用户仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_one(&self, condition: Condition) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(condition)
            .one(self.db.as_ref())
            .await?;

        match model {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, condition: Condition) -> Result<bool, RepositoryError> {
        let count = user::Entity::find()
            .filter(condition)
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    async fn load_roles<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<Role>, RepositoryError> {
        let roles = role::Entity::find()
            .inner_join(user_role::Entity)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Id)
            .all(db)
            .await?;

        Ok(roles.into_iter().map(Into::into).collect())
    }

    async fn hydrate(&self, model: user::Model) -> Result<User, RepositoryError> {
        let roles = Self::load_roles(self.db.as_ref(), model.id).await?;
        to_domain(model, roles)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        self.find_one(Condition::all().add(user::Column::Id.eq(id)))
            .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one(Condition::all().add(user::Column::Username.eq(username)))
            .await
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one(Condition::all().add(user::Column::GoogleId.eq(google_id)))
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one(Condition::all().add(user::Column::Email.eq(email)))
            .await
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.find_one(Condition::all().add(user::Column::EmailVerificationToken.eq(token)))
            .await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        self.exists(Condition::all().add(user::Column::Username.eq(username)))
            .await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        self.exists(Condition::all().add(user::Column::Email.eq(email)))
            .await
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = user::ActiveModel {
            username: Set(new_user.username),
            google_id: Set(new_user.google_id),
            email: Set(new_user.email),
            email_verified: Set(new_user.email_verified),
            email_verification_token: Set(None),
            token_expiry_date: Set(None),
            profile_picture_url: Set(new_user.profile_picture_url),
            auth_provider: Set(new_user.auth_provider.to_string()),
            password_hash: Set(new_user.password_hash),
            active: Set(new_user.active),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for role in &new_user.roles {
            user_role::Entity::insert(user_role::ActiveModel {
                user_id: Set(model.id),
                role_id: Set(role.id),
            })
            .exec_without_returning(&txn)
            .await?;
        }

        let roles = Self::load_roles(&txn, model.id).await?;
        txn.commit().await?;

        to_domain(model, roles)
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let model = user::ActiveModel {
            id: Unchanged(user.id),
            username: Set(user.username.clone()),
            google_id: Set(user.google_id.clone()),
            email: Set(user.email.clone()),
            email_verified: Set(user.email_verified),
            email_verification_token: Set(user.email_verification_token.clone()),
            token_expiry_date: Set(user.token_expiry_date.map(Into::into)),
            profile_picture_url: Set(user.profile_picture_url.clone()),
            auth_provider: Set(user.auth_provider.to_string()),
            password_hash: Set(user.password_hash.clone()),
            active: Set(user.active),
            created_at: Unchanged(user.created_at.into()),
        };

        let model = match model.update(self.db.as_ref()).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Err(RepositoryError::NotFound),
            Err(e) => return Err(e.into()),
        };
        self.hydrate(model).await
    }
}

fn to_domain(model: user::Model, roles: Vec<Role>) -> Result<User, RepositoryError> {
    let auth_provider = model
        .auth_provider
        .parse()
        .map_err(|e: String| RepositoryError::Database(DbErr::Type(e)))?;

    Ok(User {
        id: model.id,
        username: model.username,
        google_id: model.google_id,
        email: model.email,
        email_verified: model.email_verified,
        email_verification_token: model.email_verification_token,
        token_expiry_date: model.token_expiry_date.map(Into::into),
        profile_picture_url: model.profile_picture_url,
        auth_provider,
        password_hash: model.password_hash,
        active: model.active,
        created_at: model.created_at.into(),
        roles,
    })
}
