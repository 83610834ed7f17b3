// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;

use crate::config::settings::{AdminSettings, StorageSettings};
use crate::domain::models::role::{Role, ROLE_ADMIN, ROLE_USER};
use crate::domain::models::user::{AuthProvider, NewUser};
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::password_service::PasswordService;
use crate::infrastructure::storage::LocalStorage;

/// 确保角色存在，返回已有或新建的角色
async fn ensure_role(role_repo: &dyn RoleRepository, name: &str) -> anyhow::Result<Role> {
    if let Some(role) = role_repo.find_by_name(name).await? {
        return Ok(role);
    }
    let role = role_repo.create(name).await?;
    info!("Created role {}", name);
    Ok(role)
}

/// 初始化基础数据：两个内置角色和管理员账号
///
/// 可重复执行，已存在的数据不会被修改
pub async fn seed(
    role_repo: Arc<dyn RoleRepository>,
    user_repo: Arc<dyn UserRepository>,
    password_service: &PasswordService,
    admin: &AdminSettings,
) -> anyhow::Result<()> {
    let admin_role = ensure_role(role_repo.as_ref(), ROLE_ADMIN).await?;
    ensure_role(role_repo.as_ref(), ROLE_USER).await?;

    if user_repo.exists_by_username(&admin.username).await? {
        return Ok(());
    }

    let user = user_repo
        .create(NewUser {
            username: admin.username.clone(),
            google_id: None,
            email: None,
            email_verified: true,
            profile_picture_url: None,
            auth_provider: AuthProvider::Local,
            password_hash: Some(password_service.hash(&admin.password)?),
            active: true,
            roles: vec![admin_role],
        })
        .await?;
    info!("Created admin user {} (id {})", user.username, user.id);
    Ok(())
}

/// 创建文件存储目录和头像目录
pub async fn prepare_storage(settings: &StorageSettings) -> anyhow::Result<()> {
    LocalStorage::new(&settings.path).ensure_dir().await?;
    LocalStorage::new(&settings.profile_pictures_path)
        .ensure_dir()
        .await?;
    Ok(())
}
