// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::dto::user::ChangePasswordRequest;
use crate::domain::models::file_metadata::file_extension;
use crate::domain::models::user::{AuthProvider, User, UserStats};
use crate::domain::repositories::file_metadata_repository::FileMetadataRepository;
use crate::domain::repositories::storage_repository::{ByteStream, StorageError, StorageRepository};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::email_service::{verification_link, EmailSender};
use crate::domain::services::errors::ServiceError;
use crate::domain::services::file_service::UploadedFile;
use crate::domain::services::password_service::PasswordService;

/// 头像文件大小上限
pub const MAX_PROFILE_PICTURE_SIZE: usize = 5 * 1024 * 1024;
/// 头像访问路径前缀
pub const PROFILE_PICTURE_URL_PREFIX: &str = "/uploads/profile-pictures/";
/// 验证令牌有效期（小时）
const TOKEN_EXPIRY_HOURS: i64 = 24;

/// 用户服务
///
/// 处理个人资料、头像、密码、账号停用、邮箱验证和统计
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    file_repo: Arc<dyn FileMetadataRepository>,
    picture_storage: Arc<dyn StorageRepository>,
    password_service: PasswordService,
    email_sender: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl UserService {
    /// 创建新的用户服务实例
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        file_repo: Arc<dyn FileMetadataRepository>,
        picture_storage: Arc<dyn StorageRepository>,
        password_service: PasswordService,
        email_sender: Arc<dyn EmailSender>,
        frontend_url: String,
    ) -> Self {
        Self {
            user_repo,
            file_repo,
            picture_storage,
            password_service,
            email_sender,
            frontend_url,
        }
    }

    /// 获取用户资料
    pub async fn get_user_profile(&self, username: &str) -> Result<User, ServiceError> {
        self.find_active(username).await
    }

    /// 上传或替换头像
    pub async fn upload_profile_picture(
        &self,
        username: &str,
        file: UploadedFile,
    ) -> Result<User, ServiceError> {
        let mut user = self.find_active(username).await?;

        let data = read_limited(file.stream, MAX_PROFILE_PICTURE_SIZE).await?;
        let data = match data {
            Some(data) if data.is_empty() => {
                return Err(ServiceError::bad_request("File is empty"));
            }
            Some(data) => data,
            None => {
                return Err(ServiceError::bad_request(
                    "File size exceeds maximum limit of 5MB",
                ));
            }
        };

        let is_image = file
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(ServiceError::bad_request("Only image files are allowed"));
        }

        self.delete_stored_picture(&user).await;

        let extension = picture_extension(&file.filename);
        let name = format!("{}_{}{}", user.id, Uuid::new_v4(), extension);
        self.picture_storage.save(&name, &data).await?;

        user.profile_picture_url = Some(format!("{}{}", PROFILE_PICTURE_URL_PREFIX, name));
        let user = self.user_repo.update(&user).await?;
        info!("Updated profile picture for {}", user.username);
        Ok(user)
    }

    /// 删除头像
    pub async fn delete_profile_picture(&self, username: &str) -> Result<(), ServiceError> {
        let mut user = self.find_active(username).await?;

        if user.profile_picture_url.as_deref().is_some_and(|u| !u.is_empty()) {
            self.delete_stored_picture(&user).await;
            user.profile_picture_url = None;
            self.user_repo.update(&user).await?;
        }
        Ok(())
    }

    /// 修改密码
    pub async fn change_password(
        &self,
        username: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ServiceError> {
        let mut user = self.find_user(username).await?;

        let current_hash = user.password_hash.clone().unwrap_or_default();
        if !self
            .password_service
            .verify(&request.old_password, &current_hash)
        {
            return Err(ServiceError::bad_request("Old password is incorrect"));
        }

        if self
            .password_service
            .verify(&request.new_password, &current_hash)
        {
            return Err(ServiceError::bad_request(
                "New and Old passwords cannot be same",
            ));
        }

        if request.new_password != request.confirm_new_password {
            return Err(ServiceError::bad_request(
                "New password and confirmation do not match",
            ));
        }

        user.password_hash = Some(self.password_service.hash(&request.new_password)?);
        self.user_repo.update(&user).await?;
        info!("Password changed for {}", user.username);
        Ok(())
    }

    /// 停用账号（软删除）
    pub async fn deactivate_account(&self, username: &str) -> Result<(), ServiceError> {
        let mut user = self.find_user(username).await?;
        if !user.active {
            return Err(ServiceError::bad_request("Account is already deactivated"));
        }

        user.active = false;
        self.user_repo.update(&user).await?;
        info!("Deactivated account {}", user.username);
        Ok(())
    }

    /// 生成新的验证令牌并发送验证邮件
    ///
    /// # 返回值
    ///
    /// 生成的令牌
    pub async fn generate_email_verification_token(
        &self,
        username: &str,
    ) -> Result<String, ServiceError> {
        let mut user = self.find_user(username).await?;
        ensure_verifiable(&user)?;

        let token = Uuid::new_v4().to_string();
        user.email_verification_token = Some(token.clone());
        user.token_expiry_date = Some(Utc::now() + Duration::hours(TOKEN_EXPIRY_HOURS));
        let user = self.user_repo.update(&user).await?;

        let email = user
            .email
            .as_deref()
            .ok_or_else(|| ServiceError::bad_request("Email address is missing"))?;
        let link = verification_link(&self.frontend_url, &token);
        self.email_sender
            .send_verification_email(email, &user.username, &link)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        Ok(token)
    }

    /// 重新发送验证邮件
    pub async fn resend_verification_email(&self, username: &str) -> Result<(), ServiceError> {
        self.generate_email_verification_token(username).await?;
        Ok(())
    }

    /// 使用令牌验证邮箱并激活账号
    pub async fn verify_email(&self, token: &str) -> Result<(), ServiceError> {
        let mut user = self
            .user_repo
            .find_by_verification_token(token)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Invalid verification token"))?;
        ensure_verifiable(&user)?;

        let expired = match user.token_expiry_date {
            Some(expiry) => Utc::now() > expiry,
            None => true,
        };
        if expired {
            return Err(ServiceError::bad_request(
                "Verification token has expired. Please request a new one.",
            ));
        }

        user.email_verified = true;
        user.active = true;
        user.email_verification_token = None;
        user.token_expiry_date = None;
        self.user_repo.update(&user).await?;
        info!("Email verified for {}", user.username);
        Ok(())
    }

    /// 用户文件统计
    pub async fn get_user_stats(&self, username: &str) -> Result<UserStats, ServiceError> {
        let user = self.find_active(username).await?;
        let files = self.file_repo.find_by_owner(user.id).await?;

        Ok(UserStats {
            total_files_uploaded: files.len() as i64,
            total_storage_used: files.iter().map(|f| f.size).sum(),
            total_downloads: files.iter().map(|f| f.download_count as i64).sum(),
        })
    }

    /// 按用户名加载用户，不检查账号状态
    pub async fn find_user(&self, username: &str) -> Result<User, ServiceError> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }

    /// 加载可以操作文件的账号
    ///
    /// 与登录规则一致：已停用且不在邮箱验证流程中的账号返回 403
    pub async fn find_file_owner(&self, username: &str) -> Result<User, ServiceError> {
        let user = self.find_user(username).await?;
        if !user.active && !user.is_pending_verification() {
            return Err(ServiceError::forbidden("Account is deactivated"));
        }
        Ok(user)
    }

    async fn find_active(&self, username: &str) -> Result<User, ServiceError> {
        let user = self.find_user(username).await?;
        if !user.active {
            return Err(ServiceError::bad_request("Account is deactivated"));
        }
        Ok(user)
    }

    /// 只删除本地存储的头像，外部地址（例如 Google 头像）保持不动
    async fn delete_stored_picture(&self, user: &User) {
        let Some(name) = user
            .profile_picture_url
            .as_deref()
            .and_then(|url| url.strip_prefix(PROFILE_PICTURE_URL_PREFIX))
        else {
            return;
        };

        if let Err(e) = self.picture_storage.delete(name).await {
            warn!("Failed to delete old profile picture {}: {}", name, e);
        }
    }
}

/// 头像允许保存的扩展名
const PICTURE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// 只保留白名单内的图片扩展名，其他一律存为 `.jpg`
fn picture_extension(filename: &str) -> &'static str {
    let ext = file_extension(filename).to_ascii_lowercase();
    PICTURE_EXTENSIONS
        .iter()
        .copied()
        .find(|allowed| *allowed == ext)
        .unwrap_or(".jpg")
}

fn ensure_verifiable(user: &User) -> Result<(), ServiceError> {
    if user.auth_provider != AuthProvider::Local {
        return Err(ServiceError::bad_request(
            "Email verification is only for LOCAL accounts",
        ));
    }
    if user.email_verified {
        return Err(ServiceError::bad_request("Email is already verified"));
    }
    Ok(())
}

/// 读取整个流，超过 `limit` 字节时返回 `None`
async fn read_limited(
    mut stream: ByteStream,
    limit: usize,
) -> Result<Option<Vec<u8>>, ServiceError> {
    let mut data = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(StorageError::Io)?;
        if data.len() + chunk.len() > limit {
            return Ok(None);
        }
        data.extend_from_slice(&chunk);
    }
    Ok(Some(data))
}

#[cfg(test)]
#[path = "user_service_test.rs"]
mod tests;
