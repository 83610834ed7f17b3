// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dto::auth::RegistrationRequest;
use crate::domain::models::role::{Role, ROLE_ADMIN, ROLE_USER};
use crate::domain::models::user::{AuthProvider, NewUser, User};
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::errors::ServiceError;
use crate::domain::services::google_token_verifier::GoogleTokenVerifier;
use crate::domain::services::jwt_service::{role_claims, JwtService};
use crate::domain::services::password_service::PasswordService;

/// 登录结果：用户及其访问令牌
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}

/// 认证服务
///
/// 处理注册、用户名密码登录和 Google 登录
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    role_repo: Arc<dyn RoleRepository>,
    password_service: PasswordService,
    jwt_service: JwtService,
    google_verifier: Arc<dyn GoogleTokenVerifier>,
}

impl AuthService {
    /// 创建新的认证服务实例
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        role_repo: Arc<dyn RoleRepository>,
        password_service: PasswordService,
        jwt_service: JwtService,
        google_verifier: Arc<dyn GoogleTokenVerifier>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            password_service,
            jwt_service,
            google_verifier,
        }
    }

    /// 注册本地账号
    ///
    /// 新账号在邮箱验证之前处于未激活状态
    pub async fn register_user(&self, request: &RegistrationRequest) -> Result<User, ServiceError> {
        if self.user_repo.exists_by_username(&request.username).await? {
            return Err(ServiceError::bad_request("Username is already taken"));
        }

        if self.user_repo.exists_by_email(&request.email).await? {
            return Err(ServiceError::bad_request(
                "Email is already registered, Please login or forgot password.",
            ));
        }

        let mut roles: Vec<Role> = Vec::with_capacity(request.roles.len());
        for name in &request.roles {
            if name.eq_ignore_ascii_case(ROLE_ADMIN) {
                return Err(ServiceError::bad_request(
                    "Admin role cannot be assigned during registration.",
                ));
            }

            let role = self
                .role_repo
                .find_by_name(name)
                .await?
                .ok_or_else(|| ServiceError::Internal(format!("Role not found: {}", name)))?;
            if !roles.contains(&role) {
                roles.push(role);
            }
        }

        let new_user = NewUser {
            username: request.username.clone(),
            google_id: None,
            email: Some(request.email.clone()),
            email_verified: false,
            profile_picture_url: None,
            auth_provider: AuthProvider::Local,
            password_hash: Some(self.password_service.hash(&request.password)?),
            active: false,
            roles,
        };

        let user = self.user_repo.create(new_user).await?;
        info!("Registered user {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// 用户名密码登录
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthenticatedSession, ServiceError> {
        let user = match username {
            Some(name) => self.user_repo.find_by_username(name).await?,
            None => None,
        }
        .ok_or_else(|| ServiceError::bad_request("Invalid username"))?;

        let password_ok = match (password, user.password_hash.as_deref()) {
            (Some(raw), Some(hash)) => self.password_service.verify(raw, hash),
            _ => false,
        };
        if !password_ok {
            return Err(ServiceError::bad_request("Invalid password"));
        }

        if !user.active && !user.is_pending_verification() {
            warn!("Login refused for deactivated account {}", user.username);
            return Err(ServiceError::forbidden("Account is deactivated"));
        }

        let token = self.issue_token(&user)?;
        Ok(AuthenticatedSession { user, token })
    }

    /// Google 登录，首次登录时自动创建账号
    pub async fn login_or_register_google_user(
        &self,
        id_token: &str,
    ) -> Result<AuthenticatedSession, ServiceError> {
        let profile = self.google_verifier.verify(id_token).await.map_err(|e| {
            ServiceError::Unauthorized(format!("Failed to verify Google ID token: {}", e))
        })?;

        if let Some(user) = self.user_repo.find_by_google_id(&profile.subject).await? {
            let token = self.issue_token(&user)?;
            return Ok(AuthenticatedSession { user, token });
        }

        if self.user_repo.find_by_email(&profile.email).await?.is_some() {
            return Err(ServiceError::bad_request(
                "Email is already registered with a local account. Please use password login.",
            ));
        }

        let role = self
            .role_repo
            .find_by_name(ROLE_USER)
            .await?
            .ok_or_else(|| ServiceError::Internal(format!("Role not found: {}", ROLE_USER)))?;

        let new_user = NewUser {
            username: self.generate_username_from_email(&profile.email).await?,
            google_id: Some(profile.subject),
            email: Some(profile.email),
            // Google has already verified the address
            email_verified: true,
            profile_picture_url: profile.picture,
            auth_provider: AuthProvider::Google,
            password_hash: None,
            active: true,
            roles: vec![role],
        };

        let user = self.user_repo.create(new_user).await?;
        info!("Created Google account {} (id {})", user.username, user.id);

        let token = self.issue_token(&user)?;
        Ok(AuthenticatedSession { user, token })
    }

    fn issue_token(&self, user: &User) -> Result<String, ServiceError> {
        self.jwt_service
            .generate_token(role_claims(user.role_names()), &user.username)
            .map_err(|e| ServiceError::Internal(format!("Failed to issue token: {}", e)))
    }

    /// 取邮箱 @ 之前的部分作为用户名，重名时依次追加 1、2、3…
    async fn generate_username_from_email(&self, email: &str) -> Result<String, ServiceError> {
        let base = email.split('@').next().unwrap_or(email);
        let mut username = base.to_string();
        let mut counter = 1;
        while self.user_repo.exists_by_username(&username).await? {
            username = format!("{}{}", base, counter);
            counter += 1;
        }
        Ok(username)
    }
}

#[cfg(test)]
#[path = "auth_service_test.rs"]
mod tests;
