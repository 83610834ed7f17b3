// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use proximashare::config::settings::Settings;
use proximashare::domain::repositories::file_metadata_repository::FileMetadataRepository;
use proximashare::domain::repositories::role_repository::RoleRepository;
use proximashare::domain::repositories::user_repository::UserRepository;
use proximashare::domain::services::auth_service::AuthService;
use proximashare::domain::services::email_service::{EmailError, EmailSender};
use proximashare::domain::services::file_service::FileService;
use proximashare::domain::services::google_token_verifier::{
    GoogleProfile, GoogleTokenVerifier, GoogleVerifyError,
};
use proximashare::domain::services::jwt_service::JwtService;
use proximashare::domain::services::password_service::PasswordService;
use proximashare::domain::services::user_service::UserService;
use proximashare::infrastructure::bootstrap;
use proximashare::infrastructure::database::connection;
use proximashare::infrastructure::repositories::file_metadata_repo_impl::FileMetadataRepositoryImpl;
use proximashare::infrastructure::repositories::role_repo_impl::RoleRepositoryImpl;
use proximashare::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use proximashare::infrastructure::storage::LocalStorage;
use proximashare::presentation::routes::{build_router, AppState};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const GOOGLE_TOKEN: &str = "valid-google-token";
pub const ADMIN_PASSWORD: &str = "admin-secret";

/// 记录验证链接的邮件发送器
#[derive(Default)]
pub struct RecordingSender {
    pub links: Mutex<Vec<String>>,
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send_verification_email(
        &self,
        _to: &str,
        _username: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        self.links.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

/// 只接受 [`GOOGLE_TOKEN`] 的 Google 校验器
pub struct StubGoogleVerifier;

#[async_trait]
impl GoogleTokenVerifier for StubGoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, GoogleVerifyError> {
        if id_token != GOOGLE_TOKEN {
            return Err(GoogleVerifyError::InvalidToken(
                "Invalid Google ID token".to_string(),
            ));
        }
        Ok(GoogleProfile {
            subject: "google-sub-42".to_string(),
            email: "jane@gmail.com".to_string(),
            email_verified: true,
            name: Some("Jane".to_string()),
            picture: Some("https://lh3.googleusercontent.com/jane.png".to_string()),
        })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub mailer: Arc<RecordingSender>,
    pub settings: Settings,
    // Keep the storage directories alive
    pub storage_dir: TempDir,
}

/// 默认的测试应用：小文件上限，便于覆盖限制分支
pub async fn create_test_app() -> TestApp {
    let mut settings = Settings::from_defaults().expect("default settings");
    settings.upload.public_max_size = 1024;
    settings.upload.public_max_downloads = 2;
    settings.upload.user_max_size = 2048;
    settings.upload.user_max_downloads = 3;
    create_test_app_with_settings(settings).await
}

pub async fn create_test_app_with_settings(mut settings: Settings) -> TestApp {
    let storage_dir = TempDir::new().expect("temp dir");
    settings.database.url = "sqlite::memory:".to_string();
    settings.storage.path = storage_dir.path().join("files").display().to_string();
    settings.storage.profile_pictures_path = storage_dir
        .path()
        .join("profile-pictures")
        .display()
        .to_string();
    settings.admin.password = ADMIN_PASSWORD.to_string();

    let db = Arc::new(
        connection::connect_and_migrate(&settings.database)
            .await
            .expect("database"),
    );

    let user_repo: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(db.clone()));
    let role_repo: Arc<dyn RoleRepository> = Arc::new(RoleRepositoryImpl::new(db.clone()));
    let file_repo: Arc<dyn FileMetadataRepository> =
        Arc::new(FileMetadataRepositoryImpl::new(db.clone()));

    bootstrap::prepare_storage(&settings.storage)
        .await
        .expect("storage");
    let passwords = PasswordService::new();
    bootstrap::seed(
        role_repo.clone(),
        user_repo.clone(),
        &passwords,
        &settings.admin,
    )
    .await
    .expect("seed");

    let jwt_service = JwtService::new(&settings.jwt);
    let mailer = Arc::new(RecordingSender::default());

    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        role_repo.clone(),
        passwords.clone(),
        jwt_service.clone(),
        Arc::new(StubGoogleVerifier),
    ));
    let file_service = Arc::new(FileService::new(
        file_repo.clone(),
        Arc::new(LocalStorage::new(&settings.storage.path)),
        settings.upload.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repo,
        file_repo,
        Arc::new(LocalStorage::new(&settings.storage.profile_pictures_path)),
        passwords,
        mailer.clone(),
        settings.mail.frontend_url.clone(),
    ));

    let state = AppState {
        auth_service,
        file_service,
        user_service,
        role_repo,
        jwt_service,
        db: db.clone(),
        metrics: None,
    };
    let server = TestServer::new(build_router(state, &settings)).expect("test server");

    TestApp {
        server,
        db,
        mailer,
        settings,
        storage_dir,
    }
}

impl TestApp {
    /// 注册普通用户并返回响应体
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
                "roles": ["ROLE_USER"]
            }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// 登录并返回 JWT
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .server
            .post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// 注册、验证邮箱并登录，返回已激活账号的 JWT
    pub async fn user_token(&self, username: &str) -> String {
        self.register(username, &format!("{}@example.com", username), "password123")
            .await;
        let token = self.login(username, "password123").await;
        self.verify_email(&token).await;
        token
    }

    /// 请求验证邮件并提交其中的令牌
    pub async fn verify_email(&self, token: &str) {
        self.server
            .post("/user/send-verification-email")
            .authorization_bearer(token)
            .await
            .assert_status_ok();
        let verification = self.last_verification_token().unwrap();
        self.server
            .post("/user/verify-email")
            .json(&json!({ "token": verification }))
            .await
            .assert_status_ok();
    }

    pub async fn admin_token(&self) -> String {
        let username = self.settings.admin.username.clone();
        self.login(&username, ADMIN_PASSWORD).await
    }

    /// 最近一次发送的验证令牌
    pub fn last_verification_token(&self) -> Option<String> {
        let links = self.mailer.links.lock().unwrap();
        links
            .last()
            .and_then(|link| link.split("token=").nth(1))
            .map(str::to_string)
    }
}

/// 只包含 `file` 字段的表单
pub fn file_form(filename: &str, mime: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(content.to_vec())
            .file_name(filename)
            .mime_type(mime),
    )
}
