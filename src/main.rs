// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use proximashare::config::settings::Settings;
use proximashare::domain::repositories::file_metadata_repository::FileMetadataRepository;
use proximashare::domain::repositories::role_repository::RoleRepository;
use proximashare::domain::repositories::user_repository::UserRepository;
use proximashare::domain::services::auth_service::AuthService;
use proximashare::domain::services::file_service::FileService;
use proximashare::domain::services::jwt_service::JwtService;
use proximashare::domain::services::password_service::PasswordService;
use proximashare::domain::services::user_service::UserService;
use proximashare::infrastructure::bootstrap;
use proximashare::infrastructure::database::connection;
use proximashare::infrastructure::google::GoogleTokenInfoVerifier;
use proximashare::infrastructure::mail;
use proximashare::infrastructure::repositories::file_metadata_repo_impl::FileMetadataRepositoryImpl;
use proximashare::infrastructure::repositories::role_repo_impl::RoleRepositoryImpl;
use proximashare::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use proximashare::infrastructure::storage::LocalStorage;
use proximashare::presentation::errors;
use proximashare::presentation::routes::{self, AppState};
use proximashare::utils::telemetry;
use proximashare::workers::cleanup_worker::CleanupWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting proximashare...");

    let metrics = proximashare::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Settings::new()?;
    errors::configure(&settings.errors);
    info!("Configuration loaded");

    // 3. Connect to database and migrate
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Repositories and storage
    let user_repo: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(db.clone()));
    let role_repo: Arc<dyn RoleRepository> = Arc::new(RoleRepositoryImpl::new(db.clone()));
    let file_repo: Arc<dyn FileMetadataRepository> =
        Arc::new(FileMetadataRepositoryImpl::new(db.clone()));

    bootstrap::prepare_storage(&settings.storage).await?;
    let file_storage = Arc::new(LocalStorage::new(&settings.storage.path));
    let picture_storage = Arc::new(LocalStorage::new(&settings.storage.profile_pictures_path));

    let password_service = PasswordService::new();
    bootstrap::seed(
        role_repo.clone(),
        user_repo.clone(),
        &password_service,
        &settings.admin,
    )
    .await?;
    info!("Roles and admin account ready");

    // 5. Services
    let jwt_service = JwtService::new(&settings.jwt);
    let google_verifier = Arc::new(GoogleTokenInfoVerifier::new(&settings.google)?);
    let email_sender = mail::create_email_sender(&settings.mail)?;

    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        role_repo.clone(),
        password_service.clone(),
        jwt_service.clone(),
        google_verifier,
    ));
    let file_service = Arc::new(FileService::new(
        file_repo.clone(),
        file_storage,
        settings.upload.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repo,
        file_repo,
        picture_storage,
        password_service,
        email_sender,
        settings.mail.frontend_url.clone(),
    ));

    // 6. Start workers
    CleanupWorker::new(
        file_service.clone(),
        Duration::from_secs(settings.cleanup.interval_secs),
    )
    .start();

    // 7. Start HTTP server
    let state = AppState {
        auth_service,
        file_service,
        user_service,
        role_repo,
        jwt_service,
        db,
        metrics,
    };
    let app = routes::build_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
