// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::config::settings::{CorsSettings, Settings};
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::file_service::FileService;
use crate::domain::services::jwt_service::JwtService;
use crate::domain::services::user_service::UserService;
use crate::presentation::handlers::{
    actuator_handler, auth_handler, config_handler, file_handler, user_file_handler,
    user_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use crate::presentation::middleware::metrics_middleware::track_metrics;
use crate::presentation::openapi::ApiDoc;

/// 额外允许的请求体大小，用于 multipart 边界和其他字段
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// 处理器共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub file_service: Arc<FileService>,
    pub user_service: Arc<UserService>,
    pub role_repo: Arc<dyn RoleRepository>,
    pub jwt_service: JwtService,
    pub db: Arc<DatabaseConnection>,
    pub metrics: Option<PrometheusHandle>,
}

/// CORS 配置：指定来源、常用方法，允许携带凭证
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回挂载了认证、CORS、日志和指标中间件的路由
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    let auth_state = AuthState {
        jwt_service: state.jwt_service.clone(),
    };

    let body_limit = settings
        .upload
        .public_max_size
        .max(settings.upload.user_max_size)
        .saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let auth_routes = Router::new()
        .route("/auth/register", post(auth_handler::register))
        .route("/auth/login", post(auth_handler::login))
        .route("/auth/login/google", post(auth_handler::login_with_google));

    let file_routes = Router::new()
        .route("/api/public/config/roles", get(config_handler::get_all_roles))
        .route("/api/files/upload", post(file_handler::upload_file))
        .route("/api/files/{uuid}", get(file_handler::get_file_metadata))
        .route(
            "/api/files/download/{uuid}",
            get(file_handler::download_file),
        )
        .route("/user/files", get(user_file_handler::get_user_files))
        .route("/user/files/upload", post(user_file_handler::upload_file))
        .route(
            "/user/files/{uuid}",
            get(user_file_handler::get_file_metadata).delete(user_file_handler::delete_file),
        )
        .route(
            "/user/files/download/{uuid}",
            get(user_file_handler::download_file),
        );

    let user_routes = Router::new()
        .route("/user/profile", get(user_handler::get_profile))
        .route(
            "/user/profile-picture",
            post(user_handler::upload_profile_picture).delete(user_handler::delete_profile_picture),
        )
        .route("/user/change_password", post(user_handler::change_password))
        .route("/user/deactivate", post(user_handler::deactivate_account))
        .route(
            "/user/send-verification-email",
            post(user_handler::send_verification_email),
        )
        .route("/user/verify-email", post(user_handler::verify_email))
        .route("/user/stats", get(user_handler::get_stats));

    let actuator_routes = Router::new()
        .route("/actuator/health", get(actuator_handler::health))
        .route("/actuator/metrics", get(actuator_handler::metrics))
        .route("/v3/api-docs", get(|| async { Json(ApiDoc::openapi()) }));

    Router::new()
        .merge(auth_routes)
        .merge(file_routes)
        .merge(user_routes)
        .merge(actuator_routes)
        .merge(Scalar::with_url("/swagger-ui", ApiDoc::openapi()))
        .nest_service(
            "/uploads/profile-pictures",
            ServeDir::new(&settings.storage.profile_pictures_path),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.cors))
        .with_state(state)
}
