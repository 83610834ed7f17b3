// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::State, Json};

use crate::application::dto::api_response::ApiResponse;
use crate::application::dto::auth::{
    GoogleLoginRequest, GoogleLoginResponse, LoginRequest, LoginResponse, RegistrationRequest,
    UserData,
};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::json::{JsonBody, ValidatedJson};
use crate::presentation::routes::AppState;

/// 注册本地账号
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "User registered", body = ApiResponse<UserData>),
        (status = 400, description = "Validation failed or user exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegistrationRequest>,
) -> Result<Json<ApiResponse<UserData>>, AppError> {
    let user = state.auth_service.register_user(&request).await?;
    Ok(Json(ApiResponse::new(
        UserData::from(&user),
        "User registered successfully",
    )))
}

/// 用户名密码登录
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let session = state
        .auth_service
        .login(request.username.as_deref(), request.password.as_deref())
        .await?;

    let response = LoginResponse {
        id: session.user.id,
        username: session.user.username.clone(),
        roles: session.user.role_names(),
        token: session.token,
    };
    Ok(Json(ApiResponse::new(response, "Logged in successfully")))
}

/// Google 登录，首次登录自动创建账号
#[utoipa::path(
    post,
    path = "/auth/login/google",
    tag = "Auth",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Logged in with Google", body = ApiResponse<GoogleLoginResponse>),
        (status = 401, description = "Google ID token rejected")
    )
)]
pub async fn login_with_google(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GoogleLoginRequest>,
) -> Result<Json<ApiResponse<GoogleLoginResponse>>, AppError> {
    let session = state
        .auth_service
        .login_or_register_google_user(&request.id_token)
        .await?;

    let user = session.user;
    let response = GoogleLoginResponse {
        id: user.id,
        roles: user.role_names(),
        username: user.username,
        email: user.email,
        profile_picture_url: user.profile_picture_url,
        auth_provider: user.auth_provider.to_string(),
        token: session.token,
    };
    Ok(Json(ApiResponse::new(
        response,
        "Logged in successfully with Google",
    )))
}
