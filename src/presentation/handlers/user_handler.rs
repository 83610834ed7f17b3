// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::application::dto::api_response::ApiResponse;
use crate::application::dto::file::FileUploadForm;
use crate::application::dto::user::{ChangePasswordRequest, UserProfileResponse, VerifyEmailRequest};
use crate::domain::models::user::UserStats;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;
use crate::presentation::extractors::json::ValidatedJson;
use crate::presentation::extractors::upload::receive_file;
use crate::presentation::routes::AppState;

type MessageOnly = Json<ApiResponse<String>>;

/// 当前用户资料
#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "User",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<UserProfileResponse>),
        (status = 400, description = "Account is deactivated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ApiResponse<UserProfileResponse>>, AppError> {
    let user = state.user_service.get_user_profile(&current.username).await?;
    Ok(Json(ApiResponse::new(
        UserProfileResponse::from(&user),
        "Profile retrieved successfully",
    )))
}

/// 上传头像
#[utoipa::path(
    post,
    path = "/user/profile-picture",
    tag = "User",
    request_body(content = FileUploadForm, content_type = "multipart/form-data", description = "Image up to 5MB"),
    responses(
        (status = 200, description = "Picture stored", body = ApiResponse<UserProfileResponse>),
        (status = 400, description = "Empty, too large or not an image")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    current: CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UserProfileResponse>>, AppError> {
    let service = state.user_service.clone();
    let username = current.username;
    let user = receive_file(&mut multipart, |file| async move {
        service.upload_profile_picture(&username, file).await
    })
    .await?;

    Ok(Json(ApiResponse::new(
        UserProfileResponse::from(&user),
        "Profile picture uploaded successfully",
    )))
}

/// 删除头像
#[utoipa::path(
    delete,
    path = "/user/profile-picture",
    tag = "User",
    responses((status = 200, description = "Picture removed", body = ApiResponse<String>)),
    security(("bearer_auth" = []))
)]
pub async fn delete_profile_picture(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<MessageOnly, AppError> {
    state
        .user_service
        .delete_profile_picture(&current.username)
        .await?;
    Ok(Json(ApiResponse::message(
        "Profile picture deleted successfully",
    )))
}

/// 修改密码
#[utoipa::path(
    post,
    path = "/user/change_password",
    tag = "User",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<String>),
        (status = 400, description = "Validation failed or wrong password")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<MessageOnly, AppError> {
    state
        .user_service
        .change_password(&current.username, &request)
        .await?;
    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// 停用账号
#[utoipa::path(
    post,
    path = "/user/deactivate",
    tag = "User",
    responses(
        (status = 200, description = "Account deactivated", body = ApiResponse<String>),
        (status = 400, description = "Already deactivated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn deactivate_account(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<MessageOnly, AppError> {
    state
        .user_service
        .deactivate_account(&current.username)
        .await?;
    Ok(Json(ApiResponse::message("Account deactivated successfully")))
}

/// 重新发送验证邮件
#[utoipa::path(
    post,
    path = "/user/send-verification-email",
    tag = "User",
    responses(
        (status = 200, description = "Email sent", body = ApiResponse<String>),
        (status = 400, description = "Not a LOCAL account or already verified")
    ),
    security(("bearer_auth" = []))
)]
pub async fn send_verification_email(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<MessageOnly, AppError> {
    state
        .user_service
        .resend_verification_email(&current.username)
        .await?;
    Ok(Json(ApiResponse::message(
        "Verification email sent successfully",
    )))
}

/// 验证邮箱
#[utoipa::path(
    post,
    path = "/user/verify-email",
    tag = "User",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified", body = ApiResponse<String>),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> Result<MessageOnly, AppError> {
    state.user_service.verify_email(&request.token).await?;
    Ok(Json(ApiResponse::message("Email verified successfully")))
}

/// 文件统计
#[utoipa::path(
    get,
    path = "/user/stats",
    tag = "User",
    responses((status = 200, description = "Statistics", body = ApiResponse<UserStats>)),
    security(("bearer_auth" = []))
)]
pub async fn get_stats(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ApiResponse<UserStats>>, AppError> {
    let stats = state.user_service.get_user_stats(&current.username).await?;
    Ok(Json(ApiResponse::new(
        stats,
        "Statistics retrieved successfully",
    )))
}
