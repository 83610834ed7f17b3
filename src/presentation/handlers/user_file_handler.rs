// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Multipart, Path, State},
    response::Response,
    Json,
};

use crate::application::dto::api_response::MessageResponse;
use crate::application::dto::file::{FileMetadataResponse, FileUploadForm, UserUploadResponse};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;
use crate::presentation::extractors::upload::receive_file;
use crate::presentation::handlers::download::file_response;
use crate::presentation::routes::AppState;

/// 上传私有文件
#[utoipa::path(
    post,
    path = "/user/files/upload",
    tag = "User Files",
    request_body(content = FileUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UserUploadResponse),
        (status = 400, description = "File missing or too large")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_file(
    State(state): State<AppState>,
    current: CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<UserUploadResponse>, AppError> {
    let user = state.user_service.find_file_owner(&current.username).await?;
    let service = state.file_service.clone();
    let metadata = receive_file(&mut multipart, |file| async move {
        service.upload_for_user(file, &user).await
    })
    .await?;

    Ok(Json(UserUploadResponse {
        uuid: metadata.uuid,
        message: "File uploaded successfully".to_string(),
    }))
}

/// 当前用户的文件列表
#[utoipa::path(
    get,
    path = "/user/files",
    tag = "User Files",
    responses((status = 200, description = "Files owned by the user", body = Vec<FileMetadataResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn get_user_files(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<FileMetadataResponse>>, AppError> {
    let user = state.user_service.find_file_owner(&current.username).await?;
    let files = state.file_service.get_user_files(&user).await?;
    Ok(Json(files.into_iter().map(Into::into).collect()))
}

/// 查询文件元数据
#[utoipa::path(
    get,
    path = "/user/files/{uuid}",
    tag = "User Files",
    params(("uuid" = String, Path, description = "File identifier")),
    responses(
        (status = 200, description = "File metadata", body = FileMetadataResponse),
        (status = 403, description = "Account is deactivated"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_file_metadata(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(uuid): Path<String>,
) -> Result<Json<FileMetadataResponse>, AppError> {
    state.user_service.find_file_owner(&current.username).await?;
    let metadata = state.file_service.get_file_metadata(&uuid).await?;
    Ok(Json(metadata.into()))
}

/// 下载文件：所有者、管理员或公开文件
#[utoipa::path(
    get,
    path = "/user/files/download/{uuid}",
    tag = "User Files",
    params(("uuid" = String, Path, description = "File identifier")),
    responses(
        (status = 200, description = "File content"),
        (status = 403, description = "Not allowed or download limit reached"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn download_file(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(uuid): Path<String>,
) -> Result<Response, AppError> {
    let user = state.user_service.find_file_owner(&current.username).await?;
    let download = state.file_service.download_for_user(&uuid, &user).await?;
    Ok(file_response(download))
}

/// 删除文件
#[utoipa::path(
    delete,
    path = "/user/files/{uuid}",
    tag = "User Files",
    params(("uuid" = String, Path, description = "File identifier")),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_file(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(uuid): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = state.user_service.find_file_owner(&current.username).await?;
    state.file_service.delete_user_file(&uuid, &user).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}
