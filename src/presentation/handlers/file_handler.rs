// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Multipart, Path, State},
    response::Response,
    Json,
};

use crate::application::dto::file::{FileMetadataResponse, FileUploadForm, UploadResponse};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::upload::receive_file;
use crate::presentation::handlers::download::file_response;
use crate::presentation::routes::AppState;

/// 匿名上传文件
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "Files",
    request_body(content = FileUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "File missing or too large")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let service = state.file_service.clone();
    let metadata = receive_file(&mut multipart, |file| async move {
        service.upload_public(file).await
    })
    .await?;

    Ok(Json(UploadResponse {
        uuid: metadata.uuid,
    }))
}

/// 查询文件元数据
#[utoipa::path(
    get,
    path = "/api/files/{uuid}",
    tag = "Files",
    params(("uuid" = String, Path, description = "File identifier")),
    responses(
        (status = 200, description = "File metadata", body = FileMetadataResponse),
        (status = 400, description = "File expired"),
        (status = 404, description = "File not found")
    )
)]
pub async fn get_file_metadata(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<FileMetadataResponse>, AppError> {
    let metadata = state.file_service.get_file_metadata(&uuid).await?;
    Ok(Json(metadata.into()))
}

/// 匿名下载公开文件
#[utoipa::path(
    get,
    path = "/api/files/download/{uuid}",
    tag = "Files",
    params(("uuid" = String, Path, description = "File identifier")),
    responses(
        (status = 200, description = "File content"),
        (status = 403, description = "Download limit reached or file not public"),
        (status = 404, description = "File not found")
    )
)]
pub async fn download_file(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Response, AppError> {
    let download = state.file_service.download_public(&uuid).await?;
    Ok(file_response(download))
}
