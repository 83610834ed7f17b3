// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::models::file_metadata::FileMetadata;

/// 文件元数据响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadataResponse {
    pub uuid: String,
    pub filename: String,
    pub size: i64,
    pub upload_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub download_count: i32,
    pub is_public: bool,
    /// 只返回所有者用户名
    pub owner_username: Option<String>,
    pub mime_type: Option<String>,
}

impl From<FileMetadata> for FileMetadataResponse {
    fn from(m: FileMetadata) -> Self {
        Self {
            uuid: m.uuid,
            filename: m.filename,
            size: m.size,
            upload_date: m.upload_date,
            expiry_date: m.expiry_date,
            download_count: m.download_count,
            is_public: m.is_public,
            owner_username: m.owner_username,
            mime_type: m.mime_type,
        }
    }
}

/// 匿名上传响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub uuid: String,
}

/// 登录用户上传响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserUploadResponse {
    pub uuid: String,
    pub message: String,
}

/// multipart 上传表单，仅用于 API 文档
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct FileUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
