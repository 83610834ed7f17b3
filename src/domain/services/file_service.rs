// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::settings::UploadSettings;
use crate::domain::models::file_metadata::{storage_key, FileMetadata, NewFileMetadata};
use crate::domain::models::user::User;
use crate::domain::repositories::file_metadata_repository::FileMetadataRepository;
use crate::domain::repositories::storage_repository::{ByteStream, StorageError, StorageRepository};
use crate::domain::services::errors::ServiceError;

const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// 上传的文件
pub struct UploadedFile {
    /// 客户端提供的原始文件名
    pub filename: String,
    pub content_type: Option<String>,
    /// 文件内容
    pub stream: ByteStream,
}

/// 下载结果
pub struct FileDownload {
    /// 计数更新后的元数据
    pub metadata: FileMetadata,
    pub stream: ByteStream,
}

/// 文件服务
///
/// 负责上传、下载计数、所有权校验和过期清理
pub struct FileService {
    file_repo: Arc<dyn FileMetadataRepository>,
    storage: Arc<dyn StorageRepository>,
    limits: UploadSettings,
}

impl FileService {
    /// 创建新的文件服务实例
    pub fn new(
        file_repo: Arc<dyn FileMetadataRepository>,
        storage: Arc<dyn StorageRepository>,
        limits: UploadSettings,
    ) -> Self {
        Self {
            file_repo,
            storage,
            limits,
        }
    }

    /// 匿名上传，文件公开且没有所有者
    pub async fn upload_public(&self, file: UploadedFile) -> Result<FileMetadata, ServiceError> {
        let metadata = self
            .store(
                file,
                None,
                true,
                self.limits.public_max_size,
                self.limits.public_expiry_days,
            )
            .await?;
        metrics::counter!("proximashare_files_uploaded_total", "visibility" => "public")
            .increment(1);
        Ok(metadata)
    }

    /// 登录用户上传，文件归属该用户且不公开
    pub async fn upload_for_user(
        &self,
        file: UploadedFile,
        user: &User,
    ) -> Result<FileMetadata, ServiceError> {
        let metadata = self
            .store(
                file,
                Some(user.id),
                false,
                self.limits.user_max_size,
                self.limits.user_expiry_days,
            )
            .await?;
        metrics::counter!("proximashare_files_uploaded_total", "visibility" => "private")
            .increment(1);
        Ok(metadata)
    }

    /// 用户的所有文件，最新的在前
    pub async fn get_user_files(&self, user: &User) -> Result<Vec<FileMetadata>, ServiceError> {
        Ok(self.file_repo.find_by_owner(user.id).await?)
    }

    /// 查询未过期文件的元数据
    pub async fn get_file_metadata(&self, uuid: &str) -> Result<FileMetadata, ServiceError> {
        let metadata = self
            .file_repo
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ServiceError::not_found("File not found or expired"))?;

        if metadata.is_expired(Utc::now()) {
            return Err(ServiceError::bad_request("File expired"));
        }

        Ok(metadata)
    }

    /// 匿名下载，只允许公开文件
    pub async fn download_public(&self, uuid: &str) -> Result<FileDownload, ServiceError> {
        let metadata = self.get_file_metadata(uuid).await?;
        if !metadata.is_public {
            return Err(ServiceError::forbidden("Not authorized to download this file"));
        }

        self.serve(metadata).await
    }

    /// 登录用户下载：所有者、管理员或公开文件
    pub async fn download_for_user(
        &self,
        uuid: &str,
        user: &User,
    ) -> Result<FileDownload, ServiceError> {
        let metadata = self.get_file_metadata(uuid).await?;
        let allowed =
            metadata.is_public || metadata.owner_id == Some(user.id) || user.is_admin();
        if !allowed {
            return Err(ServiceError::forbidden("Not authorized to download this file"));
        }

        self.serve(metadata).await
    }

    /// 删除文件，只有所有者或管理员可以操作
    pub async fn delete_user_file(&self, uuid: &str, user: &User) -> Result<(), ServiceError> {
        let metadata = self
            .file_repo
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| ServiceError::not_found("File not found or you don't own this file"))?;

        if metadata.owner_id != Some(user.id) && !user.is_admin() {
            return Err(ServiceError::forbidden("You don't own this file"));
        }

        self.storage.delete(&metadata.storage_key()).await?;
        self.file_repo.delete(uuid).await?;
        info!("User {} deleted file {}", user.username, uuid);
        Ok(())
    }

    /// 删除所有在 `now` 之前过期的文件
    ///
    /// 单个文件失败只记录日志，不中断清理
    ///
    /// # 返回值
    ///
    /// 成功删除的文件数
    pub async fn cleanup_expired(&self, now: DateTime<Utc>) -> Result<u64, ServiceError> {
        let expired = self.file_repo.find_expired(now).await?;
        let mut removed = 0u64;

        for metadata in expired {
            let key = metadata.storage_key();
            if let Err(e) = self.storage.delete(&key).await {
                error!("Failed to delete stored file {}: {}", key, e);
                continue;
            }
            if let Err(e) = self.file_repo.delete(&metadata.uuid).await {
                error!("Failed to delete metadata for {}: {}", metadata.uuid, e);
                continue;
            }
            debug!("Deleted expired file {} ({})", metadata.uuid, metadata.filename);
            removed += 1;
        }

        metrics::counter!("proximashare_files_expired_total").increment(removed);
        Ok(removed)
    }

    async fn store(
        &self,
        file: UploadedFile,
        owner_id: Option<i64>,
        is_public: bool,
        max_size: u64,
        expiry_days: i64,
    ) -> Result<FileMetadata, ServiceError> {
        let uuid = self.generate_uuid().await?;
        let key = storage_key(&uuid, &file.filename);

        let written = match self.storage.save_stream(&key, file.stream, max_size).await {
            Ok(written) => written,
            Err(StorageError::TooLarge { limit }) => {
                self.discard(&key).await;
                return Err(ServiceError::BadRequest(format!(
                    "File size exceeds {}GB limit",
                    limit / BYTES_PER_GB
                )));
            }
            Err(e) => {
                self.discard(&key).await;
                return Err(e.into());
            }
        };

        if written == 0 && owner_id.is_some() {
            self.discard(&key).await;
            return Err(ServiceError::bad_request("File is missing"));
        }

        let now = Utc::now();
        let new_metadata = NewFileMetadata {
            uuid,
            filename: file.filename,
            size: written as i64,
            mime_type: file.content_type,
            upload_date: now,
            expiry_date: now + Duration::days(expiry_days),
            owner_id,
            is_public,
        };

        match self.file_repo.create(new_metadata).await {
            Ok(metadata) => {
                info!(
                    "Stored file {} ({} bytes, public: {})",
                    metadata.uuid, metadata.size, metadata.is_public
                );
                Ok(metadata)
            }
            Err(e) => {
                self.discard(&key).await;
                Err(e.into())
            }
        }
    }

    async fn serve(&self, mut metadata: FileMetadata) -> Result<FileDownload, ServiceError> {
        let max = if metadata.is_public {
            self.limits.public_max_downloads
        } else {
            self.limits.user_max_downloads
        };

        let stream = self
            .storage
            .open(&metadata.storage_key())
            .await?
            .ok_or_else(|| ServiceError::not_found("File not found or expired"))?;

        if !self
            .file_repo
            .increment_download_count(&metadata.uuid, max)
            .await?
        {
            return Err(ServiceError::Forbidden(format!(
                "File download limit reached for this file. (Max. {} Times)",
                max
            )));
        }

        metadata.download_count += 1;
        metrics::counter!("proximashare_files_downloaded_total").increment(1);
        Ok(FileDownload { metadata, stream })
    }

    async fn generate_uuid(&self) -> Result<String, ServiceError> {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if !self.file_repo.exists_by_uuid(&candidate).await? {
                return Ok(candidate);
            }
        }
    }

    async fn discard(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            warn!("Failed to remove partial upload {}: {}", key, e);
        }
    }
}

#[cfg(test)]
#[path = "file_service_test.rs"]
mod tests;
