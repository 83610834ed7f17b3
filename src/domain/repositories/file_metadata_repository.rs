// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::file_metadata::{FileMetadata, NewFileMetadata};
use crate::domain::repositories::user_repository::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 文件元数据仓库特质
#[async_trait]
pub trait FileMetadataRepository: Send + Sync {
    /// 保存新的文件元数据
    async fn create(&self, metadata: NewFileMetadata) -> Result<FileMetadata, RepositoryError>;

    /// 根据 UUID 查找，结果带有所有者用户名
    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<FileMetadata>, RepositoryError>;

    async fn exists_by_uuid(&self, uuid: &str) -> Result<bool, RepositoryError>;

    /// 查找用户的所有文件，按上传时间倒序
    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<FileMetadata>, RepositoryError>;

    /// 查找过期时间早于 `before` 的文件
    async fn find_expired(
        &self,
        before: DateTime<Utc>,
    ) -> Result<Vec<FileMetadata>, RepositoryError>;

    /// 下载计数小于 `max` 时原子地加一
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 计数已增加
    /// * `Ok(false)` - 已达到下载上限或文件不存在
    async fn increment_download_count(&self, uuid: &str, max: i32)
        -> Result<bool, RepositoryError>;

    /// 删除元数据
    async fn delete(&self, uuid: &str) -> Result<(), RepositoryError>;
}
