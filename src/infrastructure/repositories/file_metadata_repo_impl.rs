// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::file_metadata::{FileMetadata, NewFileMetadata};
use crate::domain::repositories::file_metadata_repository::FileMetadataRepository;
use crate::domain::repositories::user_repository::RepositoryError;
use crate::infrastructure::database::entities::{file_metadata, user};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

/// 文件元数据仓库实现
#[derive(Clone)]
pub struct FileMetadataRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl FileMetadataRepositoryImpl {
    /// 创建新的文件元数据仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileMetadataRepository for FileMetadataRepositoryImpl {
    async fn create(&self, metadata: NewFileMetadata) -> Result<FileMetadata, RepositoryError> {
        let model = file_metadata::ActiveModel {
            uuid: Set(metadata.uuid),
            filename: Set(metadata.filename),
            size: Set(metadata.size),
            mime_type: Set(metadata.mime_type),
            upload_date: Set(metadata.upload_date.into()),
            expiry_date: Set(metadata.expiry_date.into()),
            download_count: Set(0),
            user_id: Set(metadata.owner_id),
            is_public: Set(metadata.is_public),
        };

        let model = model.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<FileMetadata>, RepositoryError> {
        let found = file_metadata::Entity::find_by_id(uuid.to_string())
            .find_also_related(user::Entity)
            .one(self.db.as_ref())
            .await?;

        Ok(found.map(with_owner))
    }

    async fn exists_by_uuid(&self, uuid: &str) -> Result<bool, RepositoryError> {
        let count = file_metadata::Entity::find_by_id(uuid.to_string())
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<FileMetadata>, RepositoryError> {
        let rows = file_metadata::Entity::find()
            .filter(file_metadata::Column::UserId.eq(owner_id))
            .order_by_desc(file_metadata::Column::UploadDate)
            .find_also_related(user::Entity)
            .all(self.db.as_ref())
            .await?;

        Ok(rows.into_iter().map(with_owner).collect())
    }

    async fn find_expired(
        &self,
        before: DateTime<Utc>,
    ) -> Result<Vec<FileMetadata>, RepositoryError> {
        let before: DateTimeWithTimeZone = before.into();
        let models = file_metadata::Entity::find()
            .filter(file_metadata::Column::ExpiryDate.lt(before))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn increment_download_count(
        &self,
        uuid: &str,
        max: i32,
    ) -> Result<bool, RepositoryError> {
        // Single conditional UPDATE so concurrent downloads cannot exceed the limit
        let result = file_metadata::Entity::update_many()
            .col_expr(
                file_metadata::Column::DownloadCount,
                Expr::col(file_metadata::Column::DownloadCount).add(1),
            )
            .filter(file_metadata::Column::Uuid.eq(uuid))
            .filter(file_metadata::Column::DownloadCount.lt(max))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, uuid: &str) -> Result<(), RepositoryError> {
        file_metadata::Entity::delete_by_id(uuid.to_string())
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}

fn with_owner((model, owner): (file_metadata::Model, Option<user::Model>)) -> FileMetadata {
    let mut metadata: FileMetadata = model.into();
    metadata.owner_username = owner.map(|u| u.username);
    metadata
}

impl From<file_metadata::Model> for FileMetadata {
    fn from(model: file_metadata::Model) -> Self {
        Self {
            uuid: model.uuid,
            filename: model.filename,
            size: model.size,
            mime_type: model.mime_type,
            upload_date: model.upload_date.into(),
            expiry_date: model.expiry_date.into(),
            download_count: model.download_count,
            owner_id: model.user_id,
            owner_username: None,
            is_public: model.is_public,
        }
    }
}
