// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users_and_roles::Users;

/// 文件元数据表迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FileMetadata::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FileMetadata::Uuid)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FileMetadata::Filename).string().not_null())
                    .col(ColumnDef::new(FileMetadata::Size).big_integer().not_null())
                    .col(ColumnDef::new(FileMetadata::MimeType).string().null())
                    .col(
                        ColumnDef::new(FileMetadata::UploadDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileMetadata::ExpiryDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FileMetadata::DownloadCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FileMetadata::UserId).big_integer().null())
                    .col(
                        ColumnDef::new(FileMetadata::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_file_metadata_owner")
                            .from(FileMetadata::Table, FileMetadata::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The cleanup sweep and the per-user listing both filter on these
        manager
            .create_index(
                Index::create()
                    .name("idx_file_metadata_expiry_date")
                    .table(FileMetadata::Table)
                    .col(FileMetadata::ExpiryDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_file_metadata_owner_upload")
                    .table(FileMetadata::Table)
                    .col(FileMetadata::UserId)
                    .col(FileMetadata::UploadDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FileMetadata::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FileMetadata {
    Table,
    Uuid,
    Filename,
    Size,
    MimeType,
    UploadDate,
    ExpiryDate,
    DownloadCount,
    UserId,
    IsPublic,
}
