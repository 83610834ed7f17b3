// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};

/// 文件元数据实体
///
/// 描述一个已上传文件。匿名上传的文件没有所有者，且 `is_public` 为真。
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    /// 文件唯一标识（UUID v4 文本）
    pub uuid: String,
    /// 原始文件名
    pub filename: String,
    /// 文件大小（字节）
    pub size: i64,
    pub mime_type: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub download_count: i32,
    /// 所有者 ID
    pub owner_id: Option<i64>,
    /// 所有者用户名，查询时关联得到
    pub owner_username: Option<String>,
    pub is_public: bool,
}

impl FileMetadata {
    /// 是否已过期
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_date
    }

    /// 存储键：UUID 加上原文件扩展名
    pub fn storage_key(&self) -> String {
        storage_key(&self.uuid, &self.filename)
    }
}

/// 待保存的文件元数据
#[derive(Debug, Clone)]
pub struct NewFileMetadata {
    pub uuid: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub owner_id: Option<i64>,
    pub is_public: bool,
}

/// 提取文件扩展名（包含点号），没有扩展名时返回空字符串
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[idx..],
        None => "",
    }
}

/// 根据 UUID 和文件名生成存储键
pub fn storage_key(uuid: &str, filename: &str) -> String {
    format!("{}{}", uuid, file_extension(filename))
}
