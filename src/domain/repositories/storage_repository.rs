// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use thiserror::Error;

/// 字节流，上传与下载都以此形式传递文件内容
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 写入的数据超过上限
    #[error("Content exceeds limit of {limit} bytes")]
    TooLarge { limit: u64 },
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 存储仓库特质
///
/// 定义存储数据访问接口
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键保存数据到存储中
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 以流的方式写入数据，超过 `max_bytes` 时返回 `StorageError::TooLarge`
    ///
    /// # 返回值
    ///
    /// 写入的总字节数
    async fn save_stream(
        &self,
        key: &str,
        stream: ByteStream,
        max_bytes: u64,
    ) -> Result<u64, StorageError>;

    /// 打开数据流，键不存在时返回 `None`
    async fn open(&self, key: &str) -> Result<Option<ByteStream>, StorageError>;

    /// 根据键从存储中检索数据
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 根据键从存储中删除数据
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// 检查存储中是否存在指定键
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}
