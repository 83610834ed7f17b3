// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::services::errors::ServiceError;
use crate::domain::services::file_service::FileService;

/// 最短清理间隔，`tokio::time::interval` 不接受零周期
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// 过期文件清理工作器
///
/// 按固定间隔删除过期文件及其元数据
pub struct CleanupWorker {
    file_service: Arc<FileService>,
    interval: Duration,
}

impl CleanupWorker {
    pub fn new(file_service: Arc<FileService>, interval: Duration) -> Self {
        Self {
            file_service,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// 运行工作器，启动后立即执行一次
    pub async fn run(&self) {
        info!(
            "File cleanup worker started (interval {}s)",
            self.interval.as_secs()
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            if let Err(e) = self.cleanup_expired_files().await {
                error!("Failed to clean up expired files: {}", e);
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn cleanup_expired_files(&self) -> Result<u64, ServiceError> {
        info!("Starting cleanup of expired files");
        let removed = self.file_service.cleanup_expired(Utc::now()).await?;
        info!("Cleanup finished, {} expired files deleted", removed);
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "cleanup_worker_test.rs"]
mod tests;
