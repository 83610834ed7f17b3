// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use bytes::Bytes;
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use std::future::Future;

use crate::domain::services::errors::ServiceError;
use crate::domain::services::file_service::UploadedFile;
use crate::presentation::errors::{AppError, MissingFile};

/// 上传字段名
const FILE_FIELD: &str = "file";

/// 取路径中的最后一段作为文件名
pub fn sanitize_filename(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if name.is_empty() || name == "." || name == ".." {
        "file".to_string()
    } else {
        name.to_string()
    }
}

/// 将 `file` 字段以流的形式交给 `handle`
///
/// 请求体边读边写，不会整体缓存在内存中。
/// 读取请求体出错（例如超出大小限制）时优先返回该错误。
pub async fn receive_file<F, Fut, T>(multipart: &mut Multipart, handle: F) -> Result<T, AppError>
where
    F: FnOnce(UploadedFile) -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let field = loop {
        match multipart.next_field().await? {
            Some(field) if field.name() == Some(FILE_FIELD) => break field,
            Some(_) => continue,
            None => return Err(MissingFile.into()),
        }
    };

    let filename = sanitize_filename(field.file_name().unwrap_or_default());
    let content_type = field.content_type().map(str::to_string);

    let (tx, rx) = mpsc::channel::<std::io::Result<Bytes>>(8);
    let file = UploadedFile {
        filename,
        content_type,
        stream: rx.boxed(),
    };

    let (pumped, result) = tokio::join!(pump(field, tx), handle(file));
    if let Err(e) = pumped {
        return Err(e.into());
    }
    Ok(result?)
}

async fn pump(
    mut field: Field<'_>,
    mut tx: mpsc::Sender<std::io::Result<Bytes>>,
) -> Result<(), MultipartError> {
    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                // receiver dropped: the consumer stopped early
                if tx.send(Ok(chunk)).await.is_err() {
                    return Ok(());
                }
            }
            Ok(None) => return Ok(()),
            Err(e) => {
                let _ = tx
                    .send(Err(std::io::Error::other(e.to_string())))
                    .await;
                return Err(e);
            }
        }
    }
}
