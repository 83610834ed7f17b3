// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::domain::services::file_service::FileDownload;

/// `Content-Disposition` 头，非 ASCII 文件名使用 RFC 5987 编码
pub fn content_disposition(filename: &str) -> HeaderValue {
    let plain = format!("attachment; filename=\"{}\"", filename.replace('"', ""));
    if let Ok(value) = HeaderValue::from_str(&plain) {
        if filename.is_ascii() {
            return value;
        }
    }

    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    HeaderValue::from_str(&format!("attachment; filename*=UTF-8''{}", encoded))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// 以流的形式返回文件内容
pub fn file_response(download: FileDownload) -> Response {
    let metadata = download.metadata;
    let content_type = metadata
        .mime_type
        .as_deref()
        .and_then(|m| HeaderValue::from_str(m).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

    (
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&metadata.filename),
            ),
        ],
        Body::from_stream(download.stream),
    )
        .into_response()
}
