// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::config::settings::ErrorSettings;
use crate::domain::repositories::user_repository::RepositoryError;
use crate::domain::services::errors::ServiceError;

const INVALID_JSON: &str = "Invalid Json format, check the post request body.";
const UPLOAD_TOO_LARGE: &str =
    "File size exceeds the maximum allowed limit. Please upload a file smaller than 1GB.";
const GENERIC_ERROR: &str = "An unexpected error occurred. Please try again later.";

static ERROR_SETTINGS: OnceCell<ErrorSettings> = OnceCell::new();

/// 设置错误响应策略，只有第一次调用生效
pub fn configure(settings: &ErrorSettings) {
    let _ = ERROR_SETTINGS.set(settings.clone());
}

fn include_details() -> bool {
    ERROR_SETTINGS
        .get()
        .is_some_and(ErrorSettings::include_details)
}

/// 错误响应体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl ErrorDetails {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: None,
        }
    }
}

/// 请求中缺少名为 `file` 的上传字段
#[derive(Debug, Error)]
#[error("Required file parameter is missing. Please provide a file to upload.")]
pub struct MissingFile;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，按错误来源映射为 HTTP 状态码和 `ErrorDetails`
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn classify(&self) -> (StatusCode, String) {
        if let Some(err) = self.0.downcast_ref::<ServiceError>() {
            return match err {
                ServiceError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
                ServiceError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
                ServiceError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
                ServiceError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
                ServiceError::Repository(RepositoryError::NotFound) => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                _ => internal(err.to_string()),
            };
        }

        if self.0.is::<MissingFile>() {
            return (StatusCode::BAD_REQUEST, self.0.to_string());
        }

        if self.0.is::<JsonRejection>() {
            return (StatusCode::INTERNAL_SERVER_ERROR, INVALID_JSON.to_string());
        }

        if let Some(err) = self.0.downcast_ref::<MultipartError>() {
            return multipart(err.status(), err.body_text());
        }

        if let Some(err) = self.0.downcast_ref::<MultipartRejection>() {
            return multipart(err.status(), err.body_text());
        }

        internal(self.0.to_string())
    }
}

fn internal(message: String) -> (StatusCode, String) {
    let message = if include_details() {
        format!("An unexpected server error occurred: {}", message)
    } else {
        GENERIC_ERROR.to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn multipart(status: StatusCode, body: String) -> (StatusCode, String) {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        (StatusCode::BAD_REQUEST, UPLOAD_TOO_LARGE.to_string())
    } else {
        (StatusCode::BAD_REQUEST, body)
    }
}

/// 校验错误转为 `{字段: 消息}`，字段名使用 camelCase，每个字段取第一条
pub fn validation_map(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (to_camel_case(&field), message)
            })
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(errors) = self.0.downcast_ref::<ValidationErrors>() {
            return (StatusCode::BAD_REQUEST, Json(validation_map(errors))).into_response();
        }

        let (status, message) = self.classify();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        }

        let stack_trace = include_details().then(|| format!("{:?}", self.0));
        (status, Json(ErrorDetails { message, stack_trace })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
