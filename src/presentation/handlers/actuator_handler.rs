// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::infrastructure::database::connection;
use crate::presentation::routes::AppState;

/// 健康检查，包含数据库连通性
#[utoipa::path(
    get,
    path = "/actuator/health",
    tag = "Actuator",
    responses(
        (status = 200, description = "Service is up"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health(State(state): State<AppState>) -> Response {
    let db_up = connection::ping(&state.db).await;
    let (status, label) = if db_up {
        (StatusCode::OK, "UP")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "DOWN")
    };

    (
        status,
        Json(json!({
            "status": label,
            "components": { "db": { "status": label } }
        })),
    )
        .into_response()
}

/// Prometheus 文本格式的指标
#[utoipa::path(
    get,
    path = "/actuator/metrics",
    tag = "Actuator",
    responses(
        (status = 200, description = "Prometheus exposition format", body = String, content_type = "text/plain"),
        (status = 503, description = "Metrics recorder not installed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Metrics recorder not installed",
        )
            .into_response(),
    }
}
