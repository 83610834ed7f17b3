// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::State, Json};

use crate::domain::models::role::Role;
use crate::presentation::errors::AppError;
use crate::presentation::routes::AppState;

/// 所有可用角色
#[utoipa::path(
    get,
    path = "/api/public/config/roles",
    tag = "Config",
    responses((status = 200, description = "All roles", body = Vec<Role>))
)]
pub async fn get_all_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(state.role_repo.find_all().await?))
}
