// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::domain::models::role::{ROLE_ADMIN, ROLE_USER};
use crate::domain::services::jwt_service::JwtService;
use crate::presentation::errors::ErrorDetails;
use crate::presentation::extractors::current_user::CurrentUser;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    pub jwt_service: JwtService,
}

/// 访问路径所需的权限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 无需令牌
    Public,
    /// 任意已认证用户
    Authenticated,
    /// 拥有其中任一角色
    AnyRole(&'static [&'static str]),
}

const PUBLIC_PREFIXES: &[&str] = &[
    "/auth/",
    "/api/public/",
    "/api/files/",
    "/uploads/",
    "/swagger-ui",
];
const PUBLIC_PATHS: &[&str] = &["/actuator/health", "/v3/api-docs"];

/// 根据请求方法和路径判断访问规则
pub fn required_access(method: &Method, path: &str) -> Access {
    if method == Method::OPTIONS
        || PUBLIC_PATHS.contains(&path)
        || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
        || (method == Method::POST && path == "/user/verify-email")
    {
        return Access::Public;
    }

    if path == "/admin" || path.starts_with("/admin/") {
        return Access::AnyRole(&[ROLE_ADMIN]);
    }

    if path == "/user" || path.starts_with("/user/") {
        return Access::AnyRole(&[ROLE_ADMIN, ROLE_USER]);
    }

    Access::Authenticated
}

fn access_denied() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorDetails::new("Access Denied")),
    )
        .into_response()
}

/// 从 `Authorization: Bearer` 头中解析当前用户
fn authenticate(jwt_service: &JwtService, req: &Request) -> Option<CurrentUser> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))?;

    let claims = match jwt_service.extract_claims(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Rejected bearer token: {}", e);
            return None;
        }
    };

    let roles = match claims.extra.get("roles") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    Some(CurrentUser {
        username: claims.sub,
        roles,
    })
}

/// 认证中间件
///
/// 校验 JWT 并按路径检查角色，通过后把 `CurrentUser` 写入请求扩展。
/// 缺少令牌、令牌无效或角色不足时返回 403。
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let access = required_access(req.method(), req.uri().path());
    let user = authenticate(&state.jwt_service, &req);

    let allowed = match (access, &user) {
        (Access::Public, _) => true,
        (Access::Authenticated, Some(_)) => true,
        (Access::AnyRole(roles), Some(user)) => user.has_any_role(roles),
        (_, None) => false,
    };

    if !allowed {
        debug!(
            "Access denied for {} {} ({:?})",
            req.method(),
            req.uri().path(),
            access
        );
        return access_denied();
    }

    if let Some(user) = user {
        req.extensions_mut().insert(user);
    }
    next.run(req).await
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
