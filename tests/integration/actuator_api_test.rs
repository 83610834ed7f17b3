// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::{HeaderValue, Method, StatusCode};
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_database_status() {
    let app = create_test_app().await;

    let response = app.server.get("/actuator/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "UP");
    assert_eq!(body["components"]["db"]["status"], "UP");
}

#[tokio::test]
async fn test_metrics_require_authentication() {
    let app = create_test_app().await;

    app.server
        .get("/actuator/metrics")
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // No recorder is installed in tests
    let token = app.admin_token().await;
    app.server
        .get("/actuator/metrics")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_public_roles_endpoint() {
    let app = create_test_app().await;

    let response = app.server.get("/api/public/config/roles").await;

    response.assert_status_ok();
    let roles: Vec<Value> = response.json();
    let names: Vec<&str> = roles.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"ROLE_ADMIN"));
    assert!(names.contains(&"ROLE_USER"));
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = create_test_app().await;

    let response = app.server.get("/v3/api-docs").await;

    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert!(doc["paths"].get("/auth/login").is_some());
    assert!(doc["paths"].get("/user/files/{uuid}").is_some());
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let app = create_test_app().await;

    let response = app
        .server
        .method(Method::OPTIONS, "/auth/login")
        .add_header("origin", "http://localhost:5173")
        .add_header("access-control-request-method", "POST")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        HeaderValue::from_static("http://localhost:5173")
    );
}
