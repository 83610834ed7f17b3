// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, GOOGLE_TOKEN};
use axum::http::StatusCode;
use serde_json::{json, Value};

/// 注册成功返回用户信息，不含密码
#[tokio::test]
async fn test_register_returns_user_data() {
    let app = create_test_app().await;

    let body = app.register("alice", "alice@example.com", "password123").await;

    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["roles"], json!(["ROLE_USER"]));
    assert!(body["data"].get("password").is_none());
}

/// 校验失败时按字段返回第一条错误信息
#[tokio::test]
async fn test_register_validation_errors_are_mapped_by_field() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "username": "abc",
            "email": "not-an-email",
            "password": "short",
            "roles": ["ROLE_USER"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["username"],
        "Username must be between 4 and 50 characters"
    );
    assert_eq!(body["email"], "Invalid email format");
    assert_eq!(body["password"], "Password must be at least 8 characters long");
}

#[tokio::test]
async fn test_register_duplicate_username_fails() {
    let app = create_test_app().await;
    app.register("alice", "alice@example.com", "password123").await;

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password123",
            "roles": ["ROLE_USER"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Username is already taken");
}

#[tokio::test]
async fn test_register_cannot_request_admin_role() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({
            "username": "mallory",
            "email": "mallory@example.com",
            "password": "password123",
            "roles": ["ROLE_ADMIN"]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// 非法 JSON 按 500 返回固定提示
#[tokio::test]
async fn test_register_malformed_json() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/auth/register")
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Invalid Json format, check the post request body."
    );
}

#[tokio::test]
async fn test_login_returns_token_and_roles() {
    let app = create_test_app().await;
    app.register("alice", "alice@example.com", "password123").await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "password123" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Logged in successfully");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["roles"], json!(["ROLE_USER"]));
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = create_test_app().await;
    app.register("alice", "alice@example.com", "password123").await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong-password" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid password");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "username": "ghost", "password": "password123" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid username");
}

#[tokio::test]
async fn test_seeded_admin_can_login() {
    let app = create_test_app().await;

    let token = app.admin_token().await;

    assert!(!token.is_empty());
}

/// Google 登录首次创建账号，之后复用
#[tokio::test]
async fn test_google_login_creates_and_reuses_account() {
    let app = create_test_app().await;

    let first = app
        .server
        .post("/auth/login/google")
        .json(&json!({ "idToken": GOOGLE_TOKEN }))
        .await;
    first.assert_status_ok();
    let first: Value = first.json();
    assert_eq!(first["data"]["username"], "jane");
    assert_eq!(first["data"]["email"], "jane@gmail.com");
    assert_eq!(first["data"]["authProvider"], "GOOGLE");
    assert_eq!(first["data"]["roles"], json!(["ROLE_USER"]));

    let second = app
        .server
        .post("/auth/login/google")
        .json(&json!({ "idToken": GOOGLE_TOKEN }))
        .await;
    second.assert_status_ok();
    let second: Value = second.json();
    assert_eq!(second["data"]["id"], first["data"]["id"]);
}

#[tokio::test]
async fn test_google_login_with_invalid_token() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/auth/login/google")
        .json(&json!({ "idToken": "forged" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_login_requires_token() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/auth/login/google")
        .json(&json!({ "idToken": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["idToken"], "ID token is required");
}
