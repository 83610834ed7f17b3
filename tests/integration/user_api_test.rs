// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, file_form, GOOGLE_TOKEN};
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_profile_returns_account_details() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let response = app
        .server
        .get("/user/profile")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["emailVerified"], true);
    assert_eq!(body["data"]["authProvider"], "LOCAL");
    assert_eq!(body["data"]["roles"], json!(["ROLE_USER"]));
}

#[tokio::test]
async fn test_invalid_token_is_denied() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/user/profile")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

/// 上传的头像可以通过公开地址访问，删除后地址清空
#[tokio::test]
async fn test_profile_picture_upload_serve_and_delete() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let upload = app
        .server
        .post("/user/profile-picture")
        .authorization_bearer(&token)
        .multipart(file_form("avatar.png", "image/png", b"\x89PNG fake image"))
        .await;
    upload.assert_status_ok();
    let body: Value = upload.json();
    let url = body["data"]["profilePictureUrl"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/profile-pictures/"));
    assert!(url.ends_with(".png"));

    let served = app.server.get(&url).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().as_ref(), b"\x89PNG fake image");

    app.server
        .delete("/user/profile-picture")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let profile: Value = app
        .server
        .get("/user/profile")
        .authorization_bearer(&token)
        .await
        .json();
    assert!(profile["data"]["profilePictureUrl"].is_null());
    app.server.get(&url).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_picture_must_be_image() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let response = app
        .server
        .post("/user/profile-picture")
        .authorization_bearer(&token)
        .multipart(file_form("notes.txt", "text/plain", b"not an image"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Only image files are allowed");
}

/// 伪装成图片的 HTML 不能以 HTML 形式被访问
#[tokio::test]
async fn test_profile_picture_html_is_not_served_as_html() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let upload = app
        .server
        .post("/user/profile-picture")
        .authorization_bearer(&token)
        .multipart(file_form(
            "evil.html",
            "image/png",
            b"<script>alert(1)</script>",
        ))
        .await;
    upload.assert_status_ok();
    let body: Value = upload.json();
    let url = body["data"]["profilePictureUrl"].as_str().unwrap().to_string();
    assert!(url.ends_with(".jpg"));

    let served = app.server.get(&url).await;
    served.assert_status_ok();
    let content_type = served.header("content-type");
    assert!(!content_type.to_str().unwrap().contains("html"));
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let mismatch = app
        .server
        .post("/user/change_password")
        .authorization_bearer(&token)
        .json(&json!({
            "oldPassword": "password123",
            "newPassword": "new-password-1",
            "confirmNewPassword": "new-password-2"
        }))
        .await;
    mismatch.assert_status(StatusCode::BAD_REQUEST);

    let changed = app
        .server
        .post("/user/change_password")
        .authorization_bearer(&token)
        .json(&json!({
            "oldPassword": "password123",
            "newPassword": "new-password-1",
            "confirmNewPassword": "new-password-1"
        }))
        .await;
    changed.assert_status_ok();
    let body: Value = changed.json();
    assert_eq!(body["message"], "Password changed successfully");

    let new_token = app.login("alice", "new-password-1").await;
    assert!(!new_token.is_empty());
    app.server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "password123" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deactivated_account_cannot_login() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let response = app
        .server
        .post("/user/deactivate")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Account deactivated successfully");

    let login = app
        .server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "password123" }))
        .await;
    login.assert_status(StatusCode::FORBIDDEN);
    let body: Value = login.json();
    assert_eq!(body["message"], "Account is deactivated");
}

/// 新注册账号在邮箱验证前不能访问资料
#[tokio::test]
async fn test_email_verification_activates_account() {
    let app = create_test_app().await;
    app.register("alice", "alice@example.com", "password123").await;
    // Pending accounts may still log in
    let token = app.login("alice", "password123").await;

    let pending = app
        .server
        .get("/user/profile")
        .authorization_bearer(&token)
        .await;
    pending.assert_status(StatusCode::BAD_REQUEST);

    app.server
        .post("/user/send-verification-email")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
    let verification = app.last_verification_token().unwrap();

    // The verification endpoint needs no login
    let verified = app
        .server
        .post("/user/verify-email")
        .json(&json!({ "token": verification }))
        .await;
    verified.assert_status_ok();
    let body: Value = verified.json();
    assert_eq!(body["message"], "Email verified successfully");

    let profile = app
        .server
        .get("/user/profile")
        .authorization_bearer(&token)
        .await;
    profile.assert_status_ok();
    let profile: Value = profile.json();
    assert_eq!(profile["data"]["emailVerified"], true);

    let again = app
        .server
        .post("/user/send-verification-email")
        .authorization_bearer(&token)
        .await;
    again.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = again.json();
    assert_eq!(body["message"], "Email is already verified");
}

#[tokio::test]
async fn test_verify_email_with_unknown_token() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/user/verify-email")
        .json(&json!({ "token": "unknown" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid verification token");
}

#[tokio::test]
async fn test_google_account_cannot_request_verification() {
    let app = create_test_app().await;
    let login: Value = app
        .server
        .post("/auth/login/google")
        .json(&json!({ "idToken": GOOGLE_TOKEN }))
        .await
        .json();
    let token = login["data"]["token"].as_str().unwrap();

    let response = app
        .server
        .post("/user/send-verification-email")
        .authorization_bearer(token)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_sum_uploads_and_downloads() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let upload: Value = app
        .server
        .post("/user/files/upload")
        .authorization_bearer(&token)
        .multipart(file_form("a.txt", "text/plain", b"12345"))
        .await
        .json();
    let uuid = upload["uuid"].as_str().unwrap();
    app.server
        .post("/user/files/upload")
        .authorization_bearer(&token)
        .multipart(file_form("b.txt", "text/plain", b"123"))
        .await
        .assert_status_ok();
    app.server
        .get(&format!("/user/files/download/{}", uuid))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let response = app
        .server
        .get("/user/stats")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["totalFilesUploaded"], 2);
    assert_eq!(body["data"]["totalStorageUsed"], 8);
    assert_eq!(body["data"]["totalDownloads"], 1);
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let app = create_test_app().await;
    let token = app.user_token("alice").await;

    let response = app
        .server
        .get("/admin/anything")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
