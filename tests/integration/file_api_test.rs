// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, file_form, TestApp};
use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use chrono::{Duration, Utc};
use proximashare::infrastructure::database::entities::file_metadata;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde_json::Value;

async fn upload_public(app: &TestApp, name: &str, content: &[u8]) -> String {
    let response = app
        .server
        .post("/api/files/upload")
        .multipart(file_form(name, "text/plain", content))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["uuid"].as_str().unwrap().to_string()
}

async fn upload_private(app: &TestApp, token: &str, name: &str, content: &[u8]) -> String {
    let response = app
        .server
        .post("/user/files/upload")
        .authorization_bearer(token)
        .multipart(file_form(name, "text/plain", content))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "File uploaded successfully");
    body["uuid"].as_str().unwrap().to_string()
}

/// 匿名上传后可查询元数据并下载
#[tokio::test]
async fn test_public_upload_metadata_and_download() {
    let app = create_test_app().await;
    let uuid = upload_public(&app, "notes.txt", b"hello world").await;

    let metadata = app.server.get(&format!("/api/files/{}", uuid)).await;
    metadata.assert_status_ok();
    let metadata: Value = metadata.json();
    assert_eq!(metadata["filename"], "notes.txt");
    assert_eq!(metadata["size"], 11);
    assert_eq!(metadata["isPublic"], true);
    assert_eq!(metadata["downloadCount"], 0);
    assert!(metadata["ownerUsername"].is_null());

    let download = app.server.get(&format!("/api/files/download/{}", uuid)).await;
    download.assert_status_ok();
    assert_eq!(download.as_bytes().as_ref(), b"hello world");
    let disposition = download.header("content-disposition");
    assert_eq!(
        disposition.to_str().unwrap(),
        "attachment; filename=\"notes.txt\""
    );
}

#[tokio::test]
async fn test_public_download_limit() {
    let app = create_test_app().await;
    let uuid = upload_public(&app, "notes.txt", b"data").await;
    let path = format!("/api/files/download/{}", uuid);

    app.server.get(&path).await.assert_status_ok();
    app.server.get(&path).await.assert_status_ok();
    let third = app.server.get(&path).await;

    third.assert_status(StatusCode::FORBIDDEN);
    let body: Value = third.json();
    assert_eq!(
        body["message"],
        "File download limit reached for this file. (Max. 2 Times)"
    );
}

#[tokio::test]
async fn test_public_upload_too_large() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/files/upload")
        .multipart(file_form("big.bin", "application/octet-stream", &[7u8; 2000]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    // Nothing was stored
    let stored = file_metadata::Entity::find().all(app.db.as_ref()).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/files/upload")
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Required file parameter is missing. Please provide a file to upload."
    );
}

#[tokio::test]
async fn test_unknown_file_is_not_found() {
    let app = create_test_app().await;

    let response = app.server.get("/api/files/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "File not found or expired");
}

#[tokio::test]
async fn test_expired_file_is_rejected() {
    let app = create_test_app().await;
    let uuid = upload_public(&app, "old.txt", b"stale").await;

    let model = file_metadata::Entity::find_by_id(uuid.clone())
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    let mut active: file_metadata::ActiveModel = model.into();
    active.expiry_date = Set((Utc::now() - Duration::days(1)).into());
    active.update(app.db.as_ref()).await.unwrap();

    let response = app.server.get(&format!("/api/files/{}", uuid)).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "File expired");
}

/// 私有文件只能由所有者或管理员访问
#[tokio::test]
async fn test_private_file_access_rules() {
    let app = create_test_app().await;
    let alice = app.user_token("alice").await;
    let bob = app.user_token("bobby").await;
    let uuid = upload_private(&app, &alice, "secret.txt", b"for alice").await;

    app.server
        .get(&format!("/api/files/download/{}", uuid))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.server
        .get(&format!("/user/files/download/{}", uuid))
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let own = app
        .server
        .get(&format!("/user/files/download/{}", uuid))
        .authorization_bearer(&alice)
        .await;
    own.assert_status_ok();
    assert_eq!(own.as_bytes().as_ref(), b"for alice");

    let admin = app.admin_token().await;
    app.server
        .get(&format!("/user/files/download/{}", uuid))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_user_file_listing_and_metadata() {
    let app = create_test_app().await;
    let alice = app.user_token("alice").await;
    let first = upload_private(&app, &alice, "a.txt", b"aaa").await;
    let second = upload_private(&app, &alice, "b.txt", b"bbbb").await;

    let listing = app
        .server
        .get("/user/files")
        .authorization_bearer(&alice)
        .await;
    listing.assert_status_ok();
    let files: Vec<Value> = listing.json();
    let uuids: Vec<&str> = files.iter().map(|f| f["uuid"].as_str().unwrap()).collect();
    assert_eq!(files.len(), 2);
    assert!(uuids.contains(&first.as_str()));
    assert!(uuids.contains(&second.as_str()));

    let metadata = app
        .server
        .get(&format!("/user/files/{}", first))
        .authorization_bearer(&alice)
        .await;
    metadata.assert_status_ok();
    let metadata: Value = metadata.json();
    assert_eq!(metadata["ownerUsername"], "alice");
    assert_eq!(metadata["isPublic"], false);
}

#[tokio::test]
async fn test_user_delete_file() {
    let app = create_test_app().await;
    let alice = app.user_token("alice").await;
    let bob = app.user_token("bobby").await;
    let uuid = upload_private(&app, &alice, "a.txt", b"aaa").await;
    let path = format!("/user/files/{}", uuid);

    app.server
        .delete(&path)
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let deleted = app.server.delete(&path).authorization_bearer(&alice).await;
    deleted.assert_status_ok();
    let body: Value = deleted.json();
    assert_eq!(body["message"], "File deleted successfully");

    app.server
        .get(&format!("/api/files/{}", uuid))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_files_require_authentication() {
    let app = create_test_app().await;

    let response = app.server.get("/user/files").await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "Access Denied");
}

/// 停用后旧令牌不能继续操作文件
#[tokio::test]
async fn test_deactivated_account_cannot_use_files() {
    let app = create_test_app().await;
    let alice = app.user_token("alice").await;
    let uuid = upload_private(&app, &alice, "a.txt", b"aaa").await;

    app.server
        .post("/user/deactivate")
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    let upload = app
        .server
        .post("/user/files/upload")
        .authorization_bearer(&alice)
        .multipart(file_form("b.txt", "text/plain", b"bbb"))
        .await;
    upload.assert_status(StatusCode::FORBIDDEN);
    let body: Value = upload.json();
    assert_eq!(body["message"], "Account is deactivated");

    app.server
        .get("/user/files")
        .authorization_bearer(&alice)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .get(&format!("/user/files/{}", uuid))
        .authorization_bearer(&alice)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .get(&format!("/user/files/download/{}", uuid))
        .authorization_bearer(&alice)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&format!("/user/files/{}", uuid))
        .authorization_bearer(&alice)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let stored = file_metadata::Entity::find().all(app.db.as_ref()).await.unwrap();
    assert_eq!(stored.len(), 1);
}
