// ABOUTME: Integration tests for login and initial-user setup
// ABOUTME: Verifies token issuance and that failed logins leak nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{demo_app, empty_app, post_json};

#[tokio::test]
async fn demo_login_returns_token_and_user() {
    let app = demo_app();
    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "admin@calldesk.io", "password": "Admin@123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "admin@calldesk.io");
    assert_eq!(body["user"]["role"], "super_admin");
    // The hash never crosses the wire.
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn wrong_password_is_401_without_token_or_hint() {
    let app = demo_app();
    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "admin@calldesk.io", "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(body.get("token").is_none());
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn unknown_account_gets_the_same_message_as_wrong_password() {
    let app = demo_app();
    let (_, unknown) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "nobody@calldesk.io", "password": "whatever"}),
    )
    .await;
    let (_, wrong) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "admin@calldesk.io", "password": "wrong"}),
    )
    .await;
    assert_eq!(unknown["message"], wrong["message"]);
}

#[tokio::test]
async fn missing_credentials_are_400() {
    let app = demo_app();
    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "admin@calldesk.io"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn initial_user_bootstrap_then_login() {
    let app = empty_app();
    let (status, created) = post_json(
        &app,
        "/api/setup/initial-user",
        json!({
            "email": "founder@example.com",
            "password": "Launch!2025",
            "firstName": "Fay",
            "organizationName": "Example Inc"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["role"], "super_admin");

    let (status, login) = post_json(
        &app,
        "/api/auth/login",
        json!({"email": "founder@example.com", "password": "Launch!2025"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!login["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn initial_user_requires_email_and_password() {
    let app = empty_app();
    let (status, _) = post_json(&app, "/api/setup/initial-user", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/setup/initial-user",
        json!({"email": "founder@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_initial_user_is_rejected() {
    let app = demo_app();
    let (status, body) = post_json(
        &app,
        "/api/setup/initial-user",
        json!({"email": "admin@calldesk.io", "password": "Another@123"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_INPUT");
}
