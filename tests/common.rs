// ABOUTME: Shared helpers for integration tests
// ABOUTME: Builds in-memory routers and drives them with oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use calldesk::config::ServerConfig;
use calldesk::routes::{router, AppState};
use calldesk::store::MemoryStore;

/// Router over the fixture-seeded demo store.
pub fn demo_app() -> Router {
    router(AppState::new(
        Arc::new(MemoryStore::with_fixtures()),
        ServerConfig::default(),
    ))
}

/// Router over an empty in-memory store.
pub fn empty_app() -> Router {
    router(AppState::new(
        Arc::new(MemoryStore::new()),
        ServerConfig::default(),
    ))
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app.clone(), request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app.clone(), request).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::put(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app.clone(), request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read failed");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };
    (status, body)
}
