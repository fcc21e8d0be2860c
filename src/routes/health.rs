// ABOUTME: Service info and health probe endpoints
// ABOUTME: Both are unauthenticated and database-free
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

/// `GET /` — service banner for humans and smoke tests.
pub async fn service_info() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "service": "calldesk-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}

/// `GET /health` — liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "status": "healthy",
        "timestamp": Utc::now(),
    }))
}
