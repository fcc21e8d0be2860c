// ABOUTME: HTTP route registration and shared application state
// ABOUTME: Assembles the axum router with CORS, request tracing, and a structured 404
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # HTTP Routes
//!
//! One router for the whole API. Handlers are thin: parse, call the engines,
//! shape the envelope. The dashboard is served from another origin, so CORS
//! is wide open.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::errors::{ErrorBody, ErrorCode};
use crate::store::Repository;

pub mod auth;
pub mod call_logs;
pub mod health;
pub mod setup;
pub mod sse;
pub mod tickets;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Repository>,
    pub auth: Arc<AuthManager>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Repository>, config: ServerConfig) -> Self {
        let auth = Arc::new(AuthManager::new(
            &config.auth.jwt_secret,
            config.auth.jwt_expiry_hours,
        ));
        Self {
            store,
            auth,
            config: Arc::new(config),
        }
    }
}

/// Build the full application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/setup/initial-user", post(setup::initial_user))
        // Static segments must be registered alongside the :id matcher;
        // axum gives them precedence.
        .route("/api/tickets", get(tickets::list).post(tickets::create))
        .route("/api/tickets/stats", get(tickets::stats))
        .route("/api/tickets/stream", get(sse::tickets_stream))
        .route(
            "/api/tickets/:id",
            get(tickets::get_one).put(tickets::update),
        )
        .route(
            "/api/tickets/:id/notes",
            get(tickets::list_notes).post(tickets::add_note),
        )
        .route("/api/tickets/:id/assign", post(tickets::assign))
        .route("/api/tickets/:id/resolve", post(tickets::resolve))
        .route(
            "/api/call-logs",
            get(call_logs::list).post(call_logs::create),
        )
        .route("/api/call-logs/stream", get(sse::call_logs_stream))
        .route(
            "/api/call-logs/analytics/stats",
            get(call_logs::analytics_stats),
        )
        .route(
            "/api/call-logs/history/:phone_number",
            get(call_logs::history),
        )
        .route("/api/call-logs/:id", get(call_logs::get_one))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            error: ErrorCode::ResourceNotFound,
            message: "Route not found".to_owned(),
        }),
    )
}
