// ABOUTME: Bootstrap endpoint creating the initial super-admin account
// ABOUTME: Hashes the password with the bcrypt default cost
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{self, Role, User, UserInfo};
use crate::response::ApiResponse;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitialUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization_name: Option<String>,
}

/// `POST /api/setup/initial-user`
pub async fn initial_user(
    State(state): State<AppState>,
    Json(body): Json<InitialUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserInfo>>)> {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::missing_field("email"))?
        .to_lowercase();
    let password = body
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing_field("password"))?;

    if state.store.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::invalid_input("A user with that email already exists"));
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal("Failed to hash password").with_source(e))?;

    let user = User {
        id: models::generate_id("user"),
        email,
        password_hash,
        first_name: body.first_name.unwrap_or_else(|| "Admin".to_owned()),
        last_name: body.last_name.unwrap_or_default(),
        role: Role::SuperAdmin,
        organization_id: models::generate_id("org"),
        organization_name: body
            .organization_name
            .unwrap_or_else(|| "My Organization".to_owned()),
        is_active: true,
        created_at: Utc::now(),
    };
    let info = UserInfo::from(&user);
    state.store.put_user(user).await?;
    info!(user_id = %info.id, "initial admin user created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(info, "Initial user created")),
    ))
}
