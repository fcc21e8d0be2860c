// ABOUTME: Login endpoint issuing JWT access tokens
// ABOUTME: Failed logins return one generic 401 with no credential hint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;
use crate::auth;
use crate::errors::{AppError, AppResult};
use crate::models::UserInfo;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
    pub message: String,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::missing_field("email"))?;
    let password = body
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing_field("password"))?;

    let user = state.store.get_user_by_email(email).await?;
    // One generic failure message for every cause: unknown account, wrong
    // password, or deactivated user.
    let Some(user) = user.filter(|u| u.is_active && auth::verify_password(password, &u.password_hash))
    else {
        warn!(email, "failed login attempt");
        return Err(AppError::auth_invalid("Invalid email or password"));
    };

    let token = state.auth.generate_token(&user)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        token,
        user: UserInfo::from(&user),
        message: "Login successful".to_owned(),
    }))
}
