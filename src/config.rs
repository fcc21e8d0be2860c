// ABOUTME: Environment-based server configuration with sensible development defaults
// ABOUTME: Loads HTTP port, database URL, JWT settings, and SSE tuning from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # Server Configuration
//!
//! Environment-only configuration, loaded once at startup. A `.env` file is
//! honored when present. The database URL is optional: without one the server
//! runs on the fixture-seeded in-memory store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Fallback JWT secret for development; never use in production.
const DEV_JWT_SECRET: &str = "calldesk-dev-secret-change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Optional sqlite connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Server-push stream settings
    pub sse: SseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SseConfig {
    /// Heartbeat interval in seconds for long-lived stream connections
    pub heartbeat_seconds: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns an error when a set variable fails to parse.
    pub fn from_env() -> Result<Self> {
        // Load .env if present; absence is fine.
        let _ = dotenvy::dotenv();

        let http_port = env_var_or("HTTP_PORT", "8081")?
            .parse()
            .context("Invalid HTTP_PORT value")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("JWT_SECRET not set, using development fallback secret");
                DEV_JWT_SECRET.to_owned()
            }
        };

        let jwt_expiry_hours = env_var_or("JWT_EXPIRY_HOURS", "24")?
            .parse()
            .context("Invalid JWT_EXPIRY_HOURS value")?;

        let heartbeat_seconds = env_var_or("SSE_HEARTBEAT_SECONDS", "30")?
            .parse()
            .context("Invalid SSE_HEARTBEAT_SECONDS value")?;

        Ok(Self {
            http_port,
            database_url,
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
            sse: SseConfig { heartbeat_seconds },
        })
    }

    /// One-line startup summary, safe to log (no secrets).
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database={} jwt_expiry={}h sse_heartbeat={}s",
            self.http_port,
            self.database_url.as_deref().unwrap_or("in-memory"),
            self.auth.jwt_expiry_hours,
            self.sse.heartbeat_seconds
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8081,
            database_url: None,
            auth: AuthConfig {
                jwt_secret: DEV_JWT_SECRET.to_owned(),
                jwt_expiry_hours: 24,
            },
            sse: SseConfig {
                heartbeat_seconds: 30,
            },
        }
    }
}

fn env_var_or(name: &str, default: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Ok(default.to_owned()),
    }
}
