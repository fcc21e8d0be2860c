// ABOUTME: Storage abstraction over the ticket, call-log, and user collections
// ABOUTME: Backends implement the Repository trait; handlers never see a concrete store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # Storage
//!
//! Handlers depend on the [`Repository`] trait only. Two backends exist: a
//! fixture-seeded in-memory store for demos and tests, and a sqlite store for
//! persistent deployments. Both preserve insertion order on list reads, which
//! is what makes stable-sort tie-breaking deterministic.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::{CallLog, Ticket, User};

pub mod fixtures;
pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persistence operations shared by every backend.
///
/// `put_*` upserts: inserting a new id appends to the collection, rewriting
/// an existing id keeps its position. `create_call_with_ticket` persists both
/// records atomically so the cross-links never dangle.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;
    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>>;
    async fn put_ticket(&self, ticket: Ticket) -> Result<()>;

    async fn list_call_logs(&self) -> Result<Vec<CallLog>>;
    async fn get_call_log(&self, id: &str) -> Result<Option<CallLog>>;
    async fn put_call_log(&self, call: CallLog) -> Result<()>;

    /// Persist a call and its optional auto-created ticket in one atomic step.
    async fn create_call_with_ticket(&self, call: CallLog, ticket: Option<Ticket>) -> Result<()>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn put_user(&self, user: User) -> Result<()>;
}

/// Open the configured backend. Without a database URL the server runs on the
/// fixture-seeded in-memory store.
///
/// # Errors
/// Returns an error when a configured sqlite database cannot be opened.
pub async fn connect_or_fallback(database_url: Option<&str>) -> Result<Arc<dyn Repository>> {
    match database_url {
        Some(url) => {
            let store = SqliteStore::connect(url).await?;
            info!(url, "Connected to sqlite store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("No DATABASE_URL configured, using in-memory store with demo fixtures");
            Ok(Arc::new(MemoryStore::with_fixtures()))
        }
    }
}
