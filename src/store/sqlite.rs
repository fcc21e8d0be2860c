// ABOUTME: Sqlite repository storing records as JSON documents in append-ordered tables
// ABOUTME: The autoincrement seq column preserves insertion order across restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::Repository;
use crate::models::{CallLog, Ticket, User};

const SCHEMA: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS tickets (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id  TEXT NOT NULL UNIQUE,
        doc TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS call_logs (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id  TEXT NOT NULL UNIQUE,
        doc TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS users (
        seq   INTEGER PRIMARY KEY AUTOINCREMENT,
        id    TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE COLLATE NOCASE,
        doc   TEXT NOT NULL
    )",
];

/// Sqlite-backed [`Repository`]. Records are whole JSON documents; queries
/// filter and sort in memory, so the tables only need id lookup and stable
/// ordering.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url` and apply the schema.
    ///
    /// # Errors
    /// Returns an error for an unparsable URL or an unreachable database.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid sqlite URL: {url}"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to open sqlite database")?;
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .context("Failed to apply sqlite schema")?;
        }
        Ok(Self { pool })
    }

    async fn list_docs<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let rows = sqlx::query(&format!("SELECT doc FROM {table} ORDER BY seq"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| {
                let doc: String = row.get("doc");
                serde_json::from_str(&doc).context("Corrupt document in store")
            })
            .collect()
    }

    async fn get_doc<T: DeserializeOwned>(&self, table: &str, id: &str) -> Result<Option<T>> {
        let row = sqlx::query(&format!("SELECT doc FROM {table} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| {
            let doc: String = row.get("doc");
            serde_json::from_str(&doc).context("Corrupt document in store")
        })
        .transpose()
    }

    async fn put_doc<T: Serialize>(&self, table: &str, id: &str, record: &T) -> Result<()> {
        let doc = serde_json::to_string(record)?;
        sqlx::query(&format!(
            "INSERT INTO {table} (id, doc) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET doc = excluded.doc"
        ))
        .bind(id)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for SqliteStore {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.list_docs("tickets").await
    }

    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>> {
        self.get_doc("tickets", id).await
    }

    async fn put_ticket(&self, ticket: Ticket) -> Result<()> {
        self.put_doc("tickets", &ticket.id, &ticket).await
    }

    async fn list_call_logs(&self) -> Result<Vec<CallLog>> {
        self.list_docs("call_logs").await
    }

    async fn get_call_log(&self, id: &str) -> Result<Option<CallLog>> {
        self.get_doc("call_logs", id).await
    }

    async fn put_call_log(&self, call: CallLog) -> Result<()> {
        self.put_doc("call_logs", &call.id, &call).await
    }

    async fn create_call_with_ticket(&self, call: CallLog, ticket: Option<Ticket>) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO call_logs (id, doc) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET doc = excluded.doc",
        )
        .bind(&call.id)
        .bind(serde_json::to_string(&call)?)
        .execute(&mut *tx)
        .await?;
        if let Some(ticket) = &ticket {
            sqlx::query(
                "INSERT INTO tickets (id, doc) VALUES (?1, ?2) \
                 ON CONFLICT(id) DO UPDATE SET doc = excluded.doc",
            )
            .bind(&ticket.id)
            .bind(serde_json::to_string(ticket)?)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT doc FROM users WHERE email = ?1 COLLATE NOCASE")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| {
            let doc: String = row.get("doc");
            serde_json::from_str(&doc).context("Corrupt user document in store")
        })
        .transpose()
    }

    async fn put_user(&self, user: User) -> Result<()> {
        let doc = serde_json::to_string(&user)?;
        sqlx::query(
            "INSERT INTO users (id, email, doc) VALUES (?1, ?2, ?3) \
             ON CONFLICT(id) DO UPDATE SET email = excluded.email, doc = excluded.doc",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
