// ABOUTME: In-memory repository backed by RwLock-guarded maps with insertion-order lists
// ABOUTME: Default backend for demos and tests; optionally seeded with demo fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{fixtures, Repository};
use crate::models::{CallLog, Ticket, User};

/// One collection: records by id plus the id insertion order.
#[derive(Debug)]
struct Collection<T> {
    by_id: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Clone> Collection<T> {
    fn list(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id).cloned())
            .collect()
    }

    fn get(&self, id: &str) -> Option<T> {
        self.by_id.get(id).cloned()
    }

    /// Upsert: a new id appends, an existing id keeps its position.
    fn put(&mut self, id: String, record: T) {
        if self.by_id.insert(id.clone(), record).is_none() {
            self.order.push(id);
        }
    }
}

#[derive(Debug, Default)]
struct Collections {
    tickets: Collection<Ticket>,
    call_logs: Collection<CallLog>,
    users: Collection<User>,
}

/// In-memory [`Repository`]. All mutations take the single write lock, so a
/// call-plus-ticket write is atomic with respect to every reader.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store pre-loaded with the demo dataset.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.try_write().expect("fresh lock");
            for ticket in fixtures::demo_tickets() {
                inner.tickets.put(ticket.id.clone(), ticket);
            }
            for call in fixtures::demo_call_logs() {
                inner.call_logs.put(call.id.clone(), call);
            }
            for user in fixtures::demo_users() {
                inner.users.put(user.id.clone(), user);
            }
        }
        store
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        Ok(self.inner.read().await.tickets.list())
    }

    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>> {
        Ok(self.inner.read().await.tickets.get(id))
    }

    async fn put_ticket(&self, ticket: Ticket) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.tickets.put(ticket.id.clone(), ticket);
        Ok(())
    }

    async fn list_call_logs(&self) -> Result<Vec<CallLog>> {
        Ok(self.inner.read().await.call_logs.list())
    }

    async fn get_call_log(&self, id: &str) -> Result<Option<CallLog>> {
        Ok(self.inner.read().await.call_logs.get(id))
    }

    async fn put_call_log(&self, call: CallLog) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.call_logs.put(call.id.clone(), call);
        Ok(())
    }

    async fn create_call_with_ticket(&self, call: CallLog, ticket: Option<Ticket>) -> Result<()> {
        // Single write-lock section keeps the dual insert atomic.
        let mut inner = self.inner.write().await;
        inner.call_logs.put(call.id.clone(), call);
        if let Some(ticket) = ticket {
            inner.tickets.put(ticket.id.clone(), ticket);
        }
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .list()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn put_user(&self, user: User) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.users.put(user.id.clone(), user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{call_fixture, ticket_fixture};

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.put_ticket(ticket_fixture(&format!("t{i}"))).await.unwrap();
        }
        let ids: Vec<String> = store
            .list_tickets()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    #[tokio::test]
    async fn update_keeps_position() {
        let store = MemoryStore::new();
        for i in 0..3 {
            store.put_ticket(ticket_fixture(&format!("t{i}"))).await.unwrap();
        }
        let mut middle = store.get_ticket("t1").await.unwrap().unwrap();
        middle.subject = "Updated".into();
        store.put_ticket(middle).await.unwrap();

        let tickets = store.list_tickets().await.unwrap();
        assert_eq!(tickets[1].id, "t1");
        assert_eq!(tickets[1].subject, "Updated");
        assert_eq!(tickets.len(), 3);
    }

    #[tokio::test]
    async fn dual_write_stores_both_records() {
        let store = MemoryStore::new();
        let mut call = call_fixture("c1");
        let ticket = ticket_fixture("t1");
        call.ticket_id = Some(ticket.id.clone());
        call.ticket_created = true;

        store
            .create_call_with_ticket(call, Some(ticket))
            .await
            .unwrap();
        assert!(store.get_call_log("c1").await.unwrap().is_some());
        assert!(store.get_ticket("t1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn user_lookup_is_case_insensitive() {
        let store = MemoryStore::with_fixtures();
        let user = store
            .get_user_by_email("ADMIN@CALLDESK.IO")
            .await
            .unwrap();
        assert!(user.is_some());
    }
}
