// ABOUTME: Stable sorting and page-based pagination over filtered collections
// ABOUTME: Typed sort keys per collection with insertion order breaking ties
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! Sorting and pagination.
//!
//! Sorts are total orders over the chosen field, stable so that records with
//! equal keys keep their insertion order in both directions. Timestamps
//! compare by instant. Pagination is page-based (`page` × `limit`) on every
//! endpoint; a page past the end yields an empty page, never an error.

use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{CallLog, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a wire parameter; anything other than `asc` defaults to `desc`.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(v) if v.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSortKey {
    CreatedAt,
    UpdatedAt,
    LastActivity,
    DueDate,
}

impl TicketSortKey {
    /// Parse a wire parameter; unknown keys fall back to the natural default.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(v) if v.eq_ignore_ascii_case("updatedAt") => Self::UpdatedAt,
            Some(v) if v.eq_ignore_ascii_case("lastActivity") => Self::LastActivity,
            Some(v) if v.eq_ignore_ascii_case("dueDate") => Self::DueDate,
            _ => Self::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallLogSortKey {
    StartedAt,
    CreatedAt,
    Duration,
    ContactName,
}

impl CallLogSortKey {
    /// Parse a wire parameter; unknown keys fall back to the natural default.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some(v) if v.eq_ignore_ascii_case("createdAt") => Self::CreatedAt,
            Some(v) if v.eq_ignore_ascii_case("duration") => Self::Duration,
            Some(v) if v.eq_ignore_ascii_case("contactName") => Self::ContactName,
            _ => Self::StartedAt,
        }
    }
}

/// Stable in-place sort; equal keys keep insertion order for either direction.
pub fn sort_tickets(tickets: &mut [Ticket], key: TicketSortKey, order: SortOrder) {
    tickets.sort_by(|a, b| {
        let ordering = match key {
            TicketSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            TicketSortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            TicketSortKey::LastActivity => a.last_activity.cmp(&b.last_activity),
            // Tickets without a due date sort after dated ones ascending.
            TicketSortKey::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        order.apply(ordering)
    });
}

/// Stable in-place sort; equal keys keep insertion order for either direction.
pub fn sort_call_logs(calls: &mut [CallLog], key: CallLogSortKey, order: SortOrder) {
    calls.sort_by(|a, b| {
        let ordering = match key {
            CallLogSortKey::StartedAt => a.started_at.cmp(&b.started_at),
            CallLogSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            CallLogSortKey::Duration => a.duration.cmp(&b.duration),
            CallLogSortKey::ContactName => a
                .contact_name
                .to_lowercase()
                .cmp(&b.contact_name.to_lowercase()),
        };
        order.apply(ordering)
    });
}

/// Requested page window. `page` is 1-based; both values are clamped to 1.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    pub page: u32,
    pub limit: u32,
}

impl PageSpec {
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }
}

/// Pagination metadata derived with ceiling division.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Slice one page out of an already-sorted collection.
#[must_use]
pub fn paginate<T>(items: Vec<T>, spec: PageSpec) -> (Vec<T>, Pagination) {
    let total = items.len();
    let total_pages = (total as u32).div_ceil(spec.limit);
    let start = (spec.page as usize - 1).saturating_mul(spec.limit as usize);

    let page_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(spec.limit as usize)
        .collect();

    let pagination = Pagination {
        page: spec.page,
        limit: spec.limit,
        total,
        total_pages,
        has_next: spec.page < total_pages,
        has_previous: spec.page > 1 && total > 0,
    };
    (page_items, pagination)
}
