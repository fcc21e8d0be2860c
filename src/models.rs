// ABOUTME: Core data models for tickets, call logs, notes, and user accounts
// ABOUTME: Defines the wire-level JSON shapes shared by the HTTP API and storage backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # Data Models
//!
//! The two primary record kinds (tickets and call logs) plus the user account
//! model. Records are identified by opaque string ids serialized as `_id`,
//! matching the dashboard contract. Field names on the wire are camelCase.

use chrono::{DateTime, Datelike, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sla::{self, SlaStatus};

/// Ticket lifecycle status. Archive is a status value, never row removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    New,
    Open,
    InProgress,
    Resolved,
    Closed,
    Archived,
}

impl TicketStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Position in the sales/support pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Prospect,
    Qualified,
    Proposal,
    Negotiation,
    Closed,
}

impl Default for Stage {
    fn default() -> Self {
        Self::Prospect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    System,
    Agent,
    Client,
    Assignment,
    Resolution,
}

/// A single embedded ticket note. Notes are append-only and preserve
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    pub author: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub note_type: NoteType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing display number, e.g. `TKT-2025-08-042`.
    pub ticket_number: String,

    // Contact
    pub contact_name: String,
    pub phone_number: String,
    pub email: String,
    pub company: String,

    // Classification
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub category: String,
    pub source: String,

    // Lifecycle timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,

    // Assignment
    pub assignee: Option<Assignee>,
    pub team: Option<String>,

    // CRM pipeline
    pub stage: Stage,
    pub deal_value: f64,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub conversion_probability: u8,

    // Resolution
    pub resolution: Option<String>,
    pub resolution_date: Option<DateTime<Utc>>,
    pub resolution_time_minutes: Option<i64>,

    // Linkage and scoping
    pub call_log_id: Option<String>,
    pub organization_id: Option<String>,
    pub tags: Vec<String>,

    /// Append-only, insertion-ordered.
    pub notes: Vec<Note>,
}

impl Ticket {
    /// Append a note and refresh the mutation timestamps. The only sanctioned
    /// way to grow the notes list.
    pub fn append_note(&mut self, note: Note, now: DateTime<Utc>) {
        self.notes.push(note);
        self.touch(now);
    }

    /// Refresh `updatedAt`/`lastActivity`; required on every mutation.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.last_activity = now;
    }
}

/// Read-side projection of a ticket: the stored record plus the SLA fields
/// re-derived on every read, never cached on the record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub sla_status: SlaStatus,
    pub is_overdue: bool,
}

impl TicketView {
    #[must_use]
    pub fn of(ticket: Ticket, now: DateTime<Utc>) -> Self {
        let sla_status = sla::classify(ticket.created_at, ticket.due_date, now);
        Self {
            ticket,
            sla_status,
            is_overdue: sla_status == SlaStatus::Breached,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
}

impl CallType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Missed => "missed",
        }
    }
}

impl Default for CallType {
    fn default() -> Self {
        Self::Incoming
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Answered,
    Missed,
    Busy,
    Failed,
}

impl CallStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Answered => "answered",
            Self::Missed => "missed",
            Self::Busy => "busy",
            Self::Failed => "failed",
        }
    }
}

impl Default for CallStatus {
    fn default() -> Self {
        Self::Answered
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLog {
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing display number, e.g. `CALL-2025-08-042`.
    pub call_number: String,

    pub phone_number: String,
    pub contact_name: String,
    pub company: String,

    pub call_type: CallType,
    /// Seconds; non-negative by construction.
    pub duration: u32,
    pub status: CallStatus,
    /// Quality score, 0 (unknown) to 5.
    pub quality: u8,

    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Pure function of `started_at`; computed once at creation.
    pub is_business_hours: bool,

    // Organizational scoping
    pub organization_id: Option<String>,
    pub team_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,

    // Outcome and follow-up
    pub outcome: Option<String>,
    pub call_notes: String,
    pub follow_up_required: bool,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub recording_url: Option<String>,
    /// Seconds until the call was picked up; 0 when unknown.
    pub response_time: u32,
    pub tags: Vec<String>,

    // Ticket linkage. Invariant: `ticket_created` implies `ticket_id`
    // references an existing ticket (enforced by the atomic dual-write).
    pub ticket_id: Option<String>,
    pub ticket_created: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    OrgAdmin,
    Manager,
    Agent,
}

/// A user account. The bcrypt hash round-trips through storage but is never
/// exposed on the wire; responses go through [`UserInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub organization_id: String,
    pub organization_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Wire-safe user projection for auth and setup responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub organization_id: String,
    pub organization_name: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            organization_id: user.organization_id.clone(),
            organization_name: user.organization_name.clone(),
        }
    }
}

/// Generate an opaque record id: `<prefix>_<millis>_<random>`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(9)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

/// Generate a human-facing display number, e.g. `TKT-2025-08-042`.
#[must_use]
pub fn display_number(prefix: &str, now: DateTime<Utc>) -> String {
    let counter = rand::thread_rng().gen_range(1..=999);
    format!("{prefix}-{}-{:02}-{counter:03}", now.year(), now.month())
}

/// Whether a timestamp falls within business hours: Monday through Friday,
/// hour 9 inclusive to 18 exclusive.
#[must_use]
pub fn is_business_hours(ts: DateTime<Utc>) -> bool {
    let weekday = ts.weekday().number_from_monday();
    weekday <= 5 && (9..18).contains(&ts.hour())
}
