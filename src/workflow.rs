// ABOUTME: Call intake workflow, including atomic auto-creation of a linked ticket
// ABOUTME: Builds fully-populated CallLog and Ticket records from the intake request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # Call Intake
//!
//! Turns a raw intake request into a stored [`CallLog`] and, when requested,
//! a linked [`Ticket`]. The two records reference each other by id, so they
//! must be persisted in one atomic repository operation; this module only
//! builds the values.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::models::{
    self, CallLog, CallStatus, CallType, Note, NoteType, Priority, Stage, Ticket, TicketStatus,
};

/// SLA window attached to auto-created tickets.
const AUTO_TICKET_SLA_HOURS: i64 = 24;

/// Request body for `POST /api/call-logs`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallIntake {
    pub phone_number: Option<String>,
    pub contact_name: Option<String>,
    pub company: Option<String>,
    pub call_type: Option<CallType>,
    pub duration: Option<u32>,
    pub status: Option<CallStatus>,
    pub quality: Option<u8>,
    pub started_at: Option<DateTime<Utc>>,
    pub organization_id: Option<String>,
    pub team_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub outcome: Option<String>,
    pub call_notes: Option<String>,
    pub follow_up_required: Option<bool>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub recording_url: Option<String>,
    pub response_time: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub auto_create_ticket: Option<bool>,
}

impl CallIntake {
    /// Whether this intake asks for a linked ticket.
    #[must_use]
    pub fn wants_ticket(&self) -> bool {
        self.auto_create_ticket.unwrap_or(false)
    }
}

/// Build the call-log record for an intake request.
///
/// # Errors
/// Returns `MissingRequiredField` when `phoneNumber` is absent or blank.
pub fn build_call_log(intake: &CallIntake, now: DateTime<Utc>) -> AppResult<CallLog> {
    let phone_number = intake
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing_field("phoneNumber"))?
        .to_owned();

    let started_at = intake.started_at.unwrap_or(now);
    let duration = intake.duration.unwrap_or(0);
    // A zero-length call never ended.
    let ended_at = (duration > 0).then(|| started_at + Duration::seconds(i64::from(duration)));

    Ok(CallLog {
        id: models::generate_id("call"),
        call_number: models::display_number("CALL", now),
        phone_number,
        contact_name: intake
            .contact_name
            .clone()
            .unwrap_or_else(|| "Unknown Caller".to_owned()),
        company: intake.company.clone().unwrap_or_default(),
        call_type: intake.call_type.unwrap_or_default(),
        duration,
        status: intake.status.unwrap_or_default(),
        quality: intake.quality.unwrap_or(0).min(5),
        started_at,
        ended_at,
        is_business_hours: models::is_business_hours(started_at),
        organization_id: intake.organization_id.clone(),
        team_id: intake.team_id.clone(),
        user_id: intake.user_id.clone(),
        user_name: intake.user_name.clone(),
        outcome: intake.outcome.clone(),
        call_notes: intake.call_notes.clone().unwrap_or_default(),
        follow_up_required: intake.follow_up_required.unwrap_or(false),
        follow_up_date: intake.follow_up_date,
        recording_url: intake.recording_url.clone(),
        response_time: intake.response_time.unwrap_or(0),
        tags: intake.tags.clone().unwrap_or_default(),
        ticket_id: None,
        ticket_created: false,
        created_at: now,
        updated_at: now,
    })
}

/// Build the ticket auto-created for a call and wire the two records together.
/// Mutates the call's linkage fields so both sides reference each other before
/// either is persisted.
pub fn build_ticket_from_call(call: &mut CallLog, now: DateTime<Utc>) -> Ticket {
    let category = infer_category(call.team_id.as_deref());
    let note = Note {
        id: models::generate_id("note"),
        content: format!(
            "Ticket auto-created from {} call. Duration: {}s",
            call.call_type.as_str(),
            call.duration
        ),
        author: "System".into(),
        author_id: "system".into(),
        created_at: now,
        note_type: NoteType::System,
    };

    let ticket = Ticket {
        id: models::generate_id("ticket"),
        ticket_number: models::display_number("TKT", now),
        contact_name: call.contact_name.clone(),
        phone_number: call.phone_number.clone(),
        email: String::new(),
        company: call.company.clone(),
        subject: format!("Follow-up: {} call from {}", call.call_type.as_str(), call.contact_name),
        description: if call.call_notes.is_empty() {
            format!("Auto-created from call {}", call.call_number)
        } else {
            call.call_notes.clone()
        },
        status: TicketStatus::Open,
        priority: Priority::Medium,
        category,
        source: "phone".into(),
        created_at: now,
        updated_at: now,
        last_activity: now,
        due_date: Some(now + Duration::hours(AUTO_TICKET_SLA_HOURS)),
        assignee: None,
        team: call.team_id.clone(),
        stage: Stage::Prospect,
        deal_value: 0.0,
        next_follow_up: call.follow_up_date,
        conversion_probability: 0,
        resolution: None,
        resolution_date: None,
        resolution_time_minutes: None,
        call_log_id: Some(call.id.clone()),
        organization_id: call.organization_id.clone(),
        tags: vec![
            "auto-created".to_owned(),
            format!("{}-call", call.call_type.as_str()),
        ],
        notes: vec![note],
    };

    call.ticket_id = Some(ticket.id.clone());
    call.ticket_created = true;
    call.updated_at = now;
    ticket
}

/// Sales teams get sales tickets; everything else is support.
fn infer_category(team_id: Option<&str>) -> String {
    match team_id {
        Some(team) if team.to_lowercase().contains("sales") => "sales".to_owned(),
        _ => "support".to_owned(),
    }
}
